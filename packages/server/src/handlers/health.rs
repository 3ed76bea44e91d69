use axum::Json;
use serde_json::{Value, json};

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness probe",
    responses((status = 200, description = "Service is up")),
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
