use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::user::{
    CreateUserRequest, SuccessResponse, UserResponse, validate_create_user_request,
};
use crate::state::AppState;
use crate::store::{self, NewUser};
use crate::utils::hash;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    operation_id = "listUsers",
    summary = "List user accounts",
    description = "Returns every account ordered by id, without password hashes.",
    responses(
        (status = 200, description = "User list", body = Vec<UserResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = store::list_users(&state.db).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    operation_id = "createUser",
    summary = "Create a user account",
    description = "Creates an account. The password is stored as an Argon2 hash.",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = SuccessResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Username taken or internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username, role = %payload.role))]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    validate_create_user_request(&payload)?;

    let password_hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = NewUser {
        username: payload.username.trim().to_string(),
        password_hash,
        role: payload.role.trim().to_string(),
        branch_name: payload.branch_name,
        full_name: payload.full_name,
    };

    // A duplicate username is rejected by the unique index only.
    let user = store::insert_user(&state.db, new_user).await?;

    tracing::info!(user_id = user.id, "User created");
    Ok(Json(SuccessResponse::ok()))
}
