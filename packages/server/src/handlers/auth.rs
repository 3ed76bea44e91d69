use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, decide_login, validate_login_request};
use crate::state::AppState;
use crate::store;
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log into a branch",
    description = "Checks the username and password, then the branch: admins may log into any \
        branch, other users only into their own. No token or session is issued.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login accepted", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Wrong credentials (INVALID_CREDENTIALS) or branch (BRANCH_MISMATCH)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username, branch = %payload.branch))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let matched = match store::find_user_by_username(&state.db, payload.username.trim()).await? {
        Some(user) => {
            let is_valid = hash::verify_password(&payload.password, &user.password)
                .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
            is_valid.then_some(user)
        }
        None => None,
    };

    decide_login(matched.as_ref(), &payload.branch).into_result()?;

    let user = matched.ok_or(AppError::InvalidCredentials)?;
    tracing::info!(user_id = user.id, role = %user.role, "Login accepted");

    Ok(Json(LoginResponse {
        success: true,
        user: user.into(),
    }))
}
