use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;

/// A user account as exposed by the API. Never includes the password hash.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "mei")]
    pub username: String,
    /// `admin` or a branch-scoped role such as `staff`.
    #[schema(example = "staff")]
    pub role: String,
    #[schema(example = "建工店")]
    pub branch_name: String,
    #[schema(example = "Mei Lin")]
    pub full_name: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            branch_name: user.branch_name,
            full_name: user.full_name,
        }
    }
}

/// Request body for creating a user.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "mei")]
    pub username: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    #[schema(example = "staff")]
    pub role: String,
    #[serde(default)]
    #[schema(example = "建工店")]
    pub branch_name: String,
    #[serde(default)]
    #[schema(example = "Mei Lin")]
    pub full_name: String,
}

pub fn validate_create_user_request(payload: &CreateUserRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    if payload.role.trim().is_empty() {
        return Err(AppError::Validation("Role must not be empty".into()));
    }
    Ok(())
}

/// Acknowledgement for a write that returns no data.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    #[schema(example = true)]
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
