use serde::{Deserialize, Serialize};

use crate::entity::user;
use crate::error::AppError;
use crate::models::user::UserResponse;

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "mei")]
    pub username: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Branch the user is logging into. Ignored for admins.
    #[serde(default)]
    #[schema(example = "建工店")]
    pub branch: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub success: bool,
    pub user: UserResponse,
}

/// Outcome of checking a login attempt against the branch rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDecision {
    Granted,
    BadCredentials,
    WrongBranch,
}

/// Decide a login attempt.
///
/// `user` is the account whose username and password both matched, if any.
/// Admins may log into any branch; everyone else only into their own.
pub fn decide_login(user: Option<&user::Model>, requested_branch: &str) -> LoginDecision {
    match user {
        None => LoginDecision::BadCredentials,
        Some(user) if user.is_admin() => LoginDecision::Granted,
        Some(user) if user.branch_name == requested_branch => LoginDecision::Granted,
        Some(_) => LoginDecision::WrongBranch,
    }
}

impl LoginDecision {
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            LoginDecision::Granted => Ok(()),
            LoginDecision::BadCredentials => Err(AppError::InvalidCredentials),
            LoginDecision::WrongBranch => Err(AppError::BranchMismatch),
        }
    }
}
