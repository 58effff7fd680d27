use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SellerError {
    #[error("Seller not found: {0}")]
    NotFound(Uuid),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Sellers may only modify their own account")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type SellerResult<T> = Result<T, SellerError>;

/// Convert SellerError to AppError for standardized error responses
impl From<SellerError> for AppError {
    fn from(err: SellerError) -> Self {
        match err {
            SellerError::NotFound(id) => AppError::NotFound(format!("Seller {} not found", id)),
            SellerError::DuplicateUsername(username) => {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            }
            SellerError::Validation(msg) => AppError::BadRequest(msg),
            SellerError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".to_string())
            }
            SellerError::Forbidden => {
                AppError::Forbidden("Sellers may only modify their own account".to_string())
            }
            SellerError::PasswordHash(msg) => AppError::InternalServerError(msg),
            SellerError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for SellerError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
