use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid order type: '{0}'")]
    InvalidOrderType(String),

    #[error("Order must contain at least one item")]
    InvalidItemList,

    #[error("Invalid order item: {0}")]
    InvalidItem(String),

    /// Covers missing, soft-deleted, and other sellers' products;
    /// callers cannot tell the three apart
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {product_name}")]
    InsufficientStock { product_name: String },

    #[error("Stock for product {product_name} would exceed the storable maximum")]
    StockLimitExceeded { product_name: String },

    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Convert OrderError to AppError for standardized error responses
impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidOrderType(value) => {
                AppError::BadRequest(format!("Invalid order type: '{}'", value))
            }
            OrderError::InvalidItemList => {
                AppError::BadRequest("Order must contain at least one item".to_string())
            }
            OrderError::InvalidItem(msg) => {
                AppError::BadRequest(format!("Invalid order item: {}", msg))
            }
            OrderError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            OrderError::InsufficientStock { product_name } => {
                AppError::Conflict(format!("Insufficient stock for product {}", product_name))
            }
            OrderError::StockLimitExceeded { product_name } => AppError::Conflict(format!(
                "Stock for product {} would exceed the storable maximum",
                product_name
            )),
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
