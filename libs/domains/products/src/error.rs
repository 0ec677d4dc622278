use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::ContextError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Patch must set at least one field")]
    EmptyPatch,

    #[error("Body id '{body}' does not match path id '{path}'")]
    IdMismatch { path: String, body: String },

    #[error("Product {0} already exists")]
    AlreadyExists(String),

    #[error("Product {0} not found")]
    NotFound(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ProductError::Cancelled | ProductError::DeadlineExceeded)
    }
}

impl From<ContextError> for ProductError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => ProductError::Cancelled,
            ContextError::DeadlineExceeded => ProductError::DeadlineExceeded,
        }
    }
}

impl From<sqlx::Error> for ProductError {
    fn from(err: sqlx::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::InvalidProduct(err.to_string())
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            e @ (ProductError::InvalidProduct(_)
            | ProductError::EmptyPatch
            | ProductError::IdMismatch { .. }) => AppError::BadRequest(e.to_string()),
            e @ ProductError::AlreadyExists(_) => AppError::Conflict(e.to_string()),
            e @ ProductError::NotFound(_) => AppError::NotFound(e.to_string()),
            e @ ProductError::DeadlineExceeded => AppError::RequestTimeout(e.to_string()),
            e @ ProductError::Cancelled => AppError::ServiceUnavailable(e.to_string()),
            ProductError::Storage(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
