use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::request::ErrorResponse;

pub type GardenResult<T> = Result<T, GardenError>;

/// Every failure the garden core can report to a caller.
///
/// `NotFound` deliberately covers both "no such garden" and "garden owned by
/// someone else" so that non-owners cannot probe for existence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GardenError {
    #[error("Garden not found.")]
    NotFound,

    #[error("Cell ({x}, {y}) is outside the garden grid.")]
    InvalidCoordinate { x: i64, y: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Persistence(String),

    #[error("Authentication required.")]
    Unauthorized,
}

impl GardenError {
    pub fn code(&self) -> &'static str {
        match self {
            GardenError::NotFound => "NOT_FOUND",
            GardenError::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            GardenError::Validation(_) => "VALIDATION_ERROR",
            GardenError::Persistence(_) => "PERSISTENCE_FAILURE",
            GardenError::Unauthorized => "UNAUTHORIZED",
        }
    }

    /// True for failures a client may retry unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GardenError::Persistence(_))
    }
}

impl ResponseError for GardenError {
    fn status_code(&self) -> StatusCode {
        match self {
            GardenError::NotFound => StatusCode::NOT_FOUND,
            GardenError::InvalidCoordinate { .. } | GardenError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            GardenError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
            GardenError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: Some(self.code().to_string()),
        })
    }
}

impl From<tokio_postgres::Error> for GardenError {
    fn from(err: tokio_postgres::Error) -> Self {
        GardenError::Persistence(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for GardenError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        GardenError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for GardenError {
    fn from(err: serde_json::Error) -> Self {
        GardenError::Persistence(format!("grid serialization: {err}"))
    }
}
