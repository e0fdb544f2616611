//! # API Error Type
//!
//! Unified error type for storefront handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vitrine                                │
//! │                                                                         │
//! │  Handler                                                               │
//! │  Result<Json<T>, ApiError>                                             │
//! │         │                                                               │
//! │         ├── ValidationError ───────────► 400 VALIDATION_ERROR          │
//! │         ├── HeroCapacity/Minimum ──────► 409 CAPACITY_ERROR            │
//! │         ├── unknown id ────────────────► 404 NOT_FOUND                 │
//! │         ├── bad password / no session ─► 401 UNAUTHORIZED              │
//! │         ├── DbError (save failed) ─────► 500 PERSISTENCE_ERROR         │
//! │         └── anything else ─────────────► 500 INTERNAL                  │
//! │                                                                         │
//! │  Body: { "code": "NOT_FOUND", "message": "Product not found: p1" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use vitrine_core::{CoreError, ValidationError};
use vitrine_db::DbError;

use crate::state::StoreError;

/// Error body returned by every failing route.
///
/// ```json
/// {
///   "code": "CAPACITY_ERROR",
///   "message": "Hero banner cannot have more than 3 images"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Hero image bound violated (409)
    CapacityError,

    /// Missing or invalid admin session (401)
    Unauthorized,

    /// Storage refused the write (500)
    PersistenceError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::CapacityError => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::PersistenceError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }
}

/// Storage failures. Details go to the log, the caller gets a generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::QuotaExceeded { .. } => {
                tracing::warn!("Storage quota exceeded: {}", err);
                ApiError::new(
                    ErrorCode::PersistenceError,
                    "Storage is full; remove images or products and try again",
                )
            }
            other => {
                tracing::error!("Failed to persist change: {}", other);
                ApiError::new(ErrorCode::PersistenceError, "Failed to save changes")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::HeroCapacityExceeded { .. } | CoreError::HeroMinimumImages { .. } => {
                ApiError::new(ErrorCode::CapacityError, err.to_string())
            }
            CoreError::InvalidCredential | CoreError::NotAuthenticated => {
                ApiError::unauthorized(err.to_string())
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Db(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
