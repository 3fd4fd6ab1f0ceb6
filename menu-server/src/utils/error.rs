//! Unified error handling
//!
//! Application-level error type and response envelope:
//! - [`AppError`] - boundary error enum, maps to HTTP status codes
//! - [`AppResponse`] - API response structure
//!
//! Repository-level errors ([`crate::db::repository::RepoError`]) convert
//! into [`AppError`] at the handler boundary so `?` works end to end.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "0000",
///   "message": "success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("0000" means success)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: "0000".to_string(),
            message: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::DuplicateLink(msg) => AppError::Conflict(msg),
            RepoError::InvalidDefaultModifier(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "E1001"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "E4004"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "E4009"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "E4000"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E0001"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "E0002"),
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        let body = AppResponse::<()> {
            code: code.to_string(),
            message: self.to_string(),
            data: None,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handler functions
pub type AppResult<T> = Result<T, AppError>;
