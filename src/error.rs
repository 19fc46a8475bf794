//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large")]
    PayloadTooLarge,
    /// Database failure tagged with the operation that issued it.
    #[error("{op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Adapter for `map_err` that tags a sqlx error with `op`.
    pub fn storage(op: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::Storage { op, source }
    }

    /// True when the database rejected a row through a CHECK constraint.
    pub fn is_check_violation(&self) -> bool {
        match self {
            AppError::Storage {
                source: sqlx::Error::Database(e),
                ..
            } => e.is_check_violation(),
            _ => false,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            // Already logged with its operation tag by the store.
            AppError::Storage { .. } => "internal database error".to_string(),
            AppError::Config(_) => {
                tracing::error!(error = %self, "configuration error");
                "internal configuration error".to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}

/// Any body that fails to decode is a 400, except one cut off by the body limit.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        AppError::BadRequest("invalid request payload".into())
    }
}
