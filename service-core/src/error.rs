use crate::response::ApiResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message shown to clients for any storage failure.
pub const DATABASE_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Client input violated a field constraint.
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        errors: Vec<String>,
    },

    /// Identifier is not well-formed for the identifier type.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    /// Third-party API returned non-2xx or could not be reached.
    #[error("Upstream error: {message}")]
    UpstreamError {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::ValidationError {
            errors: vec![message.clone()],
            message,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::UpstreamError { .. }
            | AppError::ConfigError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, errors) = match self {
            AppError::ValidationError { message, errors } => (message, Some(errors)),
            AppError::InvalidId(msg) => (msg, None),
            AppError::NotFound(err) => (err.to_string(), None),
            AppError::UpstreamError { message, .. } => (message, None),
            AppError::DatabaseError(err) => {
                tracing::error!(error = %err, "Database error");
                (DATABASE_ERROR_MESSAGE.to_string(), None)
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error");
                ("서버 설정 오류가 발생했습니다.".to_string(), None)
            }
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                ("서버 내부 오류가 발생했습니다.".to_string(), None)
            }
        };

        let mut body = ApiResponse::<()>::failure(message);
        body.errors = errors;

        (status, Json(body)).into_response()
    }
}
