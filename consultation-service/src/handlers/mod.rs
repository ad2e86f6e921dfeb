pub mod consultations;
pub mod health;
pub mod meshy;

pub use consultations::{create_consultation, delete_consultation, list_consultations};
pub use health::{health_check, metrics_endpoint, not_found};
pub use meshy::{download_model, get_task_status, get_usage, image_to_3d, text_to_3d};

use axum::extract::rejection::JsonRejection;
use service_core::error::AppError;

/// Malformed bodies are client errors reported in the envelope rather than
/// axum's plain-text rejection.
pub(crate) fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::info!(reason = %rejection.body_text(), "Rejected request body");
    AppError::ValidationError {
        message: "요청 본문이 올바른 JSON 형식이 아닙니다.".to_string(),
        errors: vec![rejection.body_text()],
    }
}
