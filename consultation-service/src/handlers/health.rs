use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{
    extract::{OriginalUri, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use service_core::response::ApiResponse;

/// Liveness plus store connectivity. Always 200 while the process serves.
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<Value>> {
    let database = if state.store.is_connected().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(ApiResponse::success(json!({
        "status": "ok",
        "service": "consultation-service",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    })))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// Envelope for any method and path pair without a route, including a known
/// path called with the wrong method.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::failure(format!(
            "요청한 경로를 찾을 수 없습니다: {} {}",
            method,
            uri.path()
        ))),
    )
}
