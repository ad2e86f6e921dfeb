use super::json_rejection;
use crate::dtos::{ImageTo3dRequest, TextTo3dRequest};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use service_core::response::ApiResponse;

type UpstreamResult = Result<Json<ApiResponse<Value>>, AppError>;

#[tracing::instrument(skip(state, payload))]
pub async fn text_to_3d(
    State(state): State<AppState>,
    payload: Result<Json<TextTo3dRequest>, JsonRejection>,
) -> UpstreamResult {
    let Json(request) = payload.map_err(json_rejection)?;

    let prompt = request
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::validation("프롬프트를 입력해주세요."))?;

    let result = state.meshy.text_to_3d(prompt, request.options).await?;
    Ok(Json(ApiResponse::success(result)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn image_to_3d(
    State(state): State<AppState>,
    payload: Result<Json<ImageTo3dRequest>, JsonRejection>,
) -> UpstreamResult {
    let Json(request) = payload.map_err(json_rejection)?;

    let image_url = request
        .image_url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::validation("이미지 URL을 입력해주세요."))?;

    let result = state.meshy.image_to_3d(image_url, request.options).await?;
    Ok(Json(ApiResponse::success(result)))
}

#[tracing::instrument(skip(state))]
pub async fn get_task_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> UpstreamResult {
    let result = state.meshy.task_status(&task_id).await?;
    Ok(Json(ApiResponse::success(result)))
}

#[tracing::instrument(skip(state))]
pub async fn download_model(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> UpstreamResult {
    let result = state.meshy.download(&task_id).await?;
    Ok(Json(ApiResponse::success(result)))
}

#[tracing::instrument(skip(state))]
pub async fn get_usage(State(state): State<AppState>) -> UpstreamResult {
    let result = state.meshy.usage().await?;
    Ok(Json(ApiResponse::success(result)))
}
