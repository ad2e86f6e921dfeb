use super::json_rejection;
use crate::dtos::{ConsultationResponse, DeletedConsultationResponse};
use crate::models::ConsultationCandidate;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::response::ApiResponse;

// TODO: list/delete are open to anyone who can reach the service; add an
// admin guard once the intended access policy is decided.

#[tracing::instrument(skip(state, payload))]
pub async fn create_consultation(
    State(state): State<AppState>,
    payload: Result<Json<ConsultationCandidate>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ConsultationResponse>>), AppError> {
    let Json(candidate) = payload.map_err(json_rejection)?;

    let consultation = state.store.create(&candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(ConsultationResponse::from(consultation))
                .with_message("상담 요청이 성공적으로 접수되었습니다."),
        ),
    ))
}

#[tracing::instrument(skip(state))]
pub async fn list_consultations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ConsultationResponse>>>, AppError> {
    let consultations: Vec<ConsultationResponse> = state
        .store
        .list_all()
        .await?
        .into_iter()
        .map(ConsultationResponse::from)
        .collect();

    let count = consultations.len();

    Ok(Json(ApiResponse::success(consultations).with_count(count)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_consultation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedConsultationResponse>>, AppError> {
    let deleted = state.store.delete_by_id(&id).await?;

    Ok(Json(
        ApiResponse::success(DeletedConsultationResponse {
            id: deleted.id.to_hex(),
        })
        .with_message("상담 데이터가 성공적으로 삭제되었습니다."),
    ))
}
