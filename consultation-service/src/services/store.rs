use super::repository::ConsultationRepository;
use crate::models::{Consultation, ConsultationCandidate};
use metrics::counter;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;

/// Owns the consultation schema rules and persistence operations.
///
/// Cheap to clone; every clone shares the same backend handle.
#[derive(Clone)]
pub struct ConsultationStore {
    repository: Arc<dyn ConsultationRepository>,
}

impl ConsultationStore {
    pub fn new(repository: Arc<dyn ConsultationRepository>) -> Self {
        Self { repository }
    }

    /// Validates and persists a new consultation.
    ///
    /// Nothing is written when validation fails. A `DatabaseError` leaves the
    /// outcome of the write unknown.
    pub async fn create(&self, candidate: &ConsultationCandidate) -> Result<Consultation, AppError> {
        let validated = candidate.validate().map_err(|e| {
            tracing::info!(reason = %e, "Consultation request rejected");
            e
        })?;

        let consultation = Consultation::new(validated);
        self.repository.insert(&consultation).await?;

        counter!("consultations_created_total", "business_type" => consultation.business_type.as_str())
            .increment(1);
        tracing::info!(
            id = %consultation.id,
            business_type = %consultation.business_type,
            investment_amount = %consultation.investment_amount,
            "Consultation created"
        );

        Ok(consultation)
    }

    /// Every record, newest first. Empty store yields an empty list.
    pub async fn list_all(&self) -> Result<Vec<Consultation>, AppError> {
        self.repository.find_all().await
    }

    /// Deletes one record and returns it as it was just before removal.
    ///
    /// A second delete of the same id is `NotFound`, not a no-op.
    pub async fn delete_by_id(&self, id: &str) -> Result<Consultation, AppError> {
        let object_id = ObjectId::parse_str(id).map_err(|_| {
            AppError::InvalidId("유효하지 않은 상담 ID 형식입니다.".to_string())
        })?;

        let deleted = self
            .repository
            .delete_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("상담 데이터를 찾을 수 없습니다.")))?;

        counter!("consultations_deleted_total").increment(1);
        tracing::info!(
            id = %deleted.id,
            name = %deleted.name,
            company = %deleted.company,
            created_at = %deleted.created_at,
            "Consultation deleted"
        );

        Ok(deleted)
    }

    /// Store connectivity, for the health endpoint.
    pub async fn is_connected(&self) -> bool {
        self.repository.health_check().await.is_ok()
    }
}
