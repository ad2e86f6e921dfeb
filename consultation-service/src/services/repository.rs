use crate::models::Consultation;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence backend for consultation records.
///
/// Implementations own their concurrency control; callers never lock.
#[async_trait]
pub trait ConsultationRepository: Send + Sync {
    async fn insert(&self, consultation: &Consultation) -> Result<(), AppError>;

    /// All records, newest `createdAt` first.
    async fn find_all(&self) -> Result<Vec<Consultation>, AppError>;

    /// Removes the record and returns it as it was, or `None` when absent.
    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Consultation>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
