//! Process-local backend used for development and tests.

use super::repository::ConsultationRepository;
use crate::models::Consultation;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryRepository {
    records: RwLock<Vec<Consultation>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConsultationRepository for InMemoryRepository {
    async fn insert(&self, consultation: &Consultation) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == consultation.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "duplicate key: {}",
                consultation.id
            )));
        }
        records.push(consultation.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Consultation>, AppError> {
        let mut records = self.records.read().await.clone();
        // Stable sort: ties keep insertion order
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Consultation>, AppError> {
        let mut records = self.records.write().await;
        Ok(records
            .iter()
            .position(|r| &r.id == id)
            .map(|index| records.remove(index)))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
