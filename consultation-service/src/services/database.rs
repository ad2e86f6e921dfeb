use super::repository::ConsultationRepository;
use crate::models::Consultation;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;
use std::time::Duration;

/// Upper bound on the health ping; the driver default server selection
/// timeout is 30s.
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for consultation-service");

        // Listing is always newest first
        let created_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.consultations()
            .create_index(created_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create createdAt index: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created index on consultations.createdAt");

        Ok(())
    }

    pub fn consultations(&self) -> Collection<Consultation> {
        self.db.collection("consultations")
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ConsultationRepository for MongoDb {
    async fn insert(&self, consultation: &Consultation) -> Result<(), AppError> {
        self.consultations()
            .insert_one(consultation, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %consultation.id, "Failed to insert consultation: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Consultation>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .consultations()
            .find(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list consultations: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect consultations: {}", e);
            AppError::from(e)
        })
    }

    async fn delete_by_id(&self, id: &ObjectId) -> Result<Option<Consultation>, AppError> {
        self.consultations()
            .find_one_and_delete(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(id = %id, "Failed to delete consultation: {}", e);
                AppError::from(e)
            })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        let admin_db = self.client.database("admin");
        let ping = admin_db.run_command(doc! { "ping": 1 }, None);

        tokio::time::timeout(HEALTH_CHECK_TIMEOUT, ping)
            .await
            .map_err(|_| {
                tracing::error!("MongoDB health check timed out");
                AppError::DatabaseError(anyhow::anyhow!("MongoDB ping timed out"))
            })?
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
