//! Application startup and lifecycle management.
//!
//! The store handle and the Meshy client are built once here and reach the
//! handlers only through [`AppState`].

use crate::config::{ConsultationConfig, StoreBackend};
use crate::handlers;
use crate::services::{
    ConsultationRepository, ConsultationStore, InMemoryRepository, MeshyClient, MongoDb,
};
use axum::{
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ConsultationConfig,
    pub store: ConsultationStore,
    pub meshy: MeshyClient,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ConsultationConfig) -> Result<Self, AppError> {
        let repository: Arc<dyn ConsultationRepository> = match config.store.backend {
            StoreBackend::Mongo => {
                let db = MongoDb::connect(&config.mongodb.uri, &config.mongodb.database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;
                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                Arc::new(db)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory consultation store; records are not persisted");
                Arc::new(InMemoryRepository::new())
            }
        };

        let meshy = MeshyClient::new(config.meshy.clone())?;
        if meshy.is_configured() {
            tracing::info!("Meshy client initialized");
        } else {
            tracing::warn!("Meshy API key not configured - generation proxy calls will fail");
        }

        let state = AppState {
            config: config.clone(),
            store: ConsultationStore::new(repository),
            meshy,
        };

        let router = build_router(state.clone());

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Consultation service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> &ConsultationStore {
        &self.state.store
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/consultations",
            post(handlers::create_consultation).get(handlers::list_consultations),
        )
        .route("/consultations/:id", delete(handlers::delete_consultation))
        .route("/meshy/text-to-3d", post(handlers::text_to_3d))
        .route("/meshy/image-to-3d", post(handlers::image_to_3d))
        .route("/meshy/task/:task_id", get(handlers::get_task_status))
        .route("/meshy/download/:task_id", get(handlers::download_model))
        .route("/meshy/usage", get(handlers::get_usage))
        .method_not_allowed_fallback(handlers::not_found);

    Router::new()
        .nest("/api", api)
        .route("/metrics", get(handlers::metrics_endpoint))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

/// Allow-listed origins with credentials. Invalid entries are dropped, never
/// widened to a wildcard.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) if o != "*" => Some(value),
            Ok(_) => {
                tracing::error!("Wildcard CORS origin is not allowed with credentials; ignoring");
                None
            }
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Ignoring.", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
