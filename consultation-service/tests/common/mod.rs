#![allow(dead_code)]

use consultation_service::config::{
    ConsultationConfig, CorsConfig, MeshyConfig, MongoConfig, StoreBackend, StoreConfig,
};
use consultation_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::time::Duration;

pub const ALLOWED_ORIGIN: &str = "https://daedam.onrender.com";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

pub fn test_config(backend: StoreBackend, meshy_base_url: &str, meshy_api_key: &str) -> ConsultationConfig {
    ConsultationConfig {
        // Random port for testing
        common: CoreConfig { port: 0 },
        store: StoreConfig { backend },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("consultation_test_{}", uuid::Uuid::new_v4().simple()),
        },
        cors: CorsConfig {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        },
        meshy: MeshyConfig {
            api_key: Secret::new(meshy_api_key.to_string()),
            base_url: meshy_base_url.to_string(),
            timeout_secs: 5,
        },
    }
}

impl TestApp {
    /// In-memory store; Meshy pointed at an unroutable address.
    pub async fn spawn() -> Self {
        Self::spawn_with_config(test_config(StoreBackend::Memory, "http://127.0.0.1:9", "")).await
    }

    /// In-memory store; Meshy pointed at a stub server.
    pub async fn spawn_with_meshy(base_url: &str, api_key: &str) -> Self {
        Self::spawn_with_config(test_config(StoreBackend::Memory, base_url, api_key)).await
    }

    pub async fn spawn_with_config(config: ConsultationConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_consultation(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/consultations"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn valid_consultation() -> serde_json::Value {
    serde_json::json!({
        "name": "Kim",
        "company": "Acme",
        "phone": "010-1234-5678",
        "businessType": "기타",
        "investmentAmount": "1억 미만"
    })
}
