#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use portfolio_service::config::{
    CorsConfig, DatabaseConfig, Environment, PortfolioConfig, StoreBackend,
};
use portfolio_service::services::{DocumentStore, InMemoryStore};
use portfolio_service::{build_router, AppState};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;

pub fn test_config() -> PortfolioConfig {
    PortfolioConfig {
        common: CoreConfig {
            port: 0,
            log_level: "error".to_string(),
        },
        environment: Environment::Dev,
        database: DatabaseConfig {
            backend: StoreBackend::Memory,
            url: None,
            name: None,
            server_selection_timeout_secs: 1,
        },
        cors: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        otlp_endpoint: None,
    }
}

pub struct TestApp {
    pub router: Router,
    /// Present when the app runs on an in-memory store.
    pub memory: Option<Arc<InMemoryStore>>,
}

impl TestApp {
    /// App backed by a fresh in-memory store.
    pub fn spawn() -> Self {
        let memory = Arc::new(InMemoryStore::new());
        let store: Arc<dyn DocumentStore> = memory.clone();
        let router = build_router(AppState::new(test_config(), Some(store)));
        TestApp {
            router,
            memory: Some(memory),
        }
    }

    pub fn with_store(config: PortfolioConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        TestApp {
            router: build_router(AppState::new(config, store)),
            memory: None,
        }
    }

    pub fn stored_contacts(&self) -> usize {
        self.memory
            .as_ref()
            .map(|m| m.count("contactmessage"))
            .unwrap_or(0)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        // Extractor rejections are plain text; callers only inspect the status.
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}
