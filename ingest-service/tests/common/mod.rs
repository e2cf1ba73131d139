//! Shared helpers for ingest-service integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use ingest_service::config::{IngestConfig, LoggingConfig, MongoConfig, StoreBackend, StoreConfig};
use ingest_service::services::{DocumentStore, MemoryStore};
use ingest_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router backed by a fresh in-memory store.
pub fn memory_router() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let router = build_router(AppState::new(store.clone()));
    (router, store)
}

pub fn test_config(backend: StoreBackend, database: &str) -> IngestConfig {
    IngestConfig {
        common: CoreConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0, // Random port for testing
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017/".to_string(),
            database: database.to_string(),
            collection: "test-collection".to_string(),
        },
        store: StoreConfig { backend },
        logging: LoggingConfig {
            level: "debug".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(router: &Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body is not JSON")
}

/// A running server on a random port.
pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn DocumentStore>,
}

impl TestApp {
    pub async fn spawn(config: IngestConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());
        let store = app.store().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, store }
    }
}
