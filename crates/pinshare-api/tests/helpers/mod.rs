//! Shared test helpers for API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use pinshare_api::{AppState, build_app};
use pinshare_core::config::AppConfig;
use pinshare_core::traits::clock::ManualClock;
use pinshare_pinning::MemoryFileStore;

pub const CID: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared with the app
    pub clock: Arc<ManualClock>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestApp {
    /// App with default configuration (pinning not configured)
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// App with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(MemoryFileStore::with_capacity(100));
        let state = AppState::new(config, clock.clone(), store).expect("state");
        Self {
            router: build_app(state),
            clock,
        }
    }

    /// Make a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a share link and return its query string (without `?`)
    pub async fn create_share(&self, password: Option<&str>, expiry_days: Option<u32>) -> String {
        let response = self
            .request(
                "POST",
                "/api/shares",
                Some(serde_json::json!({
                    "content_id": CID,
                    "display_name": "report.pdf",
                    "password": password,
                    "expiry_days": expiry_days,
                })),
                &[],
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        let url = response.body["data"]["url"]
            .as_str()
            .expect("url in response");
        url.split_once('?').expect("query").1.to_string()
    }
}
