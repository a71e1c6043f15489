//! Sequential failover retrieval.
//!
//! Gateways are tried one after another in the order given; the first
//! successful response wins. Gateways are never raced.

use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};

use pinshare_core::config::gateway::GatewayConfig;
use pinshare_core::error::AppError;

use crate::resolver::GatewayUrl;

/// Content retrieved from a gateway.
#[derive(Debug, Clone)]
pub struct FetchedContent {
    /// Gateway that answered.
    pub gateway: String,
    /// URL that answered.
    pub url: String,
    /// `Content-Type` reported by the gateway, if any.
    pub content_type: Option<String>,
    /// Response body.
    pub body: Bytes,
}

/// HTTP client that walks a list of gateway URLs until one succeeds.
#[derive(Debug, Clone)]
pub struct GatewayFetcher {
    client: reqwest::Client,
}

impl GatewayFetcher {
    /// Creates a fetcher with the configured per-request timeout.
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetches the first URL that answers with a success status.
    ///
    /// Returns an external-service error listing every failure when all
    /// gateways fail.
    pub async fn fetch_first(&self, urls: &[GatewayUrl]) -> Result<FetchedContent, AppError> {
        if urls.is_empty() {
            return Err(AppError::validation("No gateway URLs to fetch"));
        }

        let mut failures = Vec::with_capacity(urls.len());

        for candidate in urls {
            match self.fetch_one(candidate).await {
                Ok(content) => {
                    info!(
                        gateway = %candidate.gateway,
                        bytes = content.body.len(),
                        "Fetched content from gateway"
                    );
                    return Ok(content);
                }
                Err(reason) => {
                    warn!(gateway = %candidate.gateway, %reason, "Gateway failed, trying next");
                    failures.push(format!("{}: {reason}", candidate.gateway));
                }
            }
        }

        Err(AppError::external_service(format!(
            "All gateways failed ({})",
            failures.join("; ")
        )))
    }

    async fn fetch_one(&self, candidate: &GatewayUrl) -> Result<FetchedContent, String> {
        let response = self
            .client
            .get(&candidate.url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| e.to_string())?;

        Ok(FetchedContent {
            gateway: candidate.gateway.clone(),
            url: candidate.url.clone(),
            content_type,
            body,
        })
    }
}
