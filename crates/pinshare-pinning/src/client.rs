//! HTTP client for the pinning service (Pinata-compatible API).

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pinshare_core::config::pinning::PinningConfig;

use crate::error::PinningError;

const PIN_FILE_PATH: &str = "/pinning/pinFileToIPFS";
const TEST_AUTH_PATH: &str = "/data/testAuthentication";
const API_KEY_HEADER: &str = "pinata_api_key";
const SECRET_KEY_HEADER: &str = "pinata_secret_api_key";

/// Result of pinning one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinnedFile {
    /// Content id assigned by the service.
    pub content_id: String,
    /// Pinned size as reported by the service.
    pub size_bytes: u64,
    /// When the service pinned it, if reported.
    pub pinned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pin_size: u64,
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Pinning service client.
///
/// Credentials are sent as headers on every request and never logged.
#[derive(Debug, Clone)]
pub struct PinningClient {
    http: reqwest::Client,
    config: PinningConfig,
}

impl PinningClient {
    /// Build a client from configuration.
    pub fn new(config: &PinningConfig) -> Result<Self, PinningError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Whether API keys are present.
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn ensure_configured(&self) -> Result<(), PinningError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(PinningError::NotConfigured)
        }
    }

    /// Upload `body` as a multipart `file` part and pin it.
    pub async fn pin_file(
        &self,
        file_name: &str,
        mime_type: &str,
        body: Bytes,
    ) -> Result<PinnedFile, PinningError> {
        self.ensure_configured()?;

        let size = body.len();
        let part = Part::bytes(body.to_vec())
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part);

        debug!(file_name, size, "Pinning file");

        let response = self
            .http
            .post(self.endpoint(PIN_FILE_PATH))
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, file_name, "Pinning service rejected upload");
            return Err(PinningError::Rejected {
                status: status.to_string(),
                body,
            });
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| PinningError::InvalidResponse(e.to_string()))?;

        if parsed.ipfs_hash.trim().is_empty() {
            return Err(PinningError::InvalidResponse(
                "response carried an empty content id".to_string(),
            ));
        }

        info!(file_name, content_id = %parsed.ipfs_hash, "File pinned");

        Ok(PinnedFile {
            content_id: parsed.ipfs_hash,
            size_bytes: if parsed.pin_size > 0 {
                parsed.pin_size
            } else {
                size as u64
            },
            pinned_at: parsed.timestamp,
        })
    }

    /// Check the configured keys against the service.
    ///
    /// `Ok(false)` means the service answered but refused the keys.
    pub async fn test_authentication(&self) -> Result<bool, PinningError> {
        self.ensure_configured()?;

        let response = self
            .http
            .get(self.endpoint(TEST_AUTH_PATH))
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(SECRET_KEY_HEADER, &self.config.secret_key)
            .send()
            .await?;

        let ok = response.status().is_success();
        if ok {
            info!("Pinning service authentication succeeded");
        } else {
            warn!(status = %response.status(), "Pinning service authentication failed");
        }
        Ok(ok)
    }
}
