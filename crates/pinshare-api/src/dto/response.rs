//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pinshare_gateway::ResolvedUrls;
use pinshare_share::display::FileKind;
use pinshare_share::{AccessState, ShareSession};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether pinning credentials are configured.
    pub pinning_configured: bool,
    /// Number of configured gateways.
    pub gateways: usize,
}

/// A freshly built share link.
#[derive(Debug, Clone, Serialize)]
pub struct CreateShareResponse {
    /// The share URL.
    pub url: String,
    /// Content id.
    pub content_id: String,
    /// File name.
    pub display_name: String,
    /// Whether a password is required.
    pub is_protected: bool,
    /// Expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
}

/// What a recipient sees after opening a link.
#[derive(Debug, Clone, Serialize)]
pub struct ShareViewResponse {
    /// Content id.
    pub content_id: String,
    /// File name.
    pub display_name: String,
    /// Coarse file kind.
    pub file_kind: FileKind,
    /// Whether a password is required.
    pub is_protected: bool,
    /// Session state.
    pub state: AccessState,
    /// Expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// "Expires in N days" style label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_label: Option<String>,
    /// Gateway URLs, only once access is granted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<ResolvedUrls>,
}

impl ShareViewResponse {
    /// Build the view of `session`; `urls` must only be set once revealed.
    pub fn new(session: &ShareSession, now: DateTime<Utc>, urls: Option<ResolvedUrls>) -> Self {
        let d = session.descriptor();
        Self {
            content_id: d.content_id.clone(),
            display_name: d.display_name.clone(),
            file_kind: session.file_kind(),
            is_protected: d.is_protected,
            state: session.state(),
            expires_at: d.expires_at,
            expiry_label: session.expiry_label(now),
            urls,
        }
    }
}
