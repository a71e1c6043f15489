//! Content gateway configuration.

use serde::{Deserialize, Serialize};

/// A single content gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayEndpoint {
    /// Short name used in logs and for `download_gateway`.
    pub name: String,
    /// Base URL the content identifier is appended to.
    pub base_url: String,
}

impl GatewayEndpoint {
    /// Create a gateway endpoint.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }
}

/// Gateway list and fallback settings.
///
/// `gateways` is in priority order; the first entry is the primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Ordered gateway list.
    #[serde(default = "default_gateways")]
    pub gateways: Vec<GatewayEndpoint>,
    /// Name of the gateway used for download links. Defaults to the primary.
    #[serde(default)]
    pub download_gateway: Option<String>,
    /// Shortest content identifier treated as plausible.
    #[serde(default = "default_min_content_id_len")]
    pub min_content_id_len: usize,
    /// Known-good object served when a content identifier is implausible.
    #[serde(default = "default_placeholder_content_id")]
    pub placeholder_content_id: String,
    /// Per-gateway request timeout for failover fetches, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateways: default_gateways(),
            download_gateway: None,
            min_content_id_len: default_min_content_id_len(),
            placeholder_content_id: default_placeholder_content_id(),
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}

fn default_gateways() -> Vec<GatewayEndpoint> {
    vec![
        GatewayEndpoint::new("pinata", "https://gateway.pinata.cloud/ipfs/"),
        GatewayEndpoint::new("ipfs.io", "https://ipfs.io/ipfs/"),
        GatewayEndpoint::new("cloudflare", "https://cloudflare-ipfs.com/ipfs/"),
        GatewayEndpoint::new("dweb.link", "https://dweb.link/ipfs/"),
    ]
}

fn default_min_content_id_len() -> usize {
    10
}

fn default_placeholder_content_id() -> String {
    "QmZ4tDuvesekSs4qM5ZBKpXiZGun7S2CYtEZRB3DYXkjGx".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}
