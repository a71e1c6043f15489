//! Pinning service configuration.

use serde::{Deserialize, Serialize};

/// Credentials and endpoint of the pinning service.
#[derive(Clone, Serialize, Deserialize)]
pub struct PinningConfig {
    /// API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key (`pinata_api_key` header).
    #[serde(default)]
    pub api_key: String,
    /// Secret key (`pinata_secret_api_key` header).
    #[serde(default)]
    pub secret_key: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl PinningConfig {
    /// Whether both keys are present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.secret_key.is_empty()
    }
}

impl Default for PinningConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            secret_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl std::fmt::Debug for PinningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key_hint: String = self.api_key.chars().take(5).collect();
        f.debug_struct("PinningConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &format_args!("{key_hint}..."))
            .field("secret_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_api_url() -> String {
    "https://api.pinata.cloud".to_string()
}

fn default_timeout() -> u64 {
    120
}
