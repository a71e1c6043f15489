//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default so that an empty file
//! yields a working configuration.

pub mod app;
pub mod gateway;
pub mod logging;
pub mod pinning;
pub mod share;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::gateway::GatewayConfig;
use self::logging::LoggingConfig;
use self::pinning::PinningConfig;
use self::share::ShareConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay) and
/// `PINSHARE__*` environment variables. It is loaded once and injected
/// into every component that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Share link settings.
    #[serde(default)]
    pub share: ShareConfig,
    /// Content gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Pinning service settings.
    #[serde(default)]
    pub pinning: PinningConfig,
    /// File record storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables prefixed with `PINSHARE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    /// Load configuration from an explicit file path, still honouring
    /// `PINSHARE__*` environment overrides.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder().add_source(config::File::with_name(path).required(false)),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("PINSHARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.share.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gateway.gateways.len(), 4);
        assert_eq!(config.gateway.min_content_id_len, 10);
        assert!(!config.pinning.is_configured());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"share": {"public_origin": "https://files.example"}}"#)
                .expect("deserialize");
        assert_eq!(config.share.public_origin, "https://files.example");
        assert_eq!(config.gateway.min_content_id_len, 10);
        assert_eq!(config.gateway.gateways[0].name, "pinata");
    }
}
