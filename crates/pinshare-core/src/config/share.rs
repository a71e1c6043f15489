//! Share link configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest accepted `max_expiry_days` (one hundred years).
pub const MAX_EXPIRY_DAYS_LIMIT: u32 = 36_500;

/// Scheme used to produce password verification material for new links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationSchemeKind {
    /// Base64 of the password. Reversible, kept for links produced by
    /// older clients.
    Legacy,
    /// Salted Argon2id PHC string.
    #[default]
    Argon2,
}

/// Share link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin that share URLs are built on (e.g. `https://files.example`).
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
    /// Scheme used when a password is attached to a new link.
    #[serde(default)]
    pub verification_scheme: VerificationSchemeKind,
    /// Upper bound for `expiry_days` on new links.
    #[serde(default = "default_max_expiry_days")]
    pub max_expiry_days: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_origin: default_public_origin(),
            verification_scheme: VerificationSchemeKind::default(),
            max_expiry_days: default_max_expiry_days(),
        }
    }
}

impl ShareConfig {
    /// Rejects settings that cannot produce a working link.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_expiry_days == 0 || self.max_expiry_days > MAX_EXPIRY_DAYS_LIMIT {
            return Err(AppError::configuration(format!(
                "share.max_expiry_days must be between 1 and {MAX_EXPIRY_DAYS_LIMIT}, got {}",
                self.max_expiry_days
            )));
        }
        if self.public_origin.trim().is_empty() {
            return Err(AppError::configuration("share.public_origin must not be empty"));
        }
        Ok(())
    }
}

fn default_public_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_max_expiry_days() -> u32 {
    365
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_share_config_is_valid() {
        assert!(ShareConfig::default().validate().is_ok());
    }

    #[test]
    fn test_max_expiry_days_is_capped() {
        let config = ShareConfig {
            max_expiry_days: u32::MAX,
            ..ShareConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ShareConfig {
            max_expiry_days: MAX_EXPIRY_DAYS_LIMIT,
            ..ShareConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
