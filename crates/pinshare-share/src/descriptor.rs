//! Share descriptors.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ShareError;
use crate::verification::PasswordVerifier;

/// The access grant carried by a share link.
///
/// A descriptor has no identity of its own. It exists only as the query
/// string of a URL; sharing the same file twice yields two independent
/// descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDescriptor {
    /// Content identifier of the shared object.
    pub content_id: String,
    /// Original file name.
    pub display_name: String,
    /// Whether a password gate applies.
    pub is_protected: bool,
    /// Verification material; present iff `is_protected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_material: Option<String>,
    /// Absolute expiry, millisecond precision.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShareDescriptor {
    /// An unprotected, non-expiring descriptor.
    pub fn new(content_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            content_id: content_id.into(),
            display_name: display_name.into(),
            is_protected: false,
            verification_material: None,
            expires_at: None,
        }
    }

    /// Attach verification material and mark the descriptor protected.
    pub fn protected(mut self, material: impl Into<String>) -> Self {
        self.is_protected = true;
        self.verification_material = Some(material.into());
        self
    }

    /// Set an absolute expiry, truncated to whole milliseconds.
    pub fn expiring_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = DateTime::from_timestamp_millis(at.timestamp_millis());
        self
    }

    /// Whether the descriptor has lapsed at `now`.
    ///
    /// A link expiring exactly at `now` is still open.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }

    /// Checks the fields an owner must provide before a link is built.
    pub fn validate(&self) -> Result<(), ShareError> {
        if self.content_id.trim().is_empty() {
            return Err(ShareError::InvalidDescriptor(
                "content id is required".to_string(),
            ));
        }
        if self.display_name.trim().is_empty() {
            return Err(ShareError::InvalidDescriptor(
                "display name is required".to_string(),
            ));
        }
        match (self.is_protected, self.verification_material.as_deref()) {
            (true, None) | (true, Some("")) => Err(ShareError::InvalidDescriptor(
                "protected links need verification material".to_string(),
            )),
            (false, Some(_)) => Err(ShareError::InvalidDescriptor(
                "verification material on an unprotected link".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// What an owner asks for when sharing a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareRequest {
    /// Content identifier of the file.
    pub content_id: String,
    /// File name shown to recipients.
    pub display_name: String,
    /// Plaintext password; empty means none.
    pub password: Option<String>,
    /// Lifetime in days, counted from `now`.
    pub expiry_days: Option<u32>,
}

impl ShareRequest {
    /// Builds the descriptor: hashes the password with `verifier` and turns
    /// `expiry_days` into an absolute instant.
    pub fn into_descriptor(
        self,
        verifier: &PasswordVerifier,
        now: DateTime<Utc>,
        max_expiry_days: u32,
    ) -> Result<ShareDescriptor, ShareError> {
        let mut descriptor = ShareDescriptor::new(self.content_id, self.display_name);
        descriptor.validate()?;

        if let Some(password) = self.password.filter(|p| !p.is_empty()) {
            descriptor = descriptor.protected(verifier.produce(&password)?);
        }

        if let Some(days) = self.expiry_days {
            if days == 0 || days > max_expiry_days {
                return Err(ShareError::InvalidDescriptor(format!(
                    "expiry must be between 1 and {max_expiry_days} days"
                )));
            }
            let expires_at = Duration::try_days(i64::from(days))
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .ok_or_else(|| {
                    ShareError::InvalidDescriptor(format!("expiry of {days} days is out of range"))
                })?;
            descriptor = descriptor.expiring_at(expires_at);
        }

        Ok(descriptor)
    }
}
