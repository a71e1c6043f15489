//! Uploaded-file records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::FileId;

/// Identity of the owner of an uploaded file.
///
/// Either field may be absent; a wallet-only user has no `user_id` and an
/// account-only user has no `wallet_address`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOwner {
    /// Account id from the authentication provider.
    pub user_id: Option<String>,
    /// Connected wallet address.
    pub wallet_address: Option<String>,
}

impl FileOwner {
    /// Whether neither identity is known.
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && self.wallet_address.is_none()
    }

    /// Whether `record` belongs to this owner (user id OR wallet match).
    pub fn owns(&self, record: &FileRecord) -> bool {
        let user_match = matches!(
            (&self.user_id, &record.user_id),
            (Some(a), Some(b)) if a == b
        );
        let wallet_match = matches!(
            (&self.wallet_address, &record.wallet_address),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b)
        );
        user_match || wallet_match
    }
}

/// A file that was pinned and recorded against its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Record id.
    pub id: FileId,
    /// Original file name.
    pub name: String,
    /// MIME type guessed at upload.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Content identifier returned by the pinning service.
    pub content_id: String,
    /// Upload instant.
    pub uploaded_at: DateTime<Utc>,
    /// Owner account id.
    pub user_id: Option<String>,
    /// Owner wallet address.
    pub wallet_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: Option<&str>, wallet: Option<&str>) -> FileRecord {
        FileRecord {
            id: FileId::new(),
            name: "a.txt".into(),
            mime_type: "text/plain".into(),
            size_bytes: 1,
            content_id: "QmTestContentId".into(),
            uploaded_at: Utc::now(),
            user_id: user.map(str::to_string),
            wallet_address: wallet.map(str::to_string),
        }
    }

    #[test]
    fn test_owner_matches_user_or_wallet() {
        let owner = FileOwner {
            user_id: Some("user_1".into()),
            wallet_address: Some("0xABC".into()),
        };
        assert!(owner.owns(&record(Some("user_1"), None)));
        assert!(owner.owns(&record(None, Some("0xabc"))));
        assert!(!owner.owns(&record(Some("user_2"), Some("0xdef"))));
    }

    #[test]
    fn test_anonymous_owner_owns_nothing() {
        let owner = FileOwner::default();
        assert!(owner.is_anonymous());
        assert!(!owner.owns(&record(None, None)));
    }
}
