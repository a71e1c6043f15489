//! Share link errors.

use thiserror::Error;

use pinshare_core::error::AppError;

/// Errors raised while building, opening or using a share link.
///
/// The `Display` text of the link errors is what the viewer sees, so it
/// does not say *why* a link is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The owner tried to share something without the mandatory fields.
    #[error("Invalid share descriptor: {0}")]
    InvalidDescriptor(String),

    /// The link lacks mandatory fields or carries unparseable values.
    #[error("This share link may be invalid or expired.")]
    InvalidLink {
        /// Internal reason, for logs only.
        reason: &'static str,
    },

    /// The link carried a valid expiry that has passed.
    #[error("This share link has expired and is no longer accessible.")]
    ExpiredLink,

    /// The submitted password did not verify.
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Content was requested before the password gate was passed.
    #[error("This file is password protected")]
    AccessDenied,

    /// A content id failed the plausibility check.
    #[error("Malformed content id: {0}")]
    MalformedContentId(String),

    /// Producing verification material failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl ShareError {
    pub(crate) fn invalid_link(reason: &'static str) -> Self {
        Self::InvalidLink { reason }
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        let message = err.to_string();
        match err {
            ShareError::InvalidDescriptor(_)
            | ShareError::InvalidLink { .. }
            | ShareError::MalformedContentId(_) => AppError::validation(message),
            ShareError::ExpiredLink => AppError::gone(message),
            ShareError::IncorrectPassword => AppError::authentication(message),
            ShareError::AccessDenied => AppError::authorization(message),
            ShareError::Hashing(_) => AppError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinshare_core::error::ErrorKind;

    #[test]
    fn test_invalid_link_message_hides_reason() {
        let err = ShareError::invalid_link("missing cid");
        assert_eq!(err.to_string(), "This share link may be invalid or expired.");
    }

    #[test]
    fn test_expired_and_invalid_map_to_distinct_kinds() {
        let expired: AppError = ShareError::ExpiredLink.into();
        let invalid: AppError = ShareError::invalid_link("x").into();
        assert_eq!(expired.kind, ErrorKind::Gone);
        assert_eq!(invalid.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_incorrect_password_is_authentication() {
        let err: AppError = ShareError::IncorrectPassword.into();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Incorrect password");
    }
}
