//! Pinning service errors.

use thiserror::Error;

use pinshare_core::error::AppError;

/// Errors talking to the pinning service.
#[derive(Debug, Error)]
pub enum PinningError {
    /// API key or secret missing from configuration.
    #[error("Pinning service API keys not configured")]
    NotConfigured,

    /// Transport failure.
    #[error("Pinning service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Pinning service rejected the request: {status}")]
    Rejected {
        /// HTTP status line.
        status: String,
        /// Response body, for logs.
        body: String,
    },

    /// The service answered with something unexpected.
    #[error("Unexpected pinning service response: {0}")]
    InvalidResponse(String),
}

impl From<PinningError> for AppError {
    fn from(err: PinningError) -> Self {
        let message = err.to_string();
        match err {
            PinningError::NotConfigured => AppError::service_unavailable(message),
            PinningError::Http(source) => AppError::with_source(
                pinshare_core::error::ErrorKind::ExternalService,
                message,
                source,
            ),
            PinningError::Rejected { .. } | PinningError::InvalidResponse(_) => {
                AppError::external_service(message)
            }
        }
    }
}
