//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use pinshare_core::error::{AppError, ErrorKind};
use pinshare_share::ShareError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error returned by every handler.
///
/// Share errors keep a specific code (`EXPIRED_LINK`, `INCORRECT_PASSWORD`,
/// ...) so clients can tell them apart without parsing messages.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    code: Option<&'static str>,
}

impl ApiError {
    /// The underlying application error.
    pub fn inner(&self) -> &AppError {
        &self.error
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self { error, code: None }
    }
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        let code = match &err {
            ShareError::InvalidDescriptor(_) => "INVALID_DESCRIPTOR",
            ShareError::InvalidLink { .. } => "INVALID_LINK",
            ShareError::ExpiredLink => "EXPIRED_LINK",
            ShareError::IncorrectPassword => "INCORRECT_PASSWORD",
            ShareError::AccessDenied => "ACCESS_DENIED",
            ShareError::MalformedContentId(_) => "MALFORMED_CONTENT_ID",
            ShareError::Hashing(_) => "INTERNAL_ERROR",
        };
        Self {
            error: err.into(),
            code: Some(code),
        }
    }
}

fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Gone => (StatusCode::GONE, "GONE"),
        ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, default_code) = status_and_code(self.error.kind);

        let message = if status.is_server_error() {
            tracing::error!(error = %self.error, "Request failed");
            match self.error.kind {
                ErrorKind::ExternalService | ErrorKind::ServiceUnavailable => {
                    self.error.message.clone()
                }
                _ => "Internal server error".to_string(),
            }
        } else {
            self.error.message.clone()
        };

        let body = ApiErrorResponse {
            error: self.code.unwrap_or(default_code).to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_errors_keep_codes_and_statuses() {
        let cases = [
            (ShareError::ExpiredLink, StatusCode::GONE, "EXPIRED_LINK"),
            (
                ShareError::InvalidLink { reason: "missing cid" },
                StatusCode::BAD_REQUEST,
                "INVALID_LINK",
            ),
            (
                ShareError::IncorrectPassword,
                StatusCode::UNAUTHORIZED,
                "INCORRECT_PASSWORD",
            ),
            (ShareError::AccessDenied, StatusCode::FORBIDDEN, "ACCESS_DENIED"),
        ];

        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(status_and_code(api.error.kind).0, status);
            assert_eq!(api.code, Some(code));
        }
    }

    #[test]
    fn test_internal_details_hidden() {
        let response = ApiError::from(AppError::internal("db password is hunter2")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
