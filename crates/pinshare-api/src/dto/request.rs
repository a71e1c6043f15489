//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use pinshare_share::ShareRequest;

/// Body of `POST /api/shares`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// Content id of the file to share.
    #[validate(length(min = 1, message = "Content id is required"))]
    pub content_id: String,
    /// File name shown to recipients.
    #[validate(length(min = 1, max = 255, message = "Display name must be 1-255 characters"))]
    pub display_name: String,
    /// Optional password; empty means none.
    #[validate(length(max = 256))]
    pub password: Option<String>,
    /// Optional lifetime in days.
    pub expiry_days: Option<u32>,
}

impl From<CreateShareRequest> for ShareRequest {
    fn from(req: CreateShareRequest) -> Self {
        ShareRequest {
            content_id: req.content_id,
            display_name: req.display_name,
            password: req.password,
            expiry_days: req.expiry_days,
        }
    }
}

/// Body of `POST /api/shares/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPasswordRequest {
    /// Password attempt. An empty attempt is a mismatch, not a bad request.
    #[validate(length(max = 1024, message = "Password is too long"))]
    pub password: String,
}

/// Query of `GET /api/gateways/{cid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayQuery {
    /// File name for the download URL.
    pub filename: Option<String>,
}
