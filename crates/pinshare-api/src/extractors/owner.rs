//! `Owner` extractor: reads the caller's identity from headers set by the
//! authentication layer in front of this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use pinshare_core::types::file::FileOwner;

use crate::error::ApiError;

/// Account id header.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Wallet address header.
pub const WALLET_HEADER: &str = "x-wallet-address";

/// The calling owner. May be anonymous; services decide what that allows.
#[derive(Debug, Clone)]
pub struct Owner(pub FileOwner);

impl std::ops::Deref for Owner {
    type Target = FileOwner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl<S: Send + Sync> FromRequestParts<S> for Owner {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Owner(FileOwner {
            user_id: header(parts, USER_ID_HEADER),
            wallet_address: header(parts, WALLET_HEADER),
        }))
    }
}
