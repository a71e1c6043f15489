//! Custom Axum extractors.

pub mod owner;
pub mod valid_json;

pub use owner::{Owner, USER_ID_HEADER, WALLET_HEADER};
pub use valid_json::ValidJson;
