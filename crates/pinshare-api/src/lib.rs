//! # pinshare-api
//!
//! HTTP API layer for PinShare built on Axum.
//!
//! Exposes link creation, link opening and password verification, gateway
//! URL resolution, and the owner's file list and uploads.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
