//! # pinshare-gateway
//!
//! Resolves content identifiers to retrieval URLs across an ordered list
//! of content gateways, and retrieves content with caller-driven failover.

pub mod fetch;
pub mod resolver;

pub use fetch::{FetchedContent, GatewayFetcher};
pub use resolver::{GatewayResolver, GatewayUrl, ResolvedUrls};
