//! Gateway URL construction.
//!
//! The gateway list is static configuration: a fixed priority order used
//! for redundancy, never reordered at runtime. Implausible content ids are
//! replaced with a known-good placeholder object instead of failing, so a
//! bad id can never break the page that renders the links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use tracing::{debug, warn};

use pinshare_core::config::gateway::{GatewayConfig, GatewayEndpoint};
use pinshare_core::error::AppError;
use pinshare_core::types::ContentId;

/// Characters left as-is in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A retrieval URL on a named gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayUrl {
    /// Gateway name.
    pub gateway: String,
    /// Full retrieval URL.
    pub url: String,
}

/// Everything a viewer needs to fetch a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUrls {
    /// Primary gateway URL.
    pub preferred: String,
    /// Attachment-disposition URL on the download gateway.
    pub download: String,
    /// One URL per gateway, in priority order.
    pub alternates: Vec<GatewayUrl>,
    /// Whether the placeholder object was substituted.
    pub substituted: bool,
}

/// Builds retrieval URLs for content identifiers.
#[derive(Debug, Clone)]
pub struct GatewayResolver {
    gateways: Vec<GatewayEndpoint>,
    download_index: usize,
    placeholder: String,
    min_len: usize,
}

impl GatewayResolver {
    /// Creates a resolver from configuration.
    ///
    /// Fails if the gateway list is empty or `download_gateway` names a
    /// gateway that is not in the list.
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        if config.gateways.is_empty() {
            return Err(AppError::configuration(
                "At least one content gateway must be configured",
            ));
        }

        let download_index = match config.download_gateway.as_deref() {
            None => 0,
            Some(name) => config
                .gateways
                .iter()
                .position(|g| g.name == name)
                .ok_or_else(|| {
                    AppError::configuration(format!("Unknown download gateway: {name}"))
                })?,
        };

        Ok(Self {
            gateways: config.gateways.clone(),
            download_index,
            placeholder: config.placeholder_content_id.clone(),
            min_len: config.min_content_id_len,
        })
    }

    /// The configured gateways, in priority order.
    pub fn gateways(&self) -> &[GatewayEndpoint] {
        &self.gateways
    }

    /// Whether `content_id` passes the loose shape check.
    pub fn is_plausible(&self, content_id: &str) -> bool {
        ContentId::new(content_id).is_plausible(self.min_len)
    }

    /// URL on the primary gateway.
    pub fn preferred_url(&self, content_id: &str) -> String {
        let (cid, _) = self.checked(content_id);
        join(&self.gateways[0].base_url, cid)
    }

    /// One URL per gateway, in priority order.
    pub fn all_urls(&self, content_id: &str) -> Vec<GatewayUrl> {
        let (cid, _) = self.checked(content_id);
        self.gateways
            .iter()
            .map(|g| GatewayUrl {
                gateway: g.name.clone(),
                url: join(&g.base_url, cid),
            })
            .collect()
    }

    /// URL on the download gateway asking for attachment disposition.
    pub fn download_url(&self, content_id: &str, filename: Option<&str>) -> String {
        let (cid, _) = self.checked(content_id);
        let base = join(&self.gateways[self.download_index].base_url, cid);
        match filename.filter(|f| !f.is_empty()) {
            Some(name) => format!(
                "{base}?download=true&filename={}",
                utf8_percent_encode(name, QUERY_VALUE)
            ),
            None => format!("{base}?download=true"),
        }
    }

    /// Preferred, download and alternate URLs in one pass.
    pub fn resolve(&self, content_id: &str, filename: Option<&str>) -> ResolvedUrls {
        let (_, substituted) = self.checked(content_id);
        ResolvedUrls {
            preferred: self.preferred_url(content_id),
            download: self.download_url(content_id, filename),
            alternates: self.all_urls(content_id),
            substituted,
        }
    }

    /// Returns the id to use and whether the placeholder was substituted.
    fn checked<'a>(&'a self, content_id: &'a str) -> (&'a str, bool) {
        if self.is_plausible(content_id) {
            debug!(content_id, "Resolving content id");
            (content_id, false)
        } else {
            warn!(
                content_id,
                placeholder = %self.placeholder,
                "Malformed content id, substituting placeholder"
            );
            (self.placeholder.as_str(), true)
        }
    }
}

fn join(base: &str, content_id: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), content_id)
}
