//! Application state shared across all handlers.

use std::sync::Arc;

use pinshare_core::config::AppConfig;
use pinshare_core::result::AppResult;
use pinshare_core::traits::clock::Clock;
use pinshare_core::traits::file_store::FileRecordStore;
use pinshare_gateway::GatewayResolver;
use pinshare_pinning::{PinningClient, UploadService};
use pinshare_share::{AccessEvaluator, LinkCodec, PasswordVerifier};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Source of "now"
    pub clock: Arc<dyn Clock>,

    // ── Share links ──────────────────────────────────────────
    /// Builds share URLs
    pub codec: Arc<LinkCodec>,
    /// Produces verification material for new links
    pub verifier: PasswordVerifier,
    /// Opens links and runs the password gate
    pub evaluator: Arc<AccessEvaluator>,

    // ── Content ──────────────────────────────────────────────
    /// Gateway URL construction
    pub resolver: Arc<GatewayResolver>,
    /// Pinning and file records
    pub uploads: Arc<UploadService>,
}

impl AppState {
    /// Wire every component from configuration.
    pub fn new(
        config: AppConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn FileRecordStore>,
    ) -> AppResult<Self> {
        let resolver = Arc::new(GatewayResolver::new(&config.gateway)?);
        let verifier = PasswordVerifier::new(config.share.verification_scheme);
        let evaluator = Arc::new(AccessEvaluator::new(
            verifier,
            Arc::clone(&resolver),
            Arc::clone(&clock),
        ));
        let codec = Arc::new(LinkCodec::from_config(&config.share)?);

        let pinning = PinningClient::new(&config.pinning)?;
        let uploads = Arc::new(UploadService::new(
            pinning,
            store,
            Arc::clone(&clock),
            config.storage.max_upload_size_bytes,
        ));

        Ok(Self {
            config: Arc::new(config),
            clock,
            codec,
            verifier,
            evaluator,
            resolver,
            uploads,
        })
    }
}
