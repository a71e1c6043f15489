//! Per-session access control for opened share links.
//!
//! Every time a link is opened a fresh [`ShareSession`] is created; nothing
//! carries over between sessions. States:
//!
//! ```text
//!   protected ──► Unverified ──(password verifies)──► Verified
//!                     │  ▲                               │
//!                     │  └──(mismatch: IncorrectPassword)│
//!   unprotected ─► Granted                               │
//!                     │                                  │
//!                     └──────(expiry passes)──► Expired ◄┘
//! ```
//!
//! `Expired` is terminal. There is no lockout and no rate limit: the gate
//! runs wherever the link is opened and only keeps honest visitors out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use pinshare_core::traits::clock::Clock;
use pinshare_gateway::resolver::{GatewayResolver, ResolvedUrls};

use crate::codec::LinkCodec;
use crate::descriptor::ShareDescriptor;
use crate::display::{FileKind, expiry_label};
use crate::error::ShareError;
use crate::verification::PasswordVerifier;

/// Where a viewing session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// Password required and not yet supplied.
    Unverified,
    /// Password verified during this session.
    Verified,
    /// The link has lapsed. Terminal.
    Expired,
    /// Unprotected link, access granted on open.
    Granted,
}

impl AccessState {
    /// Whether gateway URLs may be shown in this state.
    pub fn allows_reveal(self) -> bool {
        matches!(self, Self::Verified | Self::Granted)
    }
}

/// One recipient's view of one share link.
#[derive(Debug, Clone)]
pub struct ShareSession {
    descriptor: ShareDescriptor,
    state: AccessState,
}

impl ShareSession {
    /// Current state.
    pub fn state(&self) -> AccessState {
        self.state
    }

    /// The decoded descriptor.
    pub fn descriptor(&self) -> &ShareDescriptor {
        &self.descriptor
    }

    /// Coarse kind of the shared file.
    pub fn file_kind(&self) -> FileKind {
        FileKind::from_name(&self.descriptor.display_name)
    }

    /// Expiry label relative to `now`, if the link expires.
    pub fn expiry_label(&self, now: DateTime<Utc>) -> Option<String> {
        self.descriptor.expires_at.map(|at| expiry_label(at, now))
    }
}

/// Content revealed to a session that passed the gate.
#[derive(Debug, Clone, Serialize)]
pub struct RevealedContent {
    /// Content id.
    pub content_id: String,
    /// File name.
    pub display_name: String,
    /// Gateway URLs.
    pub urls: ResolvedUrls,
}

/// Opens share links and drives their sessions.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    verifier: PasswordVerifier,
    resolver: Arc<GatewayResolver>,
    clock: Arc<dyn Clock>,
}

impl AccessEvaluator {
    /// Creates an evaluator.
    pub fn new(
        verifier: PasswordVerifier,
        resolver: Arc<GatewayResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verifier,
            resolver,
            clock,
        }
    }

    /// Current instant according to the evaluator's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Decodes `url` and opens a session on it.
    ///
    /// `Ok(None)` means the URL is not a share link.
    pub fn open_url(&self, url: &str) -> Result<Option<ShareSession>, ShareError> {
        let descriptor = LinkCodec::decode(url, self.clock.now())?;
        Ok(descriptor.map(|d| self.open(d)))
    }

    /// Opens a session on an already decoded descriptor.
    pub fn open(&self, descriptor: ShareDescriptor) -> ShareSession {
        let state = if descriptor.is_expired_at(self.clock.now()) {
            AccessState::Expired
        } else if descriptor.is_protected {
            AccessState::Unverified
        } else {
            AccessState::Granted
        };

        debug!(content_id = %descriptor.content_id, ?state, "Share session opened");
        ShareSession { descriptor, state }
    }

    /// Re-evaluates expiry. Moves the session to `Expired` if the link has
    /// lapsed since it was opened.
    pub fn refresh(&self, session: &mut ShareSession) -> AccessState {
        if session.state != AccessState::Expired
            && session.descriptor.is_expired_at(self.clock.now())
        {
            info!(content_id = %session.descriptor.content_id, "Share link expired during session");
            session.state = AccessState::Expired;
        }
        session.state
    }

    /// Submits a password attempt.
    ///
    /// A mismatch leaves the session `Unverified` and returns
    /// [`ShareError::IncorrectPassword`]; the caller may retry freely.
    /// Sessions that are already granted or verified are unaffected.
    pub fn submit_password(
        &self,
        session: &mut ShareSession,
        input: &str,
    ) -> Result<AccessState, ShareError> {
        match self.refresh(session) {
            AccessState::Expired => Err(ShareError::ExpiredLink),
            AccessState::Verified | AccessState::Granted => Ok(session.state),
            AccessState::Unverified => {
                let material = session
                    .descriptor
                    .verification_material
                    .as_deref()
                    .ok_or_else(|| ShareError::invalid_link("protected without material"))?;

                if self.verifier.verify(input, material)? {
                    info!(content_id = %session.descriptor.content_id, "Share password verified");
                    session.state = AccessState::Verified;
                    Ok(session.state)
                } else {
                    debug!(content_id = %session.descriptor.content_id, "Share password mismatch");
                    Err(ShareError::IncorrectPassword)
                }
            }
        }
    }

    /// Resolves gateway URLs for a session that passed the gate.
    pub fn reveal(&self, session: &mut ShareSession) -> Result<RevealedContent, ShareError> {
        match self.refresh(session) {
            AccessState::Expired => Err(ShareError::ExpiredLink),
            AccessState::Unverified => Err(ShareError::AccessDenied),
            AccessState::Verified | AccessState::Granted => {
                let d = &session.descriptor;
                let urls = self.resolver.resolve(&d.content_id, Some(&d.display_name));
                if urls.substituted {
                    let error = ShareError::MalformedContentId(d.content_id.clone());
                    warn!(%error, "Share link revealed with placeholder content");
                }
                Ok(RevealedContent {
                    content_id: d.content_id.clone(),
                    display_name: d.display_name.clone(),
                    urls,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pinshare_core::config::gateway::GatewayConfig;
    use pinshare_core::config::share::VerificationSchemeKind;
    use pinshare_core::traits::clock::ManualClock;

    const CID: &str = "QmTestContentIdentifier";

    fn evaluator(clock: Arc<ManualClock>) -> AccessEvaluator {
        let resolver = GatewayResolver::new(&GatewayConfig::default()).expect("resolver");
        AccessEvaluator::new(
            PasswordVerifier::new(VerificationSchemeKind::Legacy),
            Arc::new(resolver),
            clock,
        )
    }

    #[test]
    fn test_unprotected_is_granted() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let eval = evaluator(clock);
        let mut session = eval.open(ShareDescriptor::new(CID, "a.png"));
        assert_eq!(session.state(), AccessState::Granted);
        let revealed = eval.reveal(&mut session).expect("granted");
        assert_eq!(revealed.urls.alternates.len(), 4);
    }

    #[test]
    fn test_malformed_content_id_reveals_placeholder() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let eval = evaluator(clock);
        let mut session = eval.open(ShareDescriptor::new("short", "a.png"));
        let revealed = eval.reveal(&mut session).expect("granted");
        assert!(revealed.urls.substituted);
        assert_eq!(revealed.content_id, "short");
        assert!(!revealed.urls.preferred.contains("short"));
    }

    #[test]
    fn test_unverified_cannot_reveal() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let eval = evaluator(clock);
        let mut session = eval.open(ShareDescriptor::new(CID, "a.png").protected("c2VjcmV0MQ=="));
        assert_eq!(eval.reveal(&mut session).expect_err("gated"), ShareError::AccessDenied);
    }

    #[test]
    fn test_wrong_then_right_password() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let eval = evaluator(clock);
        let mut session = eval.open(ShareDescriptor::new(CID, "a.png").protected("c2VjcmV0MQ=="));

        for _ in 0..3 {
            assert_eq!(
                eval.submit_password(&mut session, "wrong"),
                Err(ShareError::IncorrectPassword)
            );
            assert_eq!(session.state(), AccessState::Unverified);
        }

        assert_eq!(
            eval.submit_password(&mut session, "secret1"),
            Ok(AccessState::Verified)
        );
        assert!(eval.reveal(&mut session).is_ok());
    }

    #[test]
    fn test_expiry_during_session_is_terminal() {
        let now = Utc::now();
        let clock = Arc::new(ManualClock::new(now));
        let eval = evaluator(Arc::clone(&clock));
        let d = ShareDescriptor::new(CID, "a.png")
            .protected("c2VjcmV0MQ==")
            .expiring_at(now + Duration::hours(1));
        let mut session = eval.open(d);
        assert_eq!(
            eval.submit_password(&mut session, "secret1"),
            Ok(AccessState::Verified)
        );

        clock.advance(Duration::hours(2));
        assert_eq!(eval.reveal(&mut session).expect_err("expired"), ShareError::ExpiredLink);
        assert_eq!(
            eval.submit_password(&mut session, "secret1"),
            Err(ShareError::ExpiredLink)
        );
        assert_eq!(session.state(), AccessState::Expired);
    }

    #[test]
    fn test_manually_built_past_descriptor_opens_expired() {
        let now = Utc::now();
        let clock = Arc::new(ManualClock::new(now));
        let eval = evaluator(clock);
        let session = eval.open(
            ShareDescriptor::new(CID, "a.png").expiring_at(now - Duration::seconds(1)),
        );
        assert_eq!(session.state(), AccessState::Expired);
    }

    #[test]
    fn test_open_url_not_a_share_link() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let eval = evaluator(clock);
        assert!(eval.open_url("https://files.example/").expect("ok").is_none());
    }
}
