//! # pinshare-share
//!
//! Capability share links. A share link carries everything needed to grant
//! access (content id, display name, optional password gate, optional
//! expiry) in its query string; there is no server-side record and no
//! revocation.
//!
//! - [`codec`] encodes and decodes the query string.
//! - [`verification`] produces and checks password verification material.
//! - [`access`] runs the per-session access state machine and reveals
//!   gateway URLs once access is granted.
//! - [`display`] holds viewer-facing helpers (file kind, expiry label).
//!
//! The password gate is evaluated by whoever opens the link. It keeps
//! casual visitors out but is not a security boundary: the content id is
//! in the URL and the content itself is public on every gateway.

pub mod access;
pub mod codec;
pub mod descriptor;
pub mod display;
pub mod error;
pub mod verification;

pub use access::{AccessEvaluator, AccessState, RevealedContent, ShareSession};
pub use codec::LinkCodec;
pub use descriptor::{ShareDescriptor, ShareRequest};
pub use error::ShareError;
pub use verification::PasswordVerifier;
