//! # pinshare-pinning
//!
//! The upload side of PinShare: a client for the pinning service, an
//! in-process [`FileRecordStore`](pinshare_core::traits::FileRecordStore)
//! implementation, and the upload service tying them together.

pub mod client;
pub mod error;
pub mod store;
pub mod upload;

pub use client::{PinnedFile, PinningClient};
pub use error::PinningError;
pub use store::MemoryFileStore;
pub use upload::UploadService;
