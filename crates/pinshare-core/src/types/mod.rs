//! Core type definitions used across the PinShare workspace.

pub mod content_id;
pub mod file;
pub mod id;

pub use content_id::ContentId;
pub use file::{FileOwner, FileRecord};
pub use id::FileId;
