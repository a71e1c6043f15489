//! # pinshare-core
//!
//! Core crate for PinShare. Contains configuration schemas, the clock and
//! file-record store traits, typed identifiers, the content identifier
//! newtype, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PinShare crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
