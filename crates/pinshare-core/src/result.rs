//! Convenience result type alias for PinShare.

use crate::error::AppError;

/// A specialized `Result` type for PinShare operations.
pub type AppResult<T> = Result<T, AppError>;
