//! Convenience result type alias for FrogNote.

use crate::error::AppError;

/// A specialized `Result` type for FrogNote operations.
pub type AppResult<T> = Result<T, AppError>;
