//! Convenience result type alias for the reading room.

use crate::error::AppError;

/// A specialized `Result` type for reading room operations.
pub type AppResult<T> = Result<T, AppError>;
