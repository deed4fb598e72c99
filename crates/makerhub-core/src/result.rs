//! Convenience result type alias for MakerHub.

use crate::error::AppError;

/// A specialized `Result` type for MakerHub operations.
pub type AppResult<T> = Result<T, AppError>;
