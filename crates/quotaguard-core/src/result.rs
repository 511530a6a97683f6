//! Convenience result type alias for Quotaguard.

use crate::error::AppError;

/// A specialized `Result` type for Quotaguard operations.
///
/// Every collaborator trait and repository returns this so that crates do
/// not need to spell out `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;
