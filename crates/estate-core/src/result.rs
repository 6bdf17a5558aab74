//! Result type aliases for the estate listings service.

use crate::EstateError;

/// A specialized `Result` type for estate operations.
pub type EstateResult<T> = Result<T, EstateError>;
