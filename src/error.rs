//! Error types for geocover operations.

use thiserror::Error;

/// Errors returned by codec, covering, and optimization operations.
///
/// All failures are detected synchronously at the point of the invalid
/// input; none of the core operations retry.
#[derive(Error, Debug)]
pub enum GeocoverError {
    /// Geohash precision outside the supported range.
    #[error("Invalid geohash precision {0}: supported range is 1-12")]
    InvalidPrecision(usize),

    /// A code is empty or contains characters outside the geohash alphabet.
    #[error("Invalid geohash '{0}'")]
    InvalidGeohash(String),

    /// `largest_size` exceeds `smallest_size` in optimizer options.
    #[error("Invalid precision range: largest_size ({largest}) must be <= smallest_size ({smallest})")]
    InvalidRange { largest: usize, smallest: usize },

    /// A numeric parameter is outside its documented domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input geometry or coordinates that cannot be processed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for geocover operations.
pub type Result<T> = std::result::Result<T, GeocoverError>;
