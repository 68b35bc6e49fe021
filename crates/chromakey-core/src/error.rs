//! Error types for chromakey-core
//!
//! Construction and geometry errors for the core raster types. The keying
//! operations map the expected ones (such as an oversized crop) to
//! documented fallbacks; the rest only arise from size overflow.

use thiserror::Error;

/// Chromakey core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Batch size of zero
    #[error("invalid batch size: {0}")]
    InvalidBatch(u32),

    /// Channel count of zero
    #[error("invalid channel count: {0}")]
    InvalidChannels(u32),

    /// Sample buffer does not match the declared shape
    #[error("data length {actual} doesn't match shape ({expected} samples)")]
    DataLength { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Border removal would leave no pixels along one axis
    #[error("border {horizontal}x{vertical} too large for {width}x{height} image")]
    BorderTooLarge {
        width: u32,
        height: u32,
        horizontal: u64,
        vertical: u64,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for chromakey core operations
pub type Result<T> = std::result::Result<T, Error>;
