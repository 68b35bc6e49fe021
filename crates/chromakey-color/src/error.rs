//! Error types for chromakey-color

use thiserror::Error;

/// Errors that can occur during color processing operations
///
/// The keying operations map malformed host input to documented
/// fallbacks; these errors cover strict parsing and conditions that
/// have no sensible fallback.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] chromakey_core::Error),

    /// Unsupported channel count for this operation
    #[error("unsupported channels: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Mode string not in the host vocabulary
    #[error("unknown color pick mode: {0:?}")]
    UnknownMode(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
