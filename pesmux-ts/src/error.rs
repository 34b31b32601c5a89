//! Error types for PES packet generation.

use pesmux_drm::DrmError;
use thiserror::Error;

/// Main error type for PES generation.
#[derive(Error, Debug)]
pub enum TsError {
    /// The stream's kind/codec combination is not supported.
    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Operation requires an initialized generator.
    #[error("Generator not initialized")]
    NotInitialized,

    /// The generator was already initialized.
    #[error("Generator already initialized")]
    AlreadyInitialized,

    /// Operation arrived after the stream was flushed.
    #[error("Generator closed by flush")]
    Closed,

    /// Codec-level conversion failed for this sample.
    #[error("Sample conversion failed: {0}")]
    Conversion(#[from] pesmux_core::Error),

    /// Sample encryption failed.
    #[error("Sample encryption failed: {0}")]
    Encryption(#[from] DrmError),
}

/// Result type alias for PES generation.
pub type Result<T> = std::result::Result<T, TsError>;
