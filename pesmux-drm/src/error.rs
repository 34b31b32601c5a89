//! Error types for encryption operations.

use thiserror::Error;

/// Main error type for DRM operations.
#[derive(Error, Debug)]
pub enum DrmError {
    /// Key-related errors.
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// Encryption operation errors.
    #[error("Encryption error: {0}")]
    Encryption(#[from] EncryptionError),
}

/// Key management errors.
#[derive(Error, Debug)]
pub enum KeyError {
    /// Invalid key length (must be 16 bytes for AES-128).
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes.
        expected: usize,
        /// Actual key length provided.
        actual: usize,
    },

    /// Invalid initialization vector length.
    #[error("Invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIvLength {
        /// Expected IV length in bytes.
        expected: usize,
        /// Actual IV length provided.
        actual: usize,
    },

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Invalid base64 encoding.
    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(String),
}

/// Encryption operation errors.
#[derive(Error, Debug)]
pub enum EncryptionError {
    /// Block alignment error.
    #[error("Data not block aligned: {size} bytes is not a multiple of {block_size}")]
    BlockAlignment {
        /// Actual data size in bytes.
        size: usize,
        /// Required block size for alignment.
        block_size: usize,
    },

    /// Pattern encryption configuration error.
    #[error("Invalid pattern: crypt={crypt_blocks}, skip={skip_blocks}")]
    InvalidPattern {
        /// Number of encrypted blocks in the pattern.
        crypt_blocks: u32,
        /// Number of clear blocks in the pattern.
        skip_blocks: u32,
    },
}

/// Result type alias for DRM operations.
pub type Result<T> = std::result::Result<T, DrmError>;
