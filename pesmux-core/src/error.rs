//! Error types shared across the pesmux crates.

use thiserror::Error;

/// Main error type for pesmux core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Codec-level errors (configuration records, NAL units, frames).
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Bitstream parsing errors.
    #[error("Bitstream error: {0}")]
    Bitstream(#[from] BitstreamError),

    /// Invalid parameter provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unsupported feature or format.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Codec errors.
#[derive(Error, Debug)]
pub enum CodecError {
    /// AVC decoder configuration record rejected.
    #[error("Invalid decoder configuration: {0}")]
    InvalidDecoderConfig(String),

    /// AudioSpecificConfig rejected.
    #[error("Invalid audio configuration: {0}")]
    InvalidAudioConfig(String),

    /// Invalid NAL unit.
    #[error("Invalid NAL unit: {0}")]
    InvalidNalUnit(String),

    /// Frame exceeds a container field limit.
    #[error("Frame too large: {size} bytes exceeds maximum {max}")]
    FrameTooLarge {
        /// Actual frame size in bytes.
        size: usize,
        /// Maximum representable size.
        max: usize,
    },
}

/// Bitstream parsing errors.
#[derive(Error, Debug)]
pub enum BitstreamError {
    /// Unexpected end of bitstream.
    #[error("Unexpected end of bitstream")]
    UnexpectedEnd,

    /// Invalid syntax element value.
    #[error("Invalid syntax element: {element} = {value}")]
    InvalidSyntax {
        /// Name of the offending syntax element.
        element: String,
        /// The rejected value.
        value: i64,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid parameter error.
    pub fn invalid_param(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    /// Create an unsupported error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Error::Unsupported(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("time_scale".into());
        assert_eq!(err.to_string(), "Invalid parameter: time_scale");
    }

    #[test]
    fn test_codec_error_conversion() {
        let codec_err = CodecError::InvalidDecoderConfig("bad version".into());
        let err: Error = codec_err.into();
        assert!(matches!(err, Error::Codec(CodecError::InvalidDecoderConfig(_))));
    }

    #[test]
    fn test_frame_too_large_display() {
        let err = CodecError::FrameTooLarge {
            size: 9000,
            max: 8191,
        };
        assert_eq!(
            err.to_string(),
            "Frame too large: 9000 bytes exceeds maximum 8191"
        );
    }
}
