//! Capability traits for sample pre-processing.
//!
//! The PES generator holds its converters behind these traits so that
//! tests can substitute lightweight fakes for the real codec paths.

use pesmux_core::Result;

/// Converts one encoded video sample into an Annex B byte stream.
pub trait BytestreamConverter {
    /// Convert a length-prefixed sample into start-code-prefixed form.
    fn convert(&self, sample: &[u8], is_key_frame: bool) -> Result<Vec<u8>>;
}

/// Wraps one raw audio frame in its transport framing.
pub trait AdtsFramer {
    /// Emit the framed representation of `frame` (header ‖ frame).
    fn frame(&self, frame: &[u8]) -> Result<Vec<u8>>;
}
