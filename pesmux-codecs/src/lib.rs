//! # pesmux Codecs
//!
//! Codec-specific sample pre-processing for the pesmux PES packet
//! generator.
//!
//! MPEG-TS expects elementary streams in self-framing form: H.264 as an
//! Annex B byte stream with start codes, AAC as ADTS frames. This crate
//! converts demuxed samples into those forms:
//!
//! - [`NalByteStreamConverter`]: length-prefixed NAL units → Annex B,
//!   with SPS/PPS prepended on key frames and optional emulation
//!   prevention escaping.
//! - [`AdtsFrameBuilder`]: raw AAC frames → ADTS header ‖ frame.
//!
//! Both are exposed through the [`BytestreamConverter`] and
//! [`AdtsFramer`] traits so the generator can be tested against fakes.

pub mod adts;
pub mod avc;
pub mod traits;

pub use adts::{AdtsFrameBuilder, AudioSpecificConfig, ADTS_HEADER_SIZE, MAX_ADTS_FRAME_LENGTH};
pub use avc::{AvcDecoderConfig, NalByteStreamConverter, START_CODE};
pub use traits::{AdtsFramer, BytestreamConverter};
