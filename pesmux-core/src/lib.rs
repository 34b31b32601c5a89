//! # pesmux Core
//!
//! Core types and utilities for the pesmux PES packet generator.
//!
//! This crate provides the building blocks shared by the other pesmux
//! components:
//! - Error handling types
//! - Rational numbers and time bases for timestamp rescaling
//! - Byte-stream utilities (start codes, emulation prevention, bit reading)
//! - Elementary stream descriptions and media samples

pub mod error;
pub mod bitstream;
pub mod rational;
pub mod sample;
pub mod stream;
pub mod timestamp;

pub use error::{BitstreamError, CodecError, Error, Result};
pub use rational::Rational;
pub use sample::{MediaSample, SampleFlags};
pub use stream::{AudioCodec, StreamInfo, StreamKind, VideoCodec};
pub use timestamp::TimeBase;
