//! # pesmux TS
//!
//! PES packet generation for MPEG-TS muxing.
//!
//! This crate turns demuxed media samples from one elementary stream
//! into [`PesPacket`]s ready for a TS packetizer:
//!
//! - H.264 samples are rewritten from length-prefixed NAL units to the
//!   Annex B byte stream, with SPS/PPS prepended on key frames
//! - AAC frames get ADTS headers
//! - timestamps are rescaled from the stream's time scale to 90 kHz
//! - with an encryption key set, samples are protected with HLS
//!   SAMPLE-AES
//!
//! ## Example
//!
//! ```no_run
//! use pesmux_core::{MediaSample, StreamInfo, AudioCodec};
//! use pesmux_ts::PesPacketGenerator;
//!
//! let stream_info = StreamInfo::audio(AudioCodec::Aac, 44100, 44100, 2, vec![0x12, 0x10]);
//!
//! let mut generator = PesPacketGenerator::new();
//! generator.initialize(&stream_info).unwrap();
//!
//! let sample = MediaSample::new(vec![0u8; 128]).with_timestamps(1024, 1024);
//! generator.push_sample(&sample).unwrap();
//!
//! while let Some(packet) = generator.next_pes_packet() {
//!     println!("PES: stream {:#04x}, {} bytes", packet.stream_id(), packet.data().len());
//! }
//! generator.flush().unwrap();
//! ```

pub mod error;
pub mod generator;
pub mod pes;

pub use error::{Result, TsError};
pub use generator::PesPacketGenerator;
pub use pes::{
    is_audio_stream_id, is_video_stream_id, PesPacket, AUDIO_STREAM_ID, VIDEO_STREAM_ID,
};
