//! PES packet generation from demuxed media samples.
//!
//! [`PesPacketGenerator`] is the seam between the demuxer and the TS
//! packetizer: it takes one elementary stream's samples, converts them
//! into their MPEG-TS carriage form (Annex B for H.264, ADTS for AAC),
//! optionally applies SAMPLE-AES encryption, rescales timestamps to the
//! 90 kHz TS clock, and queues finished [`PesPacket`]s for the caller
//! to drain.

use std::collections::VecDeque;

use pesmux_codecs::{AdtsFrameBuilder, AdtsFramer, BytestreamConverter, NalByteStreamConverter};
use pesmux_core::{AudioCodec, MediaSample, StreamInfo, StreamKind, TimeBase, VideoCodec};
use pesmux_drm::{EncryptionKey, SampleAesEncryptor};

use crate::error::{Result, TsError};
use crate::pes::{PesPacket, AUDIO_STREAM_ID, VIDEO_STREAM_ID};

/// Generator lifecycle.
///
/// Uninitialized accepts only `initialize`; Ready accepts everything;
/// Closed (after `flush`) still drains the queue but rejects pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Ready,
    Closed,
}

/// The codec-specific conversion stage, behind the capability traits so
/// tests can substitute fakes.
enum Pipeline {
    H264(Box<dyn BytestreamConverter>),
    Aac(Box<dyn AdtsFramer>),
}

/// Converts media samples into PES packets for one elementary stream.
///
/// Single-threaded by contract: the generator is neither synchronized
/// nor reentrant. Packets leave [`next_pes_packet`](Self::next_pes_packet)
/// in the order their samples were pushed.
pub struct PesPacketGenerator {
    state: State,
    pipeline: Option<Pipeline>,
    stream_id: u8,
    /// Time base of the incoming sample timestamps.
    time_base: TimeBase,
    encryptor: Option<SampleAesEncryptor>,
    ready: VecDeque<PesPacket>,
}

impl PesPacketGenerator {
    /// Create an uninitialized generator.
    pub fn new() -> Self {
        Self {
            state: State::Uninitialized,
            pipeline: None,
            stream_id: 0,
            time_base: TimeBase::MPEG,
            encryptor: None,
            ready: VecDeque::new(),
        }
    }

    /// Initialize for one elementary stream. Must be called exactly once.
    ///
    /// Only H.264 video and AAC audio are supported; for anything else
    /// the generator stays unusable.
    pub fn initialize(&mut self, stream_info: &StreamInfo) -> Result<()> {
        if self.state != State::Uninitialized {
            return Err(TsError::AlreadyInitialized);
        }
        if stream_info.time_scale == 0 {
            return Err(pesmux_core::Error::invalid_param("time_scale must be non-zero").into());
        }

        match &stream_info.kind {
            StreamKind::Video {
                codec: VideoCodec::H264,
                ..
            } => {
                let converter = NalByteStreamConverter::new(&stream_info.codec_private, true)?;
                self.pipeline = Some(Pipeline::H264(Box::new(converter)));
                self.stream_id = VIDEO_STREAM_ID;
            }
            StreamKind::Video { codec, .. } => {
                return Err(TsError::UnsupportedCodec(codec.to_string()));
            }
            StreamKind::Audio {
                codec: AudioCodec::Aac,
                ..
            } => {
                let framer =
                    AdtsFrameBuilder::from_audio_specific_config(&stream_info.codec_private)?;
                self.pipeline = Some(Pipeline::Aac(Box::new(framer)));
                self.stream_id = AUDIO_STREAM_ID;
            }
            StreamKind::Audio { codec, .. } => {
                return Err(TsError::UnsupportedCodec(codec.to_string()));
            }
            StreamKind::Text => {
                return Err(TsError::UnsupportedCodec("text".into()));
            }
        }

        self.time_base = TimeBase::hz(stream_info.time_scale);
        self.state = State::Ready;
        tracing::debug!(
            stream_id = self.stream_id,
            time_scale = stream_info.time_scale,
            "PES generator initialized"
        );
        Ok(())
    }

    /// Enable SAMPLE-AES encryption for all subsequent samples.
    ///
    /// Takes ownership of the key material for the generator's lifetime.
    pub fn set_encryption_key(&mut self, key: EncryptionKey) -> Result<()> {
        match self.state {
            State::Uninitialized => Err(TsError::NotInitialized),
            State::Closed => Err(TsError::Closed),
            State::Ready => {
                self.encryptor = Some(SampleAesEncryptor::new(key));
                Ok(())
            }
        }
    }

    /// Convert one sample and append the resulting packet to the queue.
    ///
    /// A failure in any sub-step drops this sample only: the queue is
    /// unchanged and the generator stays Ready for the next sample.
    pub fn push_sample(&mut self, sample: &MediaSample<'_>) -> Result<()> {
        match self.state {
            State::Uninitialized => return Err(TsError::NotInitialized),
            State::Closed => return Err(TsError::Closed),
            State::Ready => {}
        }

        let payload = match self.convert_sample(sample) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "dropping sample");
                return Err(err);
            }
        };

        let pts = self.time_base.convert(sample.pts, TimeBase::MPEG);
        let dts = self.time_base.convert(sample.dts, TimeBase::MPEG);
        self.ready
            .push_back(PesPacket::new(self.stream_id, pts, dts, payload));
        Ok(())
    }

    fn convert_sample(&self, sample: &MediaSample<'_>) -> Result<Vec<u8>> {
        let pipeline = self.pipeline.as_ref().ok_or(TsError::NotInitialized)?;
        match pipeline {
            Pipeline::H264(converter) => {
                let converted = converter.convert(sample.data(), sample.is_key_frame())?;
                match &self.encryptor {
                    Some(encryptor) => Ok(encryptor.encrypt_h264_sample(&converted)?),
                    None => Ok(converted),
                }
            }
            Pipeline::Aac(framer) => {
                let mut framed = framer.frame(sample.data())?;
                if let Some(encryptor) = &self.encryptor {
                    encryptor.encrypt_aac_frame(&mut framed)?;
                }
                Ok(framed)
            }
        }
    }

    /// Number of packets waiting to be dequeued.
    pub fn num_ready_packets(&self) -> usize {
        self.ready.len()
    }

    /// Dequeue the oldest finished packet, transferring ownership out.
    pub fn next_pes_packet(&mut self) -> Option<PesPacket> {
        self.ready.pop_front()
    }

    /// Signal end of stream.
    ///
    /// No additional packets are emitted (nothing is buffered per
    /// frame); the queue remains drainable. Further pushes are rejected.
    pub fn flush(&mut self) -> Result<()> {
        match self.state {
            State::Uninitialized => Err(TsError::NotInitialized),
            State::Ready | State::Closed => {
                self.state = State::Closed;
                Ok(())
            }
        }
    }
}

impl Default for PesPacketGenerator {
    fn default() -> Self {
        Self::new()
    }
}
