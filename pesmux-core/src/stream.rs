//! Elementary stream descriptions.
//!
//! A [`StreamInfo`] describes one elementary stream as reported by the
//! demuxer: what kind of stream it is, which codec, the time scale its
//! timestamps use, and the codec-private configuration data.

use std::fmt;

/// Video codec type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum VideoCodec {
    /// H.264 / AVC.
    H264,
    /// H.265 / HEVC.
    H265,
    /// VP9.
    Vp9,
    /// AV1.
    Av1,
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H264 => write!(f, "H.264/AVC"),
            Self::H265 => write!(f, "H.265/HEVC"),
            Self::Vp9 => write!(f, "VP9"),
            Self::Av1 => write!(f, "AV1"),
        }
    }
}

/// Audio codec type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AudioCodec {
    /// AAC (Advanced Audio Coding).
    Aac,
    /// MP3 (MPEG Layer 3).
    Mp3,
    /// Opus.
    Opus,
    /// AC-3 (Dolby Digital).
    Ac3,
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aac => write!(f, "AAC"),
            Self::Mp3 => write!(f, "MP3"),
            Self::Opus => write!(f, "Opus"),
            Self::Ac3 => write!(f, "AC-3"),
        }
    }
}

/// The kind of an elementary stream, with kind-specific parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamKind {
    /// A video stream.
    Video {
        /// Video codec.
        codec: VideoCodec,
        /// Coded width in pixels.
        width: u32,
        /// Coded height in pixels.
        height: u32,
        /// NAL unit length prefix size (1, 2, or 4 bytes).
        nalu_length_size: u8,
    },
    /// An audio stream.
    Audio {
        /// Audio codec.
        codec: AudioCodec,
        /// Sampling rate in Hz.
        sample_rate: u32,
        /// Channel count.
        channels: u8,
    },
    /// A text / subtitle stream.
    Text,
}

/// Description of one elementary stream.
///
/// Produced by the demuxer and read once at generator initialization;
/// the generator copies what it needs and does not hold on to it.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    /// Ticks per second used by this stream's PTS/DTS values.
    pub time_scale: u32,
    /// Stream kind and codec.
    pub kind: StreamKind,
    /// Codec-private configuration data: the AVCDecoderConfigurationRecord
    /// for H.264, the AudioSpecificConfig for AAC.
    pub codec_private: Vec<u8>,
}

impl StreamInfo {
    /// Create a video stream description.
    pub fn video(
        codec: VideoCodec,
        time_scale: u32,
        width: u32,
        height: u32,
        nalu_length_size: u8,
        codec_private: Vec<u8>,
    ) -> Self {
        Self {
            time_scale,
            kind: StreamKind::Video {
                codec,
                width,
                height,
                nalu_length_size,
            },
            codec_private,
        }
    }

    /// Create an audio stream description.
    pub fn audio(
        codec: AudioCodec,
        time_scale: u32,
        sample_rate: u32,
        channels: u8,
        codec_private: Vec<u8>,
    ) -> Self {
        Self {
            time_scale,
            kind: StreamKind::Audio {
                codec,
                sample_rate,
                channels,
            },
            codec_private,
        }
    }

    /// Create a text stream description.
    pub fn text(time_scale: u32) -> Self {
        Self {
            time_scale,
            kind: StreamKind::Text,
            codec_private: Vec::new(),
        }
    }

    /// Check if this is a video stream.
    pub fn is_video(&self) -> bool {
        matches!(self.kind, StreamKind::Video { .. })
    }

    /// Check if this is an audio stream.
    pub fn is_audio(&self) -> bool {
        matches!(self.kind, StreamKind::Audio { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_stream_info() {
        let info = StreamInfo::video(VideoCodec::H264, 90000, 1280, 720, 4, vec![0x01]);
        assert!(info.is_video());
        assert!(!info.is_audio());
        assert_eq!(info.time_scale, 90000);
        match info.kind {
            StreamKind::Video { codec, nalu_length_size, .. } => {
                assert_eq!(codec, VideoCodec::H264);
                assert_eq!(nalu_length_size, 4);
            }
            _ => panic!("expected video kind"),
        }
    }

    #[test]
    fn test_audio_stream_info() {
        let info = StreamInfo::audio(AudioCodec::Aac, 44100, 44100, 2, vec![0x12, 0x10]);
        assert!(info.is_audio());
        assert_eq!(info.codec_private, vec![0x12, 0x10]);
    }

    #[test]
    fn test_text_stream_info() {
        let info = StreamInfo::text(1000);
        assert!(!info.is_video());
        assert!(!info.is_audio());
    }

    #[test]
    fn test_codec_display() {
        assert_eq!(VideoCodec::H264.to_string(), "H.264/AVC");
        assert_eq!(AudioCodec::Aac.to_string(), "AAC");
    }
}
