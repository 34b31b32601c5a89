//! AudioSpecificConfig parsing and ADTS framing.
//!
//! Raw AAC access units carry no self-describing framing; MPEG-TS
//! carries them as ADTS frames. The builder in this module parses the
//! stream's AudioSpecificConfig once and then synthesizes a 7-byte ADTS
//! header for every frame.

use crate::traits::AdtsFramer;
use pesmux_core::bitstream::BitReader;
use pesmux_core::error::{CodecError, Result};

/// ADTS header size without CRC.
pub const ADTS_HEADER_SIZE: usize = 7;

/// Maximum value of the 13-bit ADTS frame_length field.
pub const MAX_ADTS_FRAME_LENGTH: usize = (1 << 13) - 1;

/// Sampling frequencies by index (ISO 14496-3 table 1.18).
const SAMPLING_FREQUENCIES: [u32; 13] = [
    96000, 88200, 64000, 48000, 44100, 32000, 24000, 22050, 16000, 12000, 11025, 8000, 7350,
];

/// Parsed AudioSpecificConfig (ISO 14496-3).
#[derive(Debug, Clone)]
pub struct AudioSpecificConfig {
    /// Audio object type (2 = AAC-LC).
    pub audio_object_type: u8,
    /// Sampling frequency index; 0x0F means an explicit frequency follows.
    pub sampling_frequency_index: u8,
    /// Sampling frequency in Hz.
    pub sampling_frequency: u32,
    /// Channel configuration (0-7).
    pub channel_config: u8,
}

impl AudioSpecificConfig {
    /// Parse the leading fields of an AudioSpecificConfig.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(
                CodecError::InvalidAudioConfig("AudioSpecificConfig shorter than 2 bytes".into())
                    .into(),
            );
        }

        let mut reader = BitReader::new(data);
        let mut audio_object_type = reader.read_bits(5)? as u8;
        if audio_object_type == 31 {
            audio_object_type = 32 + reader.read_bits(6)? as u8;
        }

        let sampling_frequency_index = reader.read_bits(4)? as u8;
        let sampling_frequency = match sampling_frequency_index {
            0x0F => reader.read_bits(24)?,
            idx if (idx as usize) < SAMPLING_FREQUENCIES.len() => {
                SAMPLING_FREQUENCIES[idx as usize]
            }
            idx => {
                return Err(CodecError::InvalidAudioConfig(format!(
                    "Reserved sampling frequency index {}",
                    idx
                ))
                .into())
            }
        };

        let channel_config = reader.read_bits(4)? as u8;
        if channel_config > 7 {
            return Err(CodecError::InvalidAudioConfig(format!(
                "Invalid channel configuration {}",
                channel_config
            ))
            .into());
        }

        Ok(Self {
            audio_object_type,
            sampling_frequency_index,
            sampling_frequency,
            channel_config,
        })
    }
}

/// Synthesizes ADTS frames from raw AAC access units.
pub struct AdtsFrameBuilder {
    /// ADTS profile field (audio object type minus one).
    profile: u8,
    sampling_frequency_index: u8,
    channel_config: u8,
}

impl AdtsFrameBuilder {
    /// Construct from a parsed AudioSpecificConfig.
    ///
    /// ADTS can only express object types 1-4 and indexed sampling
    /// frequencies; anything else is rejected here rather than on every
    /// frame.
    pub fn new(config: &AudioSpecificConfig) -> Result<Self> {
        if !(1..=4).contains(&config.audio_object_type) {
            return Err(CodecError::InvalidAudioConfig(format!(
                "Audio object type {} cannot be carried in ADTS",
                config.audio_object_type
            ))
            .into());
        }
        if config.sampling_frequency_index == 0x0F {
            return Err(CodecError::InvalidAudioConfig(
                "Explicit sampling frequency cannot be carried in ADTS".into(),
            )
            .into());
        }

        Ok(Self {
            profile: config.audio_object_type - 1,
            sampling_frequency_index: config.sampling_frequency_index,
            channel_config: config.channel_config,
        })
    }

    /// Parse the configuration and construct in one step.
    pub fn from_audio_specific_config(data: &[u8]) -> Result<Self> {
        let config = AudioSpecificConfig::parse(data)?;
        Self::new(&config)
    }

    fn header(&self, frame_size: usize) -> Result<[u8; ADTS_HEADER_SIZE]> {
        let frame_length = ADTS_HEADER_SIZE + frame_size;
        if frame_length > MAX_ADTS_FRAME_LENGTH {
            return Err(CodecError::FrameTooLarge {
                size: frame_length,
                max: MAX_ADTS_FRAME_LENGTH,
            }
            .into());
        }

        let mut header = [0u8; ADTS_HEADER_SIZE];
        // Syncword (12 bits), MPEG-4, layer 0, no CRC.
        header[0] = 0xFF;
        header[1] = 0xF1;
        header[2] = ((self.profile & 0x03) << 6)
            | ((self.sampling_frequency_index & 0x0F) << 2)
            | ((self.channel_config >> 2) & 0x01);
        header[3] = ((self.channel_config & 0x03) << 6) | ((frame_length >> 11) & 0x03) as u8;
        header[4] = ((frame_length >> 3) & 0xFF) as u8;
        // Buffer fullness 0x7FF signals a variable bit rate stream.
        header[5] = (((frame_length & 0x07) << 5) | 0x1F) as u8;
        header[6] = 0xFC;
        Ok(header)
    }
}

impl AdtsFramer for AdtsFrameBuilder {
    fn frame(&self, frame: &[u8]) -> Result<Vec<u8>> {
        let header = self.header(frame.len())?;
        let mut framed = Vec::with_capacity(ADTS_HEADER_SIZE + frame.len());
        framed.extend_from_slice(&header);
        framed.extend_from_slice(frame);
        Ok(framed)
    }
}
