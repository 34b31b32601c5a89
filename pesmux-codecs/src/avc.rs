//! AVC decoder configuration parsing and NAL-to-byte-stream conversion.
//!
//! MP4-style H.264 samples carry length-prefixed NAL units; MPEG-TS
//! requires the Annex B byte-stream format with start codes. The
//! converter in this module rewrites one sample at a time, prepending
//! the SPS/PPS parameter sets from the decoder configuration record on
//! key frames.

use crate::traits::BytestreamConverter;
use pesmux_core::bitstream::add_emulation_prevention;
use pesmux_core::error::{CodecError, Result};

/// Annex B start code emitted in front of every NAL unit.
pub const START_CODE: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Parsed AVCDecoderConfigurationRecord (ISO 14496-15).
#[derive(Debug, Clone)]
pub struct AvcDecoderConfig {
    /// AVC profile indication.
    pub profile_indication: u8,
    /// Profile compatibility flags.
    pub profile_compatibility: u8,
    /// AVC level indication.
    pub level_indication: u8,
    /// NAL unit length prefix size (1, 2, or 4 bytes).
    pub nalu_length_size: usize,
    /// Sequence parameter sets, as stored (escaped).
    pub sps: Vec<Vec<u8>>,
    /// Picture parameter sets, as stored (escaped).
    pub pps: Vec<Vec<u8>>,
}

impl AvcDecoderConfig {
    /// Parse a decoder configuration record.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 7 {
            return Err(
                CodecError::InvalidDecoderConfig("Record shorter than 7 bytes".into()).into(),
            );
        }
        if data[0] != 1 {
            return Err(CodecError::InvalidDecoderConfig(format!(
                "Unexpected configuration version {}",
                data[0]
            ))
            .into());
        }

        let profile_indication = data[1];
        let profile_compatibility = data[2];
        let level_indication = data[3];
        let nalu_length_size = (data[4] & 0x03) as usize + 1;
        if nalu_length_size == 3 {
            return Err(
                CodecError::InvalidDecoderConfig("NAL length size of 3 is reserved".into()).into(),
            );
        }

        let mut pos = 5;
        let num_sps = (data[pos] & 0x1F) as usize;
        pos += 1;
        let sps = read_parameter_sets(data, &mut pos, num_sps)?;

        if pos >= data.len() {
            return Err(
                CodecError::InvalidDecoderConfig("Missing picture parameter sets".into()).into(),
            );
        }
        let num_pps = data[pos] as usize;
        pos += 1;
        let pps = read_parameter_sets(data, &mut pos, num_pps)?;

        Ok(Self {
            profile_indication,
            profile_compatibility,
            level_indication,
            nalu_length_size,
            sps,
            pps,
        })
    }

    /// Build the Annex B prefix carrying all parameter sets.
    pub fn parameter_set_prefix(&self) -> Vec<u8> {
        let mut prefix = Vec::new();
        for sps in &self.sps {
            prefix.extend_from_slice(&START_CODE);
            prefix.extend_from_slice(sps);
        }
        for pps in &self.pps {
            prefix.extend_from_slice(&START_CODE);
            prefix.extend_from_slice(pps);
        }
        prefix
    }
}

fn read_parameter_sets(data: &[u8], pos: &mut usize, count: usize) -> Result<Vec<Vec<u8>>> {
    let mut sets = Vec::with_capacity(count);
    for _ in 0..count {
        if *pos + 2 > data.len() {
            return Err(
                CodecError::InvalidDecoderConfig("Truncated parameter set length".into()).into(),
            );
        }
        let len = u16::from_be_bytes([data[*pos], data[*pos + 1]]) as usize;
        *pos += 2;
        if *pos + len > data.len() {
            return Err(CodecError::InvalidDecoderConfig(format!(
                "Parameter set of {} bytes overruns record",
                len
            ))
            .into());
        }
        sets.push(data[*pos..*pos + len].to_vec());
        *pos += len;
    }
    Ok(sets)
}

/// Rewrites length-prefixed H.264 samples into Annex B byte-stream form.
pub struct NalByteStreamConverter {
    config: AvcDecoderConfig,
    /// Start-code-prefixed SPS/PPS, prepended on key frames.
    parameter_set_prefix: Vec<u8>,
    /// Insert emulation prevention bytes into NAL payloads.
    escape_data: bool,
}

impl NalByteStreamConverter {
    /// Construct from a decoder configuration record.
    pub fn new(decoder_config: &[u8], escape_data: bool) -> Result<Self> {
        let config = AvcDecoderConfig::parse(decoder_config)?;
        tracing::debug!(
            sps = config.sps.len(),
            pps = config.pps.len(),
            nalu_length_size = config.nalu_length_size,
            "parsed AVC decoder configuration"
        );
        let parameter_set_prefix = config.parameter_set_prefix();
        Ok(Self {
            config,
            parameter_set_prefix,
            escape_data,
        })
    }

    /// NAL unit length prefix size read from the configuration record.
    pub fn nalu_length_size(&self) -> usize {
        self.config.nalu_length_size
    }

    fn read_nalu_length(&self, data: &[u8]) -> usize {
        data[..self.config.nalu_length_size]
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize)
    }
}

impl BytestreamConverter for NalByteStreamConverter {
    fn convert(&self, sample: &[u8], is_key_frame: bool) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(sample.len() + self.parameter_set_prefix.len() + 16);
        if is_key_frame {
            output.extend_from_slice(&self.parameter_set_prefix);
        }

        let mut pos = 0;
        while pos < sample.len() {
            if pos + self.config.nalu_length_size > sample.len() {
                return Err(
                    CodecError::InvalidNalUnit("Truncated NAL length prefix".into()).into(),
                );
            }
            let len = self.read_nalu_length(&sample[pos..]);
            pos += self.config.nalu_length_size;
            if len == 0 || pos + len > sample.len() {
                return Err(CodecError::InvalidNalUnit(format!(
                    "NAL unit of {} bytes overruns sample",
                    len
                ))
                .into());
            }

            output.extend_from_slice(&START_CODE);
            if self.escape_data {
                output.extend_from_slice(&add_emulation_prevention(&sample[pos..pos + len]));
            } else {
                output.extend_from_slice(&sample[pos..pos + len]);
            }
            pos += len;
        }

        Ok(output)
    }
}
