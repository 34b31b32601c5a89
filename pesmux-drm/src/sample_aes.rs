//! HLS SAMPLE-AES pattern encryption.
//!
//! SAMPLE-AES encrypts media at the elementary stream layer, leaving
//! enough of each sample in the clear that parsers can still find
//! frame boundaries:
//!
//! - AAC frames keep a 16-byte clear leader; every whole 16-byte block
//!   after it is encrypted, any sub-block tail stays clear.
//! - H.264 slice NAL units keep a 32-byte clear leader (counted from
//!   the NAL header byte), then follow a 1:9 pattern: one encrypted
//!   block, nine clear blocks, repeating while more than one block
//!   remains. The final 16 bytes of a NAL are never encrypted.
//!
//! All encrypted blocks of one sample form a single CBC chain; the IV
//! is reset per sample, not per block. Because ciphertext can contain
//! start-code-like sequences, each touched H.264 NAL unit is re-escaped
//! after encryption. The pattern is applied to the byte-stream form as
//! is; pre-existing emulation prevention bytes count toward block
//! positions and are escaped again on output.

use crate::cbc::{Aes128Cbc, AES_BLOCK_SIZE};
use crate::error::{EncryptionError, Result};
use crate::key::EncryptionKey;
use pesmux_core::bitstream::{add_emulation_prevention, find_start_code};

/// Clear leader at the start of an AAC frame.
pub const AAC_CLEAR_LEAD: usize = 16;

/// Clear leader of an H.264 NAL unit, counted from the NAL header byte.
pub const H264_CLEAR_LEAD: usize = 32;

/// An encrypt/skip block pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    /// Number of blocks to encrypt.
    pub crypt_blocks: u32,
    /// Number of blocks to skip (leave in clear).
    pub skip_blocks: u32,
}

impl Pattern {
    /// Create a new encryption pattern.
    pub fn new(crypt_blocks: u32, skip_blocks: u32) -> Result<Self> {
        if crypt_blocks == 0 {
            return Err(EncryptionError::InvalidPattern {
                crypt_blocks,
                skip_blocks,
            }
            .into());
        }
        Ok(Self {
            crypt_blocks,
            skip_blocks,
        })
    }

    /// The SAMPLE-AES video pattern (1:9 - encrypt 1 block, skip 9).
    pub fn sample_aes() -> Self {
        Self {
            crypt_blocks: 1,
            skip_blocks: 9,
        }
    }

    /// Bytes encrypted per pattern repetition.
    pub fn crypt_bytes(&self) -> usize {
        self.crypt_blocks as usize * AES_BLOCK_SIZE
    }

    /// Bytes covered by one full pattern repetition.
    pub fn stride_bytes(&self) -> usize {
        (self.crypt_blocks + self.skip_blocks) as usize * AES_BLOCK_SIZE
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::sample_aes()
    }
}

fn is_slice_nal(header: u8) -> bool {
    // VCL slice types 1-5; parameter sets, SEI, and delimiters stay clear.
    (1..=5).contains(&(header & 0x1F))
}

/// SAMPLE-AES sample encryptor.
///
/// One instance serves one elementary stream; it owns the key material
/// for the stream's lifetime.
pub struct SampleAesEncryptor {
    key: EncryptionKey,
    pattern: Pattern,
}

impl SampleAesEncryptor {
    /// Create an encryptor with the SAMPLE-AES 1:9 video pattern.
    pub fn new(key: EncryptionKey) -> Self {
        Self {
            key,
            pattern: Pattern::sample_aes(),
        }
    }

    fn cipher(&self) -> Aes128Cbc {
        Aes128Cbc::new(&self.key.key, &self.key.iv)
    }

    /// Encrypt one framed AAC sample in place.
    ///
    /// The first 16 bytes stay clear; every whole 16-byte block after
    /// them is encrypted as one CBC run; a trailing sub-block stays
    /// clear. Samples of 16 bytes or fewer are left untouched.
    pub fn encrypt_aac_frame(&self, data: &mut [u8]) -> Result<()> {
        if data.len() <= AAC_CLEAR_LEAD {
            return Ok(());
        }
        let encrypted_len = (data.len() - AAC_CLEAR_LEAD) / AES_BLOCK_SIZE * AES_BLOCK_SIZE;
        if encrypted_len == 0 {
            return Ok(());
        }

        let mut cbc = self.cipher();
        cbc.encrypt(&mut data[AAC_CLEAR_LEAD..AAC_CLEAR_LEAD + encrypted_len])
    }

    /// Encrypt one Annex B H.264 sample.
    ///
    /// Returns a new buffer: re-escaping can grow touched NAL units.
    /// NAL units that the pattern does not reach are emitted
    /// byte-identical.
    pub fn encrypt_h264_sample(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(data.len() + data.len() / 64);
        let mut cbc = self.cipher();

        let mut pos = 0;
        while pos < data.len() {
            let Some((offset, start_code_len)) = find_start_code(&data[pos..]) else {
                // No further start code: pass the tail through.
                output.extend_from_slice(&data[pos..]);
                break;
            };

            let nal_start = pos + offset + start_code_len;
            output.extend_from_slice(&data[pos..nal_start]);

            let nal_end = match find_start_code(&data[nal_start..]) {
                Some((next_offset, _)) => nal_start + next_offset,
                None => data.len(),
            };

            self.encrypt_nal(&data[nal_start..nal_end], &mut cbc, &mut output)?;
            pos = nal_end;
        }

        Ok(output)
    }

    fn encrypt_nal(
        &self,
        nal: &[u8],
        cbc: &mut Aes128Cbc,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        let crypt_len = self.pattern.crypt_bytes();

        let eligible = nal
            .first()
            .map(|header| is_slice_nal(*header))
            .unwrap_or(false);
        // Too short for the leader plus one block: nothing to encrypt,
        // and an untouched NAL is emitted without re-escaping.
        if !eligible || nal.len() <= H264_CLEAR_LEAD + crypt_len {
            output.extend_from_slice(nal);
            return Ok(());
        }

        let mut body = nal.to_vec();
        let mut pos = H264_CLEAR_LEAD;
        while pos + crypt_len < body.len() {
            cbc.encrypt(&mut body[pos..pos + crypt_len])?;
            pos += self.pattern.stride_bytes();
        }

        output.extend_from_slice(&add_emulation_prevention(&body));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{ContentKey, Iv};
    use pretty_assertions::assert_eq;

    fn zero_key_encryptor() -> SampleAesEncryptor {
        SampleAesEncryptor::new(EncryptionKey::new(ContentKey::new([0u8; 16]), Iv::zero()))
    }

    #[test]
    fn test_pattern_rejects_zero_crypt_blocks() {
        assert!(Pattern::new(0, 9).is_err());
        assert!(Pattern::new(1, 0).is_ok());
    }

    #[test]
    fn test_pattern_strides() {
        let pattern = Pattern::sample_aes();
        assert_eq!(pattern.crypt_bytes(), 16);
        assert_eq!(pattern.stride_bytes(), 160);
    }

    #[test]
    fn test_aac_short_sample_untouched() {
        let original: Vec<u8> = (0x00..0x1F).collect(); // 31 bytes
        let mut data = original.clone();
        zero_key_encryptor().encrypt_aac_frame(&mut data).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn test_aac_32_byte_sample_encrypts_one_block() {
        let original: Vec<u8> = (0x00..0x20).collect();
        let mut data = original.clone();
        zero_key_encryptor().encrypt_aac_frame(&mut data).unwrap();

        assert_eq!(&data[..16], &original[..16]);
        assert_ne!(&data[16..], &original[16..]);

        // The encrypted block is a plain single-block CBC run.
        let mut expected = original[16..].to_vec();
        Aes128Cbc::new(&ContentKey::new([0u8; 16]), &Iv::zero())
            .encrypt(&mut expected)
            .unwrap();
        assert_eq!(&data[16..], expected.as_slice());
    }

    #[test]
    fn test_aac_50_byte_sample_vector() {
        let mut data: Vec<u8> = (0x07..0x39).collect(); // 50 bytes
        zero_key_encryptor().encrypt_aac_frame(&mut data).unwrap();

        let clear_lead: Vec<u8> = (0x07..0x17).collect();
        assert_eq!(&data[..16], clear_lead.as_slice());
        assert_eq!(
            &data[16..48],
            &[
                0xE3, 0x42, 0x9B, 0x27, 0x33, 0x67, 0x68, 0x08, 0xA5, 0xB3, 0x3E, 0xB1, 0xEE,
                0xFC, 0x9E, 0x0A, 0x8E, 0x0C, 0x73, 0xC5, 0x57, 0xEE, 0x58, 0xC7, 0x48, 0x74,
                0x2A, 0x12, 0x38, 0x4F, 0x4E, 0xAC
            ]
        );
        // Trailing sub-block stays clear.
        assert_eq!(&data[48..], &[0x37, 0x38]);
    }

    #[test]
    fn test_aac_trailing_whole_blocks_are_encrypted() {
        // 48 bytes: leader + two whole blocks, no clear tail.
        let mut data: Vec<u8> = (0x07..0x37).collect();
        zero_key_encryptor().encrypt_aac_frame(&mut data).unwrap();

        assert_eq!(
            &data[16..48],
            &[
                0xE3, 0x42, 0x9B, 0x27, 0x33, 0x67, 0x68, 0x08, 0xA5, 0xB3, 0x3E, 0xB1, 0xEE,
                0xFC, 0x9E, 0x0A, 0x8E, 0x0C, 0x73, 0xC5, 0x57, 0xEE, 0x58, 0xC7, 0x48, 0x74,
                0x2A, 0x12, 0x38, 0x4F, 0x4E, 0xAC
            ]
        );
    }

    #[test]
    fn test_h264_small_nal_untouched() {
        let original = vec![0x00, 0x00, 0x00, 0x01, 0x61, 0xBB, 0xCC, 0xDD];
        let output = zero_key_encryptor()
            .encrypt_h264_sample(&original)
            .unwrap();
        assert_eq!(output, original);
    }

    #[test]
    fn test_h264_non_slice_nal_untouched() {
        // A long SPS must stay clear even though the pattern would reach it.
        let mut sample = vec![0x00, 0x00, 0x00, 0x01, 0x67];
        sample.extend((0u8..100).cycle().take(100));
        let output = zero_key_encryptor().encrypt_h264_sample(&sample).unwrap();
        assert_eq!(output, sample);
    }

    #[test]
    fn test_h264_minimal_encrypted_nal() {
        // Header + 31 clear + one encrypted block + 1 trailing clear byte.
        let mut sample = vec![0x00, 0x00, 0x00, 0x01, 0x61];
        sample.extend(0x00..0x1F); // 31-byte remainder of the clear leader
        sample.extend(0x1F..0x2F); // block that lands on the pattern
        sample.push(0xCF);

        let output = zero_key_encryptor().encrypt_h264_sample(&sample).unwrap();

        assert_eq!(&output[..36], &sample[..36]);
        assert_eq!(
            &output[36..52],
            &[
                0x93, 0x3A, 0x2C, 0x38, 0x86, 0x4B, 0x64, 0xE2, 0x62, 0x7E, 0xCC, 0x75, 0x71,
                0xFB, 0x60, 0x7C
            ]
        );
        assert_eq!(output[52], 0xCF);
    }

    #[test]
    fn test_h264_exactly_one_block_after_leader_stays_clear() {
        // Header + 31 + 16 = 48-byte NAL: the only candidate block is the
        // final 16 bytes, which are never encrypted.
        let mut sample = vec![0x00, 0x00, 0x00, 0x01, 0x61];
        sample.extend(0x04..0x23); // 31 bytes
        sample.extend(0x40..0x50); // 16 bytes
        let output = zero_key_encryptor().encrypt_h264_sample(&sample).unwrap();
        assert_eq!(output, sample);
    }

    #[test]
    fn test_h264_chain_spans_nal_units() {
        // Two identical eligible NAL units: the CBC chain carries over,
        // so their ciphertext blocks must differ.
        let mut nal = vec![0x61];
        nal.extend(std::iter::repeat(0xAB).take(31));
        nal.extend(0x10..0x20);
        nal.push(0x7F);

        let mut sample = Vec::new();
        for _ in 0..2 {
            sample.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
            sample.extend_from_slice(&nal);
        }

        let output = zero_key_encryptor().encrypt_h264_sample(&sample).unwrap();

        // Re-escaping keeps ciphertext free of start codes, so splitting
        // the output at its start codes recovers exactly two NAL bodies.
        let after_first = &output[4..];
        let (second_at, second_sc_len) = find_start_code(after_first).expect("second start code");
        let first_body = &after_first[..second_at];
        let second_body = &after_first[second_at + second_sc_len..];
        assert_ne!(first_body, second_body);
    }

    #[test]
    fn test_h264_reescapes_clear_leader() {
        // A 00 00 03 in the clear leader is escaped again once any block
        // of the NAL is encrypted.
        let mut sample = vec![0x00, 0x00, 0x00, 0x01, 0x61];
        sample.extend_from_slice(&[0x00, 0x00, 0x03, 0x02]);
        sample.extend(0x04..0x1F); // rest of the 31-byte leader remainder
        sample.extend(0x1F..0x2F);
        sample.push(0xCF);

        let output = zero_key_encryptor().encrypt_h264_sample(&sample).unwrap();
        assert_eq!(&output[5..10], &[0x00, 0x00, 0x03, 0x03, 0x02]);
        // One inserted byte shifts everything after the escape site.
        assert_eq!(output.len(), sample.len() + 1);
    }
}
