//! Chained AES-128-CBC in no-padding mode.
//!
//! SAMPLE-AES encrypts a selection of 16-byte blocks inside each sample
//! as one logical CBC chain: the chain state carries across the clear
//! gaps between encrypted blocks and resets to the IV only at sample
//! boundaries. This module provides that primitive.

use crate::error::{EncryptionError, Result};
use crate::key::{ContentKey, Iv};
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// A chained AES-128-CBC encryptor without padding.
///
/// Data passed to [`encrypt`](Self::encrypt) must be a whole number of
/// 16-byte blocks; the caller selects the block-aligned ranges.
pub struct Aes128Cbc {
    /// AES cipher for block operations.
    cipher: Aes128,
    /// IV the chain resets to.
    iv: [u8; AES_BLOCK_SIZE],
    /// Chain state: the previous ciphertext block.
    prev: [u8; AES_BLOCK_SIZE],
}

impl Aes128Cbc {
    /// Create a new CBC encryptor.
    pub fn new(key: &ContentKey, iv: &Iv) -> Self {
        let cipher = Aes128::new(key.as_bytes().into());
        Self {
            cipher,
            iv: *iv.as_bytes(),
            prev: *iv.as_bytes(),
        }
    }

    /// Rewind the chain to the IV.
    pub fn reset(&mut self) {
        self.prev = self.iv;
    }

    /// Encrypt block-aligned data in place, continuing the chain.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<()> {
        if !data.len().is_multiple_of(AES_BLOCK_SIZE) {
            return Err(EncryptionError::BlockAlignment {
                size: data.len(),
                block_size: AES_BLOCK_SIZE,
            }
            .into());
        }

        for block in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            let mut buf = [0u8; AES_BLOCK_SIZE];
            buf.copy_from_slice(block);
            for (byte, prev_byte) in buf.iter_mut().zip(self.prev.iter()) {
                *byte ^= prev_byte;
            }

            self.cipher.encrypt_block((&mut buf).into());
            block.copy_from_slice(&buf);
            self.prev = buf;
        }

        Ok(())
    }
}
