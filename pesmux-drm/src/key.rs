//! Key and IV handling for sample encryption.
//!
//! # Security
//!
//! All key material is zeroized on drop to prevent sensitive data from
//! remaining in memory after use.

use crate::error::{KeyError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of an AES-128 key in bytes.
pub const AES_128_KEY_SIZE: usize = 16;

/// Size of an initialization vector in bytes.
pub const IV_SIZE: usize = 16;

fn parse_hex<const N: usize>(hex: &str) -> Result<[u8; N]> {
    let hex = hex.replace(['-', ' '], "");
    if hex.len() != N * 2 {
        return Err(KeyError::InvalidHex(format!(
            "Expected {} hex characters, got {}",
            N * 2,
            hex.len()
        ))
        .into());
    }

    let mut bytes = [0u8; N];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let hex_str = std::str::from_utf8(chunk)
            .map_err(|_| KeyError::InvalidHex("Invalid hex string".into()))?;
        bytes[i] = u8::from_str_radix(hex_str, 16)
            .map_err(|_| KeyError::InvalidHex("Invalid hex character".into()))?;
    }
    Ok(bytes)
}

/// Content encryption key for SAMPLE-AES.
///
/// # Security
///
/// The key material is automatically zeroized when the struct is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey {
    /// Raw key bytes (16 bytes for AES-128).
    key: [u8; AES_128_KEY_SIZE],
}

impl ContentKey {
    /// Create a new content key from raw bytes.
    pub fn new(key: [u8; AES_128_KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Create a content key from a byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let key: [u8; AES_128_KEY_SIZE] =
            slice.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: AES_128_KEY_SIZE,
                actual: slice.len(),
            })?;
        Ok(Self { key })
    }

    /// Create a content key from a hex-encoded string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self {
            key: parse_hex::<AES_128_KEY_SIZE>(hex)?,
        })
    }

    /// Create a content key from a base64-encoded string.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        match BASE64.decode(encoded) {
            Ok(decoded) => Self::from_slice(&decoded),
            Err(err) => Err(KeyError::InvalidBase64(err.to_string()).into()),
        }
    }

    /// Generate a random content key.
    pub fn generate() -> Self {
        let mut key = Self {
            key: [0u8; AES_128_KEY_SIZE],
        };
        rand::thread_rng().fill_bytes(&mut key.key);
        key
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; AES_128_KEY_SIZE] {
        &self.key
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact key value for security
        write!(f, "ContentKey([REDACTED])")
    }
}

/// Initialization vector for encryption.
///
/// # Security
///
/// The IV bytes are automatically zeroized when the struct is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Iv {
    /// IV bytes (16 bytes).
    bytes: [u8; IV_SIZE],
}

impl Iv {
    /// Create an IV from raw bytes.
    pub fn new(bytes: [u8; IV_SIZE]) -> Self {
        Self { bytes }
    }

    /// Create an IV from a byte slice.
    ///
    /// A slice shorter than 16 bytes is zero-padded on the right.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() > IV_SIZE {
            return Err(KeyError::InvalidIvLength {
                expected: IV_SIZE,
                actual: slice.len(),
            }
            .into());
        }

        let mut iv = Self::zero();
        iv.bytes[..slice.len()].copy_from_slice(slice);
        Ok(iv)
    }

    /// Create an IV from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Ok(Self {
            bytes: parse_hex::<IV_SIZE>(hex)?,
        })
    }

    /// Generate a random IV.
    pub fn generate() -> Self {
        let mut iv = Self::zero();
        rand::thread_rng().fill_bytes(&mut iv.bytes);
        iv
    }

    /// Create a zero IV.
    pub fn zero() -> Self {
        Self {
            bytes: [0u8; IV_SIZE],
        }
    }

    /// Get the raw IV bytes.
    pub fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.bytes
    }

    /// Format as hexadecimal.
    pub fn to_hex(&self) -> String {
        let mut hex = String::with_capacity(IV_SIZE * 2);
        for byte in &self.bytes {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({})", self.to_hex())
    }
}

/// A content key and IV pair for one elementary stream.
///
/// Handed to the PES generator, which takes ownership for its lifetime.
///
/// # Security
///
/// The key material is automatically zeroized when the struct is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    /// Content encryption key.
    pub key: ContentKey,
    /// Initialization vector.
    pub iv: Iv,
}

impl EncryptionKey {
    /// Create a new encryption key pair.
    pub fn new(key: ContentKey, iv: Iv) -> Self {
        Self { key, iv }
    }

    /// Create from hex-encoded key and IV strings.
    pub fn from_hex(key: &str, iv: &str) -> Result<Self> {
        Ok(Self {
            key: ContentKey::from_hex(key)?,
            iv: Iv::from_hex(iv)?,
        })
    }

    /// Generate a random key pair.
    pub fn generate() -> Self {
        Self {
            key: ContentKey::generate(),
            iv: Iv::generate(),
        }
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("key", &"[REDACTED]")
            .field("iv", &self.iv)
            .finish()
    }
}
