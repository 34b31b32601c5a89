//! # pesmux DRM
//!
//! SAMPLE-AES sample encryption for the pesmux PES packet generator.
//!
//! HTTP Live Streaming protects elementary streams with SAMPLE-AES:
//! pattern-based AES-128-CBC applied inside each media sample, leaving
//! headers and enough structure in the clear for parsers. This crate
//! provides:
//!
//! - [`ContentKey`], [`Iv`], and [`EncryptionKey`]: zeroized key
//!   material with hex/base64 constructors
//! - [`Aes128Cbc`]: the chained no-padding CBC primitive
//! - [`SampleAesEncryptor`]: the AAC and H.264 SAMPLE-AES patterns,
//!   including post-encryption emulation prevention re-escaping
//!
//! # Example
//!
//! ```rust
//! use pesmux_drm::{EncryptionKey, SampleAesEncryptor};
//!
//! let key = EncryptionKey::from_hex(
//!     "000102030405060708090a0b0c0d0e0f",
//!     "101112131415161718191a1b1c1d1e1f",
//! ).unwrap();
//! let encryptor = SampleAesEncryptor::new(key);
//!
//! let mut adts_frame = vec![0u8; 64];
//! encryptor.encrypt_aac_frame(&mut adts_frame).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cbc;
pub mod error;
pub mod key;
pub mod sample_aes;

pub use cbc::{Aes128Cbc, AES_BLOCK_SIZE};
pub use error::{DrmError, EncryptionError, KeyError, Result};
pub use key::{ContentKey, EncryptionKey, Iv, AES_128_KEY_SIZE, IV_SIZE};
pub use sample_aes::{Pattern, SampleAesEncryptor, AAC_CLEAR_LEAD, H264_CLEAR_LEAD};
