//! Hex-encoded AES-CTR decryption primitives.
//!
//! This module is free of HTTP dependencies. It turns a hex ciphertext string
//! plus a key/vector pair into UTF-8 plaintext.
//!
//! # Cipher parameters
//!
//! ```text
//! key     = utf8(key string)            16 / 24 / 32 bytes -> AES-128 / 192 / 256
//! counter = utf8(vector string) || 0x00 padding to 16 bytes
//!           bytes 0..8  fixed
//!           bytes 8..16 big-endian 64-bit block counter
//! ```
//!
//! Every failure is logged with its cause and surfaced as the single opaque
//! [`cipher::DecryptionError`].

pub mod cipher;
pub mod encoding;

pub use cipher::Decryptor;
pub use encoding::HexMode;
