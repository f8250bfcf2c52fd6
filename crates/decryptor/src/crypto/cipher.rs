//! AES-CTR decryption of hex-encoded ciphertext.
//!
//! The counter block is the UTF-8 vector right-padded with zeroes to one AES
//! block. Only its low 64 bits advance; the high 64 bits stay as supplied.

use aes::{Aes128, Aes192, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher, StreamCipherError};
use thiserror::Error;
use tracing::{debug, error};

use super::encoding::{parse_hex, HexMode};
use crate::credentials::Credentials;

/// AES block length in bytes; also the counter block length.
pub const BLOCK_LEN: usize = 16;

/// Number of low-order counter bits that increment per block.
pub const COUNTER_BITS: u32 = 64;

type Aes128Ctr64 = ctr::Ctr64BE<Aes128>;
type Aes192Ctr64 = ctr::Ctr64BE<Aes192>;
type Aes256Ctr64 = ctr::Ctr64BE<Aes256>;

/// Errors produced by the cipher layer.
///
/// These carry the real cause and are only ever logged; callers of
/// [`Decryptor::decrypt`] see [`DecryptionError`].
#[derive(Debug, Error)]
pub enum CipherError {
    /// The ciphertext is not valid hex.
    #[error("malformed hex ciphertext: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The key is not 16, 24 or 32 bytes.
    #[error("invalid key length: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The vector does not fit in one counter block.
    #[error("invalid vector length: expected at most {BLOCK_LEN} bytes, got {0}")]
    InvalidVectorLength(usize),

    /// The ciphertext is longer than the remaining 64-bit counter space.
    #[error("ciphertext of {0} bytes exhausts the {COUNTER_BITS}-bit counter")]
    CounterExhausted(usize),

    /// The decrypted bytes are not UTF-8.
    #[error("decrypted data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The blocking worker panicked or was cancelled.
    #[error("decryption task did not complete: {0}")]
    TaskFailed(String),
}

/// Opaque decryption failure returned to callers.
///
/// The cause is written to the log by [`Decryptor::decrypt`] and is not
/// recoverable from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", common::error::DECRYPTION_FAILED_MESSAGE)]
pub struct DecryptionError;

impl From<DecryptionError> for common::ServiceError {
    fn from(_: DecryptionError) -> Self {
        common::ServiceError::DecryptionFailure
    }
}

/// AES-CTR keystream for whichever key size was supplied.
enum CtrCipher {
    Aes128(Aes128Ctr64),
    Aes192(Aes192Ctr64),
    Aes256(Aes256Ctr64),
}

impl CtrCipher {
    fn new(key: &[u8], counter: &[u8; BLOCK_LEN]) -> Result<Self, CipherError> {
        let cipher = match key.len() {
            16 => Aes128Ctr64::new_from_slices(key, counter).map(Self::Aes128),
            24 => Aes192Ctr64::new_from_slices(key, counter).map(Self::Aes192),
            32 => Aes256Ctr64::new_from_slices(key, counter).map(Self::Aes256),
            other => return Err(CipherError::InvalidKeyLength(other)),
        };
        cipher.map_err(|_| CipherError::InvalidKeyLength(key.len()))
    }

    fn try_apply_keystream(&mut self, buf: &mut [u8]) -> Result<(), StreamCipherError> {
        match self {
            Self::Aes128(c) => c.try_apply_keystream(buf),
            Self::Aes192(c) => c.try_apply_keystream(buf),
            Self::Aes256(c) => c.try_apply_keystream(buf),
        }
    }
}

/// Build the initial counter block from the vector bytes.
fn counter_block(vector: &[u8]) -> Result<[u8; BLOCK_LEN], CipherError> {
    if vector.len() > BLOCK_LEN {
        return Err(CipherError::InvalidVectorLength(vector.len()));
    }
    let mut block = [0u8; BLOCK_LEN];
    block[..vector.len()].copy_from_slice(vector);
    Ok(block)
}

/// Decrypt raw ciphertext bytes with AES-CTR.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`], [`CipherError::InvalidVectorLength`]
/// or [`CipherError::CounterExhausted`].
pub fn decrypt_bytes(ciphertext: &[u8], key: &[u8], vector: &[u8]) -> Result<Vec<u8>, CipherError> {
    let counter = counter_block(vector)?;
    let mut cipher = CtrCipher::new(key, &counter)?;
    let mut buf = ciphertext.to_vec();
    cipher
        .try_apply_keystream(&mut buf)
        .map_err(|_| CipherError::CounterExhausted(ciphertext.len()))?;
    Ok(buf)
}

/// Synchronous decrypt pipeline: parse hex, run AES-CTR, decode UTF-8.
///
/// Key and vector are used as their UTF-8 bytes.
pub fn decrypt_hex(
    ciphertext: &str,
    key: &str,
    vector: &str,
    mode: HexMode,
) -> Result<String, CipherError> {
    let data = parse_hex(ciphertext, mode)?;
    let plaintext = decrypt_bytes(&data, key.as_bytes(), vector.as_bytes())?;
    Ok(String::from_utf8(plaintext)?)
}

/// Async decryption front-end.
///
/// Holds the configured [`HexMode`]; otherwise stateless, so repeated calls
/// with the same arguments give the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decryptor {
    mode: HexMode,
}

impl Decryptor {
    pub fn new(mode: HexMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> HexMode {
        self.mode
    }

    /// Decrypt a hex ciphertext with the given key and vector.
    ///
    /// # Errors
    ///
    /// See [`Decryptor::decrypt_with`].
    pub async fn decrypt(
        &self,
        ciphertext: &str,
        key: &str,
        vector: &str,
    ) -> Result<String, DecryptionError> {
        self.decrypt_with(ciphertext, Credentials::new(key, vector))
            .await
    }

    /// Decrypt a hex ciphertext with a credential snapshot.
    ///
    /// The credentials are moved into the blocking task and zeroed when it
    /// finishes. This future resolves once the cipher is done; there is no
    /// timeout here.
    ///
    /// # Errors
    ///
    /// Returns [`DecryptionError`] for any failure. The underlying
    /// [`CipherError`] is logged at `error` level together with the input
    /// lengths. Key, vector and plaintext are never logged.
    pub async fn decrypt_with(
        &self,
        ciphertext: &str,
        credentials: Credentials,
    ) -> Result<String, DecryptionError> {
        let ciphertext_len = ciphertext.len();
        let key_len = credentials.key().len();
        let vector_len = credentials.vector().len();
        let mode = self.mode;

        let ciphertext = ciphertext.to_owned();
        let outcome = tokio::task::spawn_blocking(move || {
            decrypt_hex(&ciphertext, credentials.key(), credentials.vector(), mode)
        })
        .await
        .map_err(|e| CipherError::TaskFailed(e.to_string()))
        .and_then(|res| res);

        match outcome {
            Ok(plaintext) => {
                debug!(ciphertext_len, plaintext_len = plaintext.len(), "decrypted");
                Ok(plaintext)
            }
            Err(e) => {
                error!(
                    error = %e,
                    ciphertext_len,
                    key_len,
                    vector_len,
                    hex_mode = ?mode,
                    "decryption error"
                );
                Err(DecryptionError)
            }
        }
    }
}
