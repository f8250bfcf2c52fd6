//! Request and response types exchanged over the HTTP API.
//!
//! All bodies are JSON. Ciphertext travels as a plain hex string inside the
//! `ciphertext` field; no other framing is applied.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Credentials endpoint
// ---------------------------------------------------------------------------

/// Request body for `PUT /credentials`.
///
/// Both strings are used as raw UTF-8 bytes by the decryptor; they are not
/// hex- or base64-decoded.
#[derive(Clone, Serialize, Deserialize)]
pub struct SaveCredentialsRequest {
    pub key: String,
    pub vector: String,
}

impl std::fmt::Debug for SaveCredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveCredentialsRequest")
            .field("key", &"[REDACTED]")
            .field("vector", &"[REDACTED]")
            .finish()
    }
}

/// Response body for `GET /credentials`.
///
/// Reports only whether a pair is held and the byte lengths; the values
/// themselves are never returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsStatus {
    /// Whether credentials have been saved since startup.
    pub key_set: bool,
    /// Byte length of the stored key.
    pub key_len: usize,
    /// Byte length of the stored vector.
    pub vector_len: usize,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /decrypt`.
///
/// When `key` and `vector` are both present they are used instead of the
/// stored credentials. Supplying only one of them is rejected.
#[derive(Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Hex-encoded ciphertext, no prefix or separators.
    pub ciphertext: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<String>,
}

impl std::fmt::Debug for DecryptRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptRequest")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("vector", &self.vector.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Successful response body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub plaintext: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"decryption_failed"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether credentials have been saved.
    pub credentials_set: bool,
}
