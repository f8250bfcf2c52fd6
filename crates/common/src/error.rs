//! Common error types shared across crates.

use thiserror::Error;

/// Message returned to callers for every decryption failure, whatever the cause.
pub const DECRYPTION_FAILED_MESSAGE: &str = "Failed to decrypt data";

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailure`] → 422
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. a key supplied without its vector.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Decryption failed. The cause is only logged, never carried here.
    #[error("{DECRYPTION_FAILED_MESSAGE}")]
    DecryptionFailure,
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailure => 422,
        }
    }

    /// Short machine-readable code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::DecryptionFailure => "decryption_failed",
        }
    }
}
