//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and response compression.
//! The timeout is the only bound on a decrypt call; the decryptor itself
//! never times out.

use std::time::Duration;

/// Default per-request timeout, overridable via `REQUEST_TIMEOUT_SECS`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
