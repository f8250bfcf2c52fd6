//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key, vector, or plaintext** may appear in any span attribute or log
//!   field. Failures are logged with their cause and input lengths only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init;
