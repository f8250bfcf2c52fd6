//! Common types, protocol definitions, and errors shared across `ctr-decrypt-svc` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
