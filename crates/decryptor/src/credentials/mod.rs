//! Runtime key/vector holder.
//!
//! # Lifecycle
//!
//! 1. At startup the store is empty; [`CredentialStore::read`] returns a pair
//!    of empty strings and [`CredentialStore::is_set`] is `false`.
//! 2. If `CIPHER_KEY` is configured, `main` seeds the store before serving.
//! 3. `PUT /credentials` replaces the pair wholesale at any time.
//! 4. Decrypt handlers take a snapshot via [`CredentialStore::read`].
//!
//! # Security invariants
//!
//! - Key and vector are **never** logged, traced, or returned over HTTP.
//! - Length validation is the decryptor's job; the store accepts anything.

pub mod store;

pub use store::{CredentialStore, Credentials};
