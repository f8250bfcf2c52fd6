//! Shared application state injected into every Axum handler.

use crate::credentials::CredentialStore;
use crate::crypto::Decryptor;

/// Application state shared across all request handlers.
///
/// Both fields are cheap to clone: the store is `Arc`-backed and the
/// decryptor is `Copy`.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The active key/vector pair.
    pub credentials: CredentialStore,
    /// Decryption front-end configured with the hex parsing mode.
    pub decryptor: Decryptor,
}

impl AppState {
    /// Create a new [`AppState`] from a credential store and decryptor.
    pub fn new(credentials: CredentialStore, decryptor: Decryptor) -> Self {
        Self {
            credentials,
            decryptor,
        }
    }
}

impl Default for AppState {
    /// Creates a default [`AppState`] with an empty store and strict hex
    /// parsing, suitable for tests.
    fn default() -> Self {
        Self::new(CredentialStore::new(), Decryptor::default())
    }
}
