//! [`CredentialStore`]: lock-free holder for the active key and vector.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A key/vector pair, used as raw UTF-8 bytes by the decryptor.
///
/// Both fields default to the empty string. The strings are zeroized on drop
/// and never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    key: String,
    vector: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, vector: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            vector: vector.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn vector(&self) -> &str {
        &self.vector
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

/// Shared store for the current [`Credentials`].
///
/// Backed by [`ArcSwapOption`]: a save swaps in a whole new pair in one
/// store, so readers see either the old pair or the new one and never block.
/// Cloning the store shares the same slot.
#[derive(Clone, Debug, Default)]
pub struct CredentialStore {
    inner: Arc<ArcSwapOption<Credentials>>,
}

impl CredentialStore {
    /// Create a new, empty [`CredentialStore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held pair. Always succeeds; later reads see the new values.
    pub fn save(&self, key: impl Into<String>, vector: impl Into<String>) {
        let credentials = Credentials::new(key, vector);
        let (key_len, vector_len) = (credentials.key.len(), credentials.vector.len());
        self.inner.store(Some(Arc::new(credentials)));
        info!(key_len, vector_len, "credentials saved");
    }

    /// Snapshot of the current pair; empty strings before the first save.
    pub fn read(&self) -> Credentials {
        self.snapshot().unwrap_or_default()
    }

    /// Single load of the slot: `None` before the first save.
    pub fn snapshot(&self) -> Option<Credentials> {
        self.inner.load().as_deref().cloned()
    }

    /// Returns `true` once [`CredentialStore::save`] has been called.
    pub fn is_set(&self) -> bool {
        self.inner.load().is_some()
    }
}
