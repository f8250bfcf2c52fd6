//! Configuration loading and validation for the decryptor service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is present but invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::HexMode;
use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;

/// Validated decryptor service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ciphertext hex parsing mode: `strict` or `lenient`.
    #[serde(default)]
    pub hex_mode: HexMode,

    /// Per-request timeout applied by the HTTP layer.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Key to seed the credential store with at startup.
    #[serde(default)]
    pub cipher_key: Option<String>,

    /// Vector to seed alongside `cipher_key`. Ignored without a key.
    #[serde(default)]
    pub cipher_vector: Option<String>,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        if self.cipher_vector.is_some() && self.cipher_key.is_none() {
            anyhow::bail!("CIPHER_VECTOR is set but CIPHER_KEY is not");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Startup credentials, if a key was configured. A missing vector is empty.
    pub fn seed_credentials(&self) -> Option<(String, String)> {
        self.cipher_key
            .clone()
            .map(|key| (key, self.cipher_vector.clone().unwrap_or_default()))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .field("hex_mode", &self.hex_mode)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cipher_key", &self.cipher_key.as_ref().map(|_| "[REDACTED]"))
            .field("cipher_vector", &self.cipher_vector.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            listen_port: default_listen_port(),
            log_level: default_log_level(),
            hex_mode: HexMode::default(),
            request_timeout_secs: default_request_timeout(),
            cipher_key: None,
            cipher_vector: None,
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(base().hex_mode, HexMode::Strict);
        assert!(base().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            request_timeout_secs: 0,
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_vector_without_key() {
        let cfg = Config {
            cipher_vector: Some("abcdefgh".into()),
            ..base()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn seed_defaults_vector_to_empty() {
        let cfg = Config {
            cipher_key: Some("0123456789abcdef".into()),
            ..base()
        };
        assert_eq!(
            cfg.seed_credentials(),
            Some(("0123456789abcdef".to_string(), String::new()))
        );
        assert_eq!(base().seed_credentials(), None);
    }

    #[test]
    fn debug_redacts_seed_credentials() {
        let cfg = Config {
            cipher_key: Some("top-secret-key".into()),
            cipher_vector: Some("iv".into()),
            ..base()
        };
        let out = format!("{cfg:?}");
        assert!(!out.contains("top-secret-key"));
        assert!(out.contains("REDACTED"));
    }

    #[test]
    fn deserialises_from_source_values() {
        let cfg: Config = config::Config::builder()
            .set_override("listen_port", 9000)
            .unwrap()
            .set_override("hex_mode", "lenient")
            .unwrap()
            .set_override("cipher_key", "0123456789abcdef")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.listen_port, 9000);
        assert_eq!(cfg.hex_mode, HexMode::Lenient);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(cfg.cipher_vector.is_none());
    }
}
