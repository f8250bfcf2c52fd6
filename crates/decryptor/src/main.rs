//! `ctr-decrypt-svc` — decryptor binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Create the [`CredentialStore`], seeding it from `CIPHER_KEY` /
//!    `CIPHER_VECTOR` when configured.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod credentials;
mod crypto;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use credentials::CredentialStore;
use crypto::Decryptor;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Logging is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    let decryptor = Decryptor::new(cfg.hex_mode);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        hex_mode = ?decryptor.mode(),
        "ctr-decrypt-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Credentials
    // -----------------------------------------------------------------------
    let credentials = CredentialStore::new();
    if let Some((key, vector)) = cfg.seed_credentials() {
        credentials.save(key, vector);
    } else {
        info!("no CIPHER_KEY configured; waiting for PUT /credentials");
    }

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(credentials, decryptor);
    let router = server::router::build(state, cfg.request_timeout());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
