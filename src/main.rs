//! latchkey - a terminal client for a token-gated page.
//!
//! Keeps the who-is-signed-in state in one place, verifies the stored
//! token once at startup, and only renders the protected page for a live
//! session.

mod api;
mod app;
mod auth;
mod config;
mod guard;
mod models;

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("latchkey starting");

    let mut app = App::new()?;
    let result = app.run().await;

    info!("latchkey shutting down");
    result
}
