//! # liff-bridge
//!
//! Runs the port bridge over stdio: newline-delimited outbound messages on
//! stdin, inbound results on stdout, logs on stderr.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use liff_bridge::launch;
use liff_bridge_cli::{Overrides, load_fixture, run};
use liff_core::logging::init_subscriber;
use liff_core::{InitConfig, StubHost};
use liff_settings::{load_settings_from_path, settings_path};

/// LIFF port bridge over stdio.
#[derive(Parser, Debug)]
#[command(name = "liff-bridge", about = "Relay LIFF port messages between stdio and a stub host")]
struct Cli {
    /// Settings file (defaults to `~/.liff-bridge/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON fixture describing the stub host.
    #[arg(long)]
    host_fixture: Option<PathBuf>,

    /// Mini-app id passed to the host's init (overrides settings).
    #[arg(long)]
    liff_id: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides settings).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            liff_id: self.liff_id.clone(),
            fixture: self.host_fixture.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let path = args.settings.clone().unwrap_or_else(settings_path);
    let mut settings = load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))?;
    args.overrides()
        .apply(&mut settings)
        .context("Invalid command-line override")?;

    init_subscriber(settings.logging.effective_level());

    let host_config =
        load_fixture(settings.host.fixture.as_deref()).context("Failed to load host fixture")?;
    let host = Arc::new(StubHost::new(host_config));

    let (bridge, app) = launch(host, &InitConfig::new(settings.host.liff_id.clone()))
        .await
        .context("Failed to launch bridge")?;
    tracing::info!(methods = ?bridge.methods(), "bridge ready");

    let (summary, _stdout) = run(bridge, app, tokio::io::stdin(), tokio::io::stdout()).await?;
    tracing::debug!(?summary, "shutting down");
    Ok(())
}
