//! CLI entry point.
//!
//! Loads `.env`, initializes logging, parses configuration, then hands
//! over to the composition root in `bootstrap`.

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dynopull_cli::{Cli, CliError, bootstrap, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let settings = cli.into_settings();

    let cancel = CancellationToken::new();
    spawn_shutdown_listener(cancel.clone());

    let result: Result<(), CliError> = async {
        let context = bootstrap(&settings)?;
        run(context, cancel).await
    }
    .await;

    if let Err(e) = result {
        error!(error = %e, "dynopull stopped");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }

    info!("dynopull stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C so in-flight commands can finish.
fn spawn_shutdown_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Cannot listen for Ctrl-C");
            return;
        }
        info!("Shutdown requested");
        token.cancel();
    });
}
