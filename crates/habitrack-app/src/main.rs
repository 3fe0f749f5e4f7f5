use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;

use habitrack_infrastructure::config::{BackendConfig, RealtimeConfig};
use habitrack_infrastructure::logging;
use habitrack_infrastructure::persistence::SessionFileStore;
use habitrack_lib::presentation::bootstrap::build_app_state;
use habitrack_lib::presentation::cli::Cli;
use habitrack_lib::presentation::commands::dispatch;
use habitrack_lib::presentation::error::CommandError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let backend = BackendConfig::from_env().context("Invalid backend configuration")?;
    let realtime = RealtimeConfig::from_env().context("Invalid realtime configuration")?;
    let session_path =
        SessionFileStore::default_path().context("No data directory for the session file")?;

    let state = build_app_state(backend, realtime, SessionFileStore::new(session_path)).await?;
    dispatch(&state, cli.command).await
}

fn init_logging(verbose: bool) {
    let result = logging::default_log_dir()
        .context("No data directory for log files")
        .and_then(|log_dir| logging::init_logger(log_dir, verbose));

    if let Err(e) = result {
        eprintln!("⚠️  Failed to initialize file logging: {:#}", e);
        eprintln!("   Falling back to console logging only");

        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }
}
