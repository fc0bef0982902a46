//! claimcheck binary entry point.
//!
//! `claimcheck test|verify` reads one JSON object from stdin and writes one
//! JSON object to stdout. `claimcheck serve` runs the HTTP API instead.

use clap::Parser;
use claimcheck::api::{self, AppState};
use claimcheck::cli::{self, Cli, Outcome};
use claimcheck::config::load_patterns;
use claimcheck::error::AppError;
use claimcheck_core::ClaimVerifier;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if cli.action.as_deref() == Some(cli::SERVE_ACTION) {
        return match run_server(&cli).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => Outcome::from_error(&err).emit(),
        };
    }

    cli::run_action(
        cli.action.as_deref(),
        std::io::stdin().lock(),
        cli.patterns.as_deref(),
    )
    .emit()
}

async fn run_server(cli: &Cli) -> Result<(), AppError> {
    let verifier = ClaimVerifier::new(load_patterns(cli.patterns.as_deref())?);
    let state = AppState::new(verifier)
        .with_api_key(cli.api_key.clone())
        .with_rate_limit(cli.rate_limit);
    api::serve(&cli.bind, state).await
}

/// Logs go to stderr; stdout is reserved for the JSON reply.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
