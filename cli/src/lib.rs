//! Command line client for the minesweeper game API

use std::io::Write;

use anyhow::Error;
use minesweeper_client::{ApiError, MinesweeperClient};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod cmd;

pub use cli::{Cli, Command, normalize_args};

/// Exit status after Ctrl-C
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Logs go to stderr so stdout only carries command output
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

pub async fn run(cli: Cli) -> Result<(), Error> {
    run_with_output(cli, &mut std::io::stdout()).await
}

/// Runs `cli`, writing command output to `out`
pub async fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<(), Error> {
    let client = MinesweeperClient::new(cli.api_url(), cli.command.credentials().into())?;
    info!("Using game API at {}", client.base_url());

    cmd::execute(&client, cli.command, out).await?;
    out.flush()?;
    Ok(())
}

/// Logs a failed run.
///
/// Rejected API calls get the status and body only; anything else is logged
/// with its whole cause chain.
pub fn report(err: &Error) {
    match err.downcast_ref::<ApiError>() {
        Some(api_err @ ApiError::UnexpectedApiResponse { .. }) => error!("{api_err}"),
        _ => error!("unexpected error: {err:?}"),
    }
}

/// Process exit status for a finished run; failures are logged first
pub fn exit_status(result: Result<(), Error>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            1
        }
    }
}

/// Drives `run` to completion unless `interrupt` resolves first.
///
/// An interrupted run is dropped without logging anything.
pub async fn supervise<R, I>(run: R, interrupt: I) -> u8
where
    R: Future<Output = Result<(), Error>>,
    I: Future,
{
    tokio::select! {
        result = run => exit_status(result),
        _ = interrupt => INTERRUPTED_EXIT_CODE,
    }
}
