use std::process::ExitCode;

use clap::Parser;
use minesweeper_cli::{Cli, init_tracing, normalize_args, run, supervise};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    init_tracing();

    let interrupted = async {
        // Without a signal handler the run simply goes to completion
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    ExitCode::from(supervise(run(cli), interrupted).await)
}
