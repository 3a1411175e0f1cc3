mod agent;
mod cli;
mod client;
mod config;
mod logging;
mod planner;
mod search;
mod session;
mod tokens;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose)?;
    cli.run().await
}
