use anyhow::Result;
use std::process::ExitCode;

use super::args::{Cli, Command, CredentialArgs};
use super::config_cmd;
use super::interactive;
use super::plan;
use super::setup;

pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    // Handle setup flag (no config required)
    if cli.setup {
        setup::run_setup()?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        None => interactive::run_session(&CredentialArgs::default()).await,
        Some(Command::Session(args)) => interactive::run_session(&args.credentials).await,
        Some(Command::Plan(args)) => plan::run_plan(args).await,
        Some(Command::Config(args)) => {
            config_cmd::handle_config(&args)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
