//! Dispatches the parsed command.

use super::handlers::ServeCommandHandler;
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Runs the command; no subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    cli.validate().map_err(anyhow::Error::msg)?;

    let dry_run = match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => *dry_run,
        None => false,
    };

    ServeCommandHandler::new(settings).execute(dry_run).await
}
