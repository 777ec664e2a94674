use clap::Parser;

use storefront_rs::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;

    // Dry runs print to stdout and skip the subscriber.
    if !cli.is_dry_run() {
        init_logger_from_settings(&settings)?;
    }

    execute_command(&cli, settings).await
}
