use anyhow::Context;
use clap::Parser;
use tracing::debug;

use salary_cli::{app, cli::Cli, config::AppConfig, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;

    let config = AppConfig::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;

    // A level from the config file applies only when the flag was not given.
    if let (None, Some(level)) = (&cli.log_level, &config.logging.level) {
        logging::set_log_level(level)?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.logging.file.as_ref()) {
        logging::enable_file_logging(path)?;
    }

    debug!(command = ?cli.command, "starting");
    app::run(cli, config).await
}
