//! Company Loader - Main entry point

use clap::Parser;
use company_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use company_loader::{commands, Cli, Commands};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // `.env` values act as environment defaults for the CLI flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("company-loader")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The loader works without logging
    let _ = init_logging(&log_config);

    let config = cli.config();
    let result = match &cli.command {
        Commands::Load { dry_run, .. } => commands::load(&config, *dry_run).await,
        Commands::Reset { .. } => commands::reset(&config).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
