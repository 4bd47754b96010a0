//! Company Loader Library
//!
//! Reads the company CSV files and pushes them to the company server.
//!
//! # Overview
//!
//! - **Reader**: `departments.csv`, `jobs.csv` and `hired_employees.csv` as
//!   ordered text rows
//! - **Client**: HTTP calls to the server's reset and bulk load endpoints
//! - **Orchestrator**: reset, then departments, jobs and employees, stopping
//!   at the first stage that fails

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reader;

// Re-export commonly used types
pub use error::{LoaderError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use config::{
    LoaderConfig, DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL, DEFAULT_DATA_DIR,
    DEFAULT_EXPECTED_STATUS,
};

/// Bulk loader for the company data service
#[derive(Parser, Debug)]
#[command(name = "company-loader")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Company server URL
    #[arg(long, env = "COMPANY_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Timeout for each API request, in seconds
    #[arg(long, env = "COMPANY_API_TIMEOUT_SECS", default_value_t = DEFAULT_API_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset the schema, then load departments, jobs and employees
    Load {
        /// Directory holding departments.csv, jobs.csv and hired_employees.csv
        #[arg(long, env = "COMPANY_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Read and check the files, report counts, send nothing
        #[arg(long)]
        dry_run: bool,

        /// Status each stage must answer with
        #[arg(long, default_value_t = DEFAULT_EXPECTED_STATUS)]
        expected_status: u16,
    },

    /// Truncate every company table
    Reset {
        /// Status the reset must answer with
        #[arg(long, default_value_t = DEFAULT_EXPECTED_STATUS)]
        expected_status: u16,
    },
}

impl Cli {
    /// Loader configuration assembled from flags and environment
    pub fn config(&self) -> LoaderConfig {
        let mut config = LoaderConfig {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            ..Default::default()
        };

        match &self.command {
            Commands::Load {
                data_dir,
                expected_status,
                ..
            } => {
                config.data_dir = data_dir.clone();
                config.expected_status = *expected_status;
            },
            Commands::Reset { expected_status } => {
                config.expected_status = *expected_status;
            },
        }

        config
    }
}
