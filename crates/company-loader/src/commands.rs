//! Command implementations

use company_common::EntityKind;

use crate::client::ApiClient;
use crate::config::LoaderConfig;
use crate::error::Result;
use crate::orchestrator::{Orchestrator, StageOutcome};
use crate::reader::read_data_files;

/// Read the data files and run a full load
pub async fn load(config: &LoaderConfig, dry_run: bool) -> Result<()> {
    config.validate()?;

    // Read before touching the server so a bad file never wipes the tables.
    let data = read_data_files(&config.data_dir)?;

    if dry_run {
        for kind in EntityKind::ALL {
            println!("{}: {} rows", kind, data.count(kind));
        }
        println!("Dry run: nothing sent to {}", config.api_url);
        return Ok(());
    }

    let client = ApiClient::new(config)?;
    let mut orchestrator = Orchestrator::new(client).with_expected_status(config.expected_status);

    let outcomes = orchestrator.run(&data).await?;
    for outcome in &outcomes {
        print_outcome(outcome);
    }
    println!("Load complete");

    Ok(())
}

/// Run only the schema reset
pub async fn reset(config: &LoaderConfig) -> Result<()> {
    config.validate()?;

    let client = ApiClient::new(config)?;
    let mut orchestrator = Orchestrator::new(client).with_expected_status(config.expected_status);

    let outcome = orchestrator.reset().await?;
    print_outcome(&outcome);

    Ok(())
}

fn print_outcome(outcome: &StageOutcome) {
    match &outcome.summary {
        Some(summary) => println!(
            "{}: {} loaded in {} batches",
            outcome.stage, summary.loaded, summary.batches
        ),
        None => println!("{}: status {}", outcome.stage, outcome.status),
    }
}
