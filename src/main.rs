//! `iq-license-bom` — export a license and threat-group CSV from component-analysis reports.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load noise filters ([`config::load_config`]).
//! 3. Fetch reports from the Report Service ([`service`]), either one application's
//!    stage (`--public-id`) or every stage of every application ([`orchestrator`]).
//! 4. Normalize each report into sorted rows ([`normalizer`], [`license`]).
//! 5. Write the CSV and print a summary ([`report`]).
//! 6. Exit `0`, including when a targeted lookup finds nothing, or `1` on any
//!    service failure.

mod cli;
mod config;
mod license;
mod logging;
mod models;
mod normalizer;
mod orchestrator;
mod report;
mod service;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::load_config;
use orchestrator::{Orchestrator, RunOutcome};
use report::csv::{export, OUTPUT_FILE};
use service::ServiceClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let working_dir = std::env::current_dir()?;
    let config = load_config(&working_dir, cli.config.as_deref())?;

    let client = ServiceClient::new(&cli.url, cli.auth.clone())?;
    let orchestrator = Orchestrator::new(&client, &config.filters, cli.quiet);

    let outcome = match &cli.public_id {
        Some(public_id) => orchestrator.run_targeted(public_id, &cli.stage).await,
        None => orchestrator.run_all().await,
    };

    let results = match outcome {
        Ok(RunOutcome::Results(results)) => results,
        Ok(RunOutcome::NotFound(not_found)) => {
            eprintln!("{}", not_found.to_string().yellow());
            return Ok(());
        }
        Err(err) => {
            tracing::debug!(url = err.url(), "run aborted");
            eprintln!("{} {}", "error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let output = PathBuf::from(OUTPUT_FILE);
    let saved = export(&results, &output)?;
    report::terminal::render(&results, saved, &output, cli.verbose, cli.quiet);

    Ok(())
}
