//! pdfcollate - Collate PDF documents with their supplementary files.
//!
//! Batch CLI: resolves the configuration from flags, a saved record and an
//! interactive date prompt, runs the pipeline and prints a summary.

mod cli;
mod logging;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process;

use crate::cli::Cli;
use pdfcollate::config::{Config, ConfigRecord, DATE_FORMAT, parse_date};
use pdfcollate::output::OutputFormatter;
use pdfcollate::DocumentProcessor;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> Result<()> {
    cli.validate()?;

    let mut formatter = OutputFormatter::new(cli.quiet, cli.verbose);

    let mut record = match &cli.config {
        Some(path) => ConfigRecord::load(path)?,
        None => ConfigRecord::default(),
    };
    cli.apply_to(&mut record);

    if record.start_date.trim().is_empty() {
        let date = prompt_start_date(&formatter)?;
        record.start_date = date.format(DATE_FORMAT).to_string();
    }

    let config = Config::from_record(&record)?;
    config.validate()?;
    tracing::debug!("Effective configuration: {config:?}");

    if let Some(path) = &cli.save_config {
        config
            .to_record()
            .save(path)
            .with_context(|| format!("Could not save configuration to {}", path.display()))?;
        formatter.info(&format!("Configuration saved to {}", path.display()));
    }

    formatter.section(&format!("{} v{}", pdfcollate::NAME, pdfcollate::VERSION));
    formatter.config_summary(&config);

    let stats = DocumentProcessor::new(config).run(&mut formatter);

    formatter.section("--- Processing Results ---");
    formatter.run_summary(&stats);

    Ok(())
}

/// Ask for the start date, defaulting to today.
///
/// Without a terminal on stdin nothing is asked.
fn prompt_start_date(formatter: &OutputFormatter) -> Result<NaiveDate> {
    let today = Local::now().date_naive();

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Ok(today);
    }

    print!(
        "Enter start date (YYYY-MM-DD) [leave blank for today: {}]: ",
        today.format(DATE_FORMAT)
    );
    io::stdout().flush().ok();

    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("Failed to read start date")?;

    Ok(match date_from_answer(&answer, today) {
        Ok(date) => date,
        Err(err) => {
            formatter.warning(&format!("{err}. Using today's date."));
            today
        }
    })
}

/// Interpret a prompt answer: blank means `today`.
fn date_from_answer(answer: &str, today: NaiveDate) -> pdfcollate::Result<NaiveDate> {
    match answer.trim() {
        "" => Ok(today),
        value => parse_date(value),
    }
}
