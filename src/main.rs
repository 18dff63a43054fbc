mod cli;

use bgpview::{NormalizedRecord, Result};
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = stderrlog::new()
        .module(module_path!())
        .verbosity(args.verbose.log_level_filter())
        .init()
    {
        eprintln!("Unable to initialize logging: {error}");
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Run every lookup and render the records that succeeded. Returns `false` if any lookup failed.
fn run(args: &cli::Args) -> Result<bool> {
    let client = cli::build_client(args)?;

    let mut records: Vec<NormalizedRecord> = Vec::new();
    let mut all_succeeded = true;
    for request in args.command.requests() {
        cli::check_request(&request);

        match client.lookup(&request) {
            Ok(record) => {
                cli::log::lookup_summary(&request, &record);
                records.push(record);
            }
            Err(error) => {
                error!("{error}");
                all_succeeded = false;
            }
        }
    }

    if records.is_empty() {
        return Ok(false);
    }

    match args.output {
        cli::OutputFormat::Lines => cli::output::lines(&records),
        cli::OutputFormat::Table => cli::output::record_table(&records),
        cli::OutputFormat::Json => cli::output::json(&records)?,
    }

    if let Some(csv_file) = &args.csv_file {
        cli::csv::save(&records, csv_file)?;
        info!("Saved results to {:?}", csv_file);
    }

    Ok(all_succeeded)
}
