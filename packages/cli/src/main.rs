#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the shotbot pipeline.
//!
//! A single-run batch job intended for periodic (e.g. daily cron)
//! execution: collects yesterday's gun-violence incidents from the archive
//! listing, geocodes each one, attaches the responsible national and state
//! legislators with their gun-rights contribution sums, prints a
//! human-readable summary, and optionally writes a CSV export.
//!
//! The stages run strictly in sequence and each failure is contained to
//! the item it occurred on; only a missing or invalid configuration file
//! terminates the run.

mod config;
mod export;
mod report;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use shotbot_collector::ArchiveSource;
use shotbot_geocoder::Geocoder;
use shotbot_legislators::{ContributionFetcher, Resolver};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "shotbot", about = "Gun-violence incident enrichment pipeline")]
struct Cli {
    /// Path to the TOML config file holding the API keys
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// Target date (YYYY-MM-DD); defaults to yesterday
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Number of archive listing pages to scan
    #[arg(long)]
    max_pages: Option<u32>,
    /// Write a CSV export of the enriched incidents to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", config::SETUP_HELP);
            std::process::exit(1);
        }
    };

    let target_date = match cli.date {
        Some(date) => date,
        None => Local::now()
            .date_naive()
            .pred_opt()
            .ok_or("cannot compute yesterday's date")?,
    };
    let target_display = archive_date(target_date);

    let client = reqwest::Client::new();

    let max_pages = cli
        .max_pages
        .or(config.max_pages)
        .unwrap_or(shotbot_collector::DEFAULT_MAX_PAGES);

    let source = ArchiveSource::new(
        &config.endpoints.archive_pages,
        &config.endpoints.archive_root,
    )
    .with_max_pages(max_pages);
    let mut incidents = source.collect(&client, &target_display).await;

    let geocoder = Geocoder::new(&config.endpoints.geocoding, &config.geocoding_api_key);
    geocoder.geocode_all(&client, &mut incidents).await;

    let mut fetcher =
        ContributionFetcher::new(&config.endpoints.contributions, &config.crp_api_key);
    if let Some(cycles) = config.cycles.clone() {
        fetcher = fetcher.with_cycles(cycles);
    }

    let resolver = Resolver::new(
        &config.endpoints.national_legislators,
        &config.endpoints.state_legislators,
        &config.legislator_api_key,
        fetcher,
    );
    resolver.resolve_all(&client, &mut incidents).await;

    report::print_summary(&incidents);

    if let Some(path) = &cli.csv {
        export::write_csv(path, &incidents)?;
        log::info!("Wrote {} incident(s) to {}", incidents.len(), path.display());
    }

    Ok(())
}

/// Formats a date the way the archive displays row dates.
///
/// The site does not zero-pad the day ("August 8, 2015").
fn archive_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_single_digit_day_unpadded() {
        let date = NaiveDate::from_ymd_opt(2015, 8, 8).unwrap();
        assert_eq!(archive_date(date), "August 8, 2015");
    }

    #[test]
    fn formats_double_digit_day() {
        let date = NaiveDate::from_ymd_opt(2015, 8, 21).unwrap();
        assert_eq!(archive_date(date), "August 21, 2015");
    }
}
