//! # Tide Times Application Entry Point
//!
//! Command-line driver for the tide data client: resolve a coordinate from
//! the arguments or the saved location in tide-times.toml, fetch today's
//! tide report, and print the extremes and the hourly curve as text.
//!
//! Usage:
//! ```text
//! tide-times [LAT LON] [--mock]
//! ```
//! `--mock` serves deterministic synthetic data without touching the network.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use std::env;
use tide_times_lib::{client::TideClient, config::Config, Coordinate, TideReport};
use tracing_subscriber::EnvFilter;

/// Width of the text gauge drawn next to each table row
const GAUGE_WIDTH: f64 = 30.0;

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    // Diagnostics go through tracing; RUST_LOG selects what is shown
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let use_mock = args.iter().any(|arg| arg == "--mock");
    let positional: Vec<f64> = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .filter_map(|arg| arg.parse().ok())
        .collect();

    let mut config = Config::load();
    if use_mock {
        config.api.use_mock_data = true;
    }

    // Coordinate from the command line, else the saved location
    let (place, coordinate) = if positional.len() >= 2 {
        (
            format!("{}, {}", positional[0], positional[1]),
            Coordinate {
                latitude: positional[0],
                longitude: positional[1],
            },
        )
    } else {
        (
            config.location.name.clone(),
            Coordinate {
                latitude: config.location.latitude,
                longitude: config.location.longitude,
            },
        )
    };

    let client = TideClient::new(&config).context("building tide client")?;

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;
    let report = rt
        .block_on(client.fetch_usable_tides(coordinate))
        .with_context(|| format!("fetching tide data for {place}"))?;

    print_report(&place, &report);
    Ok(())
}

/// Print the extremes summary and the hourly table for one report.
fn print_report(place: &str, report: &TideReport) {
    println!("Tide times for {place}");
    println!();

    if !report.extremes.is_empty() {
        println!("Today's extremes:");
        for extreme in &report.extremes {
            println!(
                "  {:<4} {:>5.2} m at {}",
                extreme.kind.to_string(),
                extreme.height_meters,
                format_local_time(extreme.timestamp)
            );
        }
        println!();
    }

    let normalized = report.normalized_heights();
    let now = Utc::now().timestamp() as f64;
    let current = report.sample_nearest(now).map(|s| s.timestamp);

    println!("Hourly forecast:");
    for (sample, norm) in report.samples.iter().zip(normalized.iter()).take(25) {
        let gauge = "#".repeat((norm * GAUGE_WIDTH).round() as usize);
        let marker = if current == Some(sample.timestamp) {
            " <- now"
        } else {
            ""
        };
        println!(
            "  {}  {:>5.2} m  {}{}",
            format_local_time(sample.timestamp),
            sample.height_meters,
            gauge,
            marker
        );
    }

    if let Some(meta) = &report.meta {
        if let Some(attribution) = &meta.attribution {
            println!();
            println!("{attribution}");
        }
    }
}

/// Epoch seconds to a local HH:MM string; falls back to the raw value if the
/// timestamp is outside chrono's representable range.
fn format_local_time(epoch: f64) -> String {
    match DateTime::from_timestamp(epoch as i64, 0) {
        Some(utc) => utc.with_timezone(&Local).format("%H:%M").to_string(),
        None => format!("@{epoch}"),
    }
}
