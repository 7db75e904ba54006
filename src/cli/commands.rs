//! Command implementations for the csv_tally CLI
//!
//! Contains command execution logic, logging setup, and report rendering for
//! both human-readable and JSON output.

use colored::Colorize;
use tracing::{debug, info};

use crate::cli::args::{Args, CheckArgs, Commands, DistanceArgs, OutputFormat, SumArgs};
use crate::stats::summarize_column;
use crate::table::Table;
use crate::{Result, TallyError};

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("command line arguments: {:?}", args);

    match args.command {
        Commands::Sum(ref sum) => run_sum(sum),
        Commands::Check(ref check) => run_check(check),
        Commands::Distance(ref distance) => run_distance(distance),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csv_tally={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Parse every file, then sum and report the named column
fn run_sum(args: &SumArgs) -> Result<()> {
    args.validate()?;

    let mut tables = Vec::with_capacity(args.files.len());
    for file in &args.files {
        info!("reading {}", file.display());
        let table = Table::read_path(file)?;
        debug!(
            "{}: {} columns, {} records",
            file.display(),
            table.header().len(),
            table.records().len()
        );
        tables.push(table);
    }

    let summary = summarize_column(&tables, &args.column)?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Column '{}' across {} file(s):",
                summary.column,
                args.files.len()
            );
            println!("   Sum: {}", summary.sum);
            println!("  Mean: {}", summary.mean);
            println!(" Count: {}", summary.count);
        }
        OutputFormat::Json => {
            println!("{}", render_json(&summary)?);
        }
    }

    Ok(())
}

/// Parse each file independently and report pass/fail per file
fn run_check(args: &CheckArgs) -> Result<()> {
    args.validate()?;

    let mut failures = 0;
    for file in &args.files {
        match Table::read_path(file) {
            Ok(table) => {
                println!(
                    "{} {} ({} columns, {} records)",
                    "ok".green().bold(),
                    file.display(),
                    table.header().len(),
                    table.records().len()
                );
            }
            Err(error) => {
                failures += 1;
                println!("{} {}: {}", "error".red().bold(), file.display(), error);
            }
        }
    }

    if failures > 0 {
        return Err(TallyError::configuration(format!(
            "{} of {} file(s) failed validation",
            failures,
            args.files.len()
        )));
    }

    Ok(())
}

/// Compute and report the point-to-rectangle distance
fn run_distance(args: &DistanceArgs) -> Result<()> {
    let rect = args.rect.0;
    let distance = rect.distance_to(args.point.x, args.point.y)?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "{:.2} : from ({}, {}) to the rectangle ({}, {}, {}, {})",
                distance,
                args.point.x,
                args.point.y,
                rect.min_x,
                rect.min_y,
                rect.max_x,
                rect.max_y
            );
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "point": { "x": args.point.x, "y": args.point.y },
                "rect": rect,
                "distance": distance,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
