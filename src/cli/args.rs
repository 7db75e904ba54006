//! Command-line argument definitions for csv_tally
//!
//! Defines the complete CLI interface using the clap derive API. Structured
//! flag values (the point and rectangle specs) parse through `FromStr`
//! wrappers so validation errors surface as normal clap errors.

use crate::geometry::Rect;
use crate::{Result, TallyError};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the csv_tally tool
///
/// Parses strict RFC4180-subset CSV tables and reports column sums and means.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "csv-tally",
    version,
    about = "Parse strict CSV tables and report column sums and means",
    long_about = "Parses CSV files against a strict RFC4180 subset (quoted fields, embedded \
                  delimiters, doubled quotes, no multi-line fields) and reports the sum and \
                  mean of a named column across one or more files. Malformed input is \
                  rejected with the offending line and offset rather than silently patched."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands for csv_tally
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Sum a named column across one or more CSV files
    Sum(SumArgs),
    /// Check CSV files against the grammar and report the first error in each
    Check(CheckArgs),
    /// Distance from a point to an axis-aligned rectangle
    Distance(DistanceArgs),
}

/// Arguments for the sum command
#[derive(Debug, Clone, Parser)]
pub struct SumArgs {
    /// CSV files to read
    ///
    /// Every file is parsed in full before any summing happens; a malformed
    /// file or a mismatched record count fails the whole command.
    #[arg(
        value_name = "FILES",
        num_args = 1..,
        required = true,
        help = "CSV files to read"
    )]
    pub files: Vec<PathBuf>,

    /// Column to sum
    ///
    /// Matched exactly against the header, including any spaces. A header
    /// name containing a comma must be quoted in the CSV itself, not here.
    #[arg(
        short = 'c',
        long = "column",
        value_name = "NAME",
        help = "Header name of the column to sum (exact match)"
    )]
    pub column: String,

    /// Output format for the summary
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub format: OutputFormat,
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// CSV files to check
    #[arg(
        value_name = "FILES",
        num_args = 1..,
        required = true,
        help = "CSV files to check"
    )]
    pub files: Vec<PathBuf>,
}

/// Arguments for the distance command
#[derive(Debug, Clone, Parser)]
pub struct DistanceArgs {
    /// Query point
    #[arg(
        short = 'p',
        long = "point",
        value_name = "X,Y",
        help = "Query point as X,Y"
    )]
    pub point: PointSpec,

    /// Rectangle extent
    ///
    /// Min must be strictly below max on both axes; a degenerate rectangle
    /// is rejected.
    #[arg(
        short = 'r',
        long = "rect",
        value_name = "MINX,MINY,MAXX,MAXY",
        help = "Rectangle as MINX,MINY,MAXX,MAXY"
    )]
    pub rect: RectSpec,

    /// Output format for the result
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the result"
    )]
    pub format: OutputFormat,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Wrapper for parsing an X,Y point flag
#[derive(Debug, Clone, Copy)]
pub struct PointSpec {
    pub x: f64,
    pub y: f64,
}

impl FromStr for PointSpec {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        let coords = parse_floats(s)?;
        match coords.as_slice() {
            &[x, y] => Ok(PointSpec { x, y }),
            other => Err(TallyError::configuration(format!(
                "expected X,Y but got {} values in '{}'",
                other.len(),
                s
            ))),
        }
    }
}

/// Wrapper for parsing a MINX,MINY,MAXX,MAXY rectangle flag
#[derive(Debug, Clone, Copy)]
pub struct RectSpec(pub Rect);

impl FromStr for RectSpec {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self> {
        let coords = parse_floats(s)?;
        match coords.as_slice() {
            &[min_x, min_y, max_x, max_y] => Ok(RectSpec(Rect::new(min_x, min_y, max_x, max_y)?)),
            other => Err(TallyError::configuration(format!(
                "expected MINX,MINY,MAXX,MAXY but got {} values in '{}'",
                other.len(),
                s
            ))),
        }
    }
}

fn parse_floats(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|_| {
                TallyError::configuration(format!("'{}' is not a number", part.trim()))
            })
        })
        .collect()
}

impl Args {
    /// Map verbosity flags to a tracing filter level
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl SumArgs {
    /// Validate the sum command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_files(&self.files)
    }
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_files(&self.files)
    }
}

fn validate_files(files: &[PathBuf]) -> Result<()> {
    for file in files {
        if !file.exists() {
            return Err(TallyError::configuration(format!(
                "file does not exist: {}",
                file.display()
            )));
        }
        if !file.is_file() {
            return Err(TallyError::configuration(format!(
                "not a regular file: {}",
                file.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_spec_parsing() {
        let point: PointSpec = "1.5,-2".parse().unwrap();
        assert_eq!(point.x, 1.5);
        assert_eq!(point.y, -2.0);

        assert!("1.5".parse::<PointSpec>().is_err());
        assert!("a,b".parse::<PointSpec>().is_err());
    }

    #[test]
    fn test_rect_spec_parsing() {
        let RectSpec(rect) = "0, 0, 10, 20".parse().unwrap();
        assert_eq!(rect.max_y, 20.0);

        // Degenerate rectangles are rejected at parse time
        assert!("10,0,0,20".parse::<RectSpec>().is_err());
    }

    #[test]
    fn test_cli_parses_sum_command() {
        let args =
            Args::try_parse_from(["csv-tally", "sum", "a.csv", "b.csv", "--column", "Cost"])
                .unwrap();
        match args.command {
            Commands::Sum(sum) => {
                assert_eq!(sum.files.len(), 2);
                assert_eq!(sum.column, "Cost");
            }
            other => panic!("expected sum command, got {other:?}"),
        }
    }

    #[test]
    fn test_verbosity_mapping() {
        let args = Args::try_parse_from(["csv-tally", "check", "a.csv", "-vv"]).unwrap();
        assert_eq!(args.log_level(), "debug");

        let args = Args::try_parse_from(["csv-tally", "check", "a.csv", "--quiet"]).unwrap();
        assert_eq!(args.log_level(), "error");
    }
}
