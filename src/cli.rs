//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - export format options
//! - [`ReportFormat`] - how the statistics report is printed

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::FilterConfig;

/// Parse WhatsApp group exports and print group statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens _chat.txt
    chatlens _chat.txt -o messages.csv
    chatlens _chat.txt -o messages.jsonl --report json
    chatlens _chat.txt --keep-system-events --keep-self --top 5
    RUST_LOG=chatlens=debug chatlens _chat.txt")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Export the parsed table to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export format (default: inferred from the output extension, else csv)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How to print the statistics report
    #[arg(long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    /// Keep group notifications in the table
    #[arg(long)]
    pub keep_system_events: bool,

    /// Keep messages written by the exporting user
    #[arg(long)]
    pub keep_self: bool,

    /// JSON file with `filter` and `analysis` settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of emojis listed in the report
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Applies the command-line toggles on top of a loaded filter config.
    pub fn apply_filter_flags(&self, mut config: FilterConfig) -> FilterConfig {
        if self.keep_system_events {
            config.include_system_events = true;
        }
        if self.keep_self {
            config.exclude_self_author = false;
        }
        config
    }

    /// Returns the default log directive for the chosen verbosity.
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

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(format: OutputFormat) -> crate::output::OutputFormat {
        match format {
            OutputFormat::Csv => crate::output::OutputFormat::Csv,
            OutputFormat::Json => crate::output::OutputFormat::Json,
            OutputFormat::Jsonl => crate::output::OutputFormat::Jsonl,
        }
    }
}

/// Report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,

    /// No report
    #[value(name = "none")]
    Skip,
}
