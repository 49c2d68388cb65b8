//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chatlens::analysis::Report;
use chatlens::cli::{Args, ReportFormat};
use chatlens::config::ChatlensConfig;
use chatlens::output::{OutputFormat, write_json_value, write_to_format};
use chatlens::parser::ChatParser;
use chatlens::{ChatlensError, ParseReport};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `-v`/`-q`.
fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatlens={}", args.log_level())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            ChatlensConfig::from_json_file(path)?
        }
        None => ChatlensConfig::default(),
    };
    let filter = args.apply_filter_flags(config.filter);
    let mut analysis = config.analysis;
    if let Some(top) = args.top {
        analysis.top_emojis = top;
    }

    let parsed = ChatParser::with_config(filter).parse_file(&args.input)?;
    let parse_time = start.elapsed();

    let exported = match &args.output {
        Some(path) => {
            let format = export_format(args, path);
            write_to_format(&parsed.table, path, format)?;
            info!(path = %path.display(), %format, rows = parsed.table.len(), "table exported");
            Some((path.as_path(), format))
        }
        None => None,
    };

    let report = Report::build(&parsed.table, &analysis)?;

    match args.report {
        ReportFormat::Text => {
            print_header(args, &parsed.report, parse_time.as_secs_f64());
            if let Some((path, format)) = exported {
                println!("💾 Output:  {} ({})", path.display(), format);
            }
            println!();
            print!("{report}");
        }
        ReportFormat::Json => write_json_value(&report, io::stdout().lock())?,
        ReportFormat::Skip => {}
    }

    info!(elapsed = ?start.elapsed(), "done");
    Ok(())
}

/// Explicit `--format` wins, then the output extension, then CSV.
fn export_format(args: &Args, path: &Path) -> OutputFormat {
    if let Some(format) = args.format {
        return format.into();
    }
    OutputFormat::from_path(path).unwrap_or_else(|e| {
        warn!(error = %e, "falling back to CSV");
        OutputFormat::Csv
    })
}

fn print_header(args: &Args, report: &ParseReport, seconds: f64) {
    println!("📦 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!(
        "⏳ Parsed {} lines into {} messages ({:.2}s)",
        report.lines_read, report.records_kept, seconds
    );
    if report.skipped() > 0 {
        println!(
            "🔍 Skipped: {} system, {} media, {} own, {} invalid date",
            report.excluded_system_events,
            report.excluded_media,
            report.excluded_self_author,
            report.invalid_timestamps
        );
    }
}
