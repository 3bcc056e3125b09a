//! Label Evaluation CLI
//!
//! Computes event-type, sentiment and ticker macro-F1 for a prediction file
//! against a gold file.
//!
//! ## Quick Start
//!
//! ```bash
//! # Summary only
//! ./label-eval score --gold ./gold.json --pred ./pred.json
//!
//! # Per-class tables, null tickers excluded, JSON report
//! ./label-eval score \
//!     --gold ./gold.json \
//!     --pred ./pred.json \
//!     --include-null-in-ticker false \
//!     --pretty \
//!     --output results/eval.json
//!
//! # Check a file's shape and label hygiene without scoring
//! ./label-eval validate --file ./pred.json
//! ```
//!
//! ## Configuration
//!
//! Defaults can be set in `label-eval.toml`; command-line flags win.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use label_eval::config::{parse_bool_flag, EvalConfig};
use label_eval::normalize::{normalize_all, resolve_event_type, resolve_sentiment, resolve_ticker};
use label_eval::records::ResultsFile;
use label_eval::scoring::{evaluate, ReportDocument};

#[derive(Parser)]
#[command(name = "label-eval")]
#[command(about = "Macro-F1 evaluation for event type, sentiment and ticker predictions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a prediction file against a gold file
    Score {
        /// Path to gold JSON file
        #[arg(short, long)]
        gold: PathBuf,

        /// Path to prediction JSON file
        #[arg(short, long)]
        pred: PathBuf,

        /// Include null tickers as a class in ticker macro-F1 (true/false)
        #[arg(long)]
        include_null_in_ticker: Option<String>,

        /// Pretty-print per-class metrics
        #[arg(long)]
        pretty: bool,

        /// Show how many labels needed alias resolution or a default
        #[arg(long)]
        diagnostics: bool,

        /// Output file for the full report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to config file (TOML); defaults to ./label-eval.toml if present
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a results file and summarize its labels
    Validate {
        /// Path to the results JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            gold,
            pred,
            include_null_in_ticker,
            pretty,
            diagnostics,
            output,
            config,
        } => {
            let mut config = match config {
                Some(path) => EvalConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {:?}", path))?,
                None => EvalConfig::load_default()?,
            };
            if let Some(flag) = include_null_in_ticker {
                config.include_null_ticker = parse_bool_flag(&flag);
            }
            config.pretty |= pretty;
            config.diagnostics |= diagnostics;
            if output.is_some() {
                config.output = output;
            }

            run_score(&gold, &pred, &config)?;
        }

        Commands::Validate { file } => {
            validate_file(&file)?;
        }
    }

    Ok(())
}

/// Score predictions and print the summary (and optionally tables/report)
fn run_score(gold_path: &Path, pred_path: &Path, config: &EvalConfig) -> Result<()> {
    let gold = ResultsFile::load(gold_path)
        .with_context(|| format!("Failed to load gold file: {:?}", gold_path))?;
    let pred = ResultsFile::load(pred_path)
        .with_context(|| format!("Failed to load prediction file: {:?}", pred_path))?;

    let report = evaluate(&gold.records, &pred.records, config.include_null_ticker)?;

    println!("{}", report.format_summary());

    if config.pretty {
        println!("{}", report.format_tables());
    }

    if config.diagnostics {
        println!("{}", report.format_diagnostics());
    }

    if let Some(output) = &config.output {
        ReportDocument::new(&gold, &pred, report)
            .save(output)
            .with_context(|| format!("Failed to write report: {:?}", output))?;
        println!("Results saved to {:?}", output);
    }

    Ok(())
}

/// Validate a results file
fn validate_file(path: &Path) -> Result<()> {
    println!("Validating {:?}...", path);

    let file = ResultsFile::load(path)?;
    let records = &file.records;

    let (_, event_stats) =
        normalize_all(records.iter().map(|r| r.event_type.as_deref()), resolve_event_type);
    let (_, sentiment_stats) =
        normalize_all(records.iter().map(|r| r.sentiment.as_deref()), resolve_sentiment);
    let (_, ticker_stats) =
        normalize_all(records.iter().map(|r| r.ticker.as_deref()), resolve_ticker);

    println!("✓ Valid results file");
    println!("  Records: {}", file.len());
    println!("  SHA-256: {}", file.fingerprint);
    println!("  Label resolution:");
    println!("    Event-type: {}", event_stats.format_summary());
    println!("    Sentiment:  {}", sentiment_stats.format_summary());
    println!("    Ticker:     {}", ticker_stats.format_summary());

    let fallbacks = event_stats.fallback + sentiment_stats.fallback;
    if fallbacks > 0 {
        println!(
            "\n  ⚠ {} labels were unrecognized and will be scored as the field default",
            fallbacks
        );
    }

    Ok(())
}
