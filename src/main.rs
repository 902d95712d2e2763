//! CLI entry point for the QA card reporter.
//!
//! Provides subcommands for generating the summary artifact from a
//! spreadsheet, inspecting its week partitions, and exporting weekly
//! channel counts to CSV.

use anyhow::Result;
use clap::{Parser, Subcommand};
use qa_card_reporter::{
    analyzers::types::Summary,
    fetch::{BasicClient, fetch_bytes},
    loader::load_table,
    output,
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "qa_card_reporter")]
#[command(about = "A tool to aggregate QA review cards into release analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the summary JSON from a spreadsheet file or URL
    Generate {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// File to write the summary JSON to
        #[arg(short, long, default_value = "summary.json")]
        output: String,

        /// Also log the summary JSON
        #[arg(long, default_value_t = false)]
        print: bool,
    },
    /// List the week partitions found in a spreadsheet
    Weeks {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Append per-week channel counts to a CSV file
    ExportWeekly {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append rows to
        #[arg(short, long, default_value = "weekly.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/qa_card_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("qa_card_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            source,
            output,
            print,
        } => {
            let bytes = fetcher(&source).await?;
            let table = load_table(bytes)?;
            let summary = Summary::build(&table);

            output::write_summary(&output, &summary)?;
            if print {
                output::print_json(&summary)?;
            }

            info!(
                cards = summary.reviewers.historical.total_reviewed,
                weeks = summary.total_weeks,
                artifact = %output,
                "Report generated"
            );
        }
        Commands::Weeks { source } => {
            let bytes = fetcher(&source).await?;
            let table = load_table(bytes)?;

            for week in &table.weeks {
                let cards = table.week_cards(week).count();
                let rejected = table.week_cards(week).filter(|c| c.is_rejected()).count();
                info!(week = %week, cards, rejected, "Week partition");
            }

            info!(
                total_weeks = table.weeks.len(),
                total_cards = table.cards.len(),
                "Week partition summary"
            );
        }
        Commands::ExportWeekly { source, output } => {
            let bytes = fetcher(&source).await?;
            let table = load_table(bytes)?;
            let summary = Summary::build(&table);

            let records = output::weekly_records(&summary);
            output::append_weekly_records(&output, &records)?;

            info!(rows = records.len(), path = %output, "Weekly counts exported");
        }
    }

    Ok(())
}

/// Loads workbook bytes from a local file path or fetches them over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetcher(source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, source).await?
    } else {
        std::fs::read(source)?
    };
    Ok(bytes)
}
