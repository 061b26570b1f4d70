use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tahsilat", version, about = "Collection receipt scanning and rollup reports")]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the OCR pipeline over a receipt photo and print the JSON result.
    Scan {
        image: PathBuf,
        /// Tesseract language pack (overrides config).
        #[arg(long)]
        lang: Option<String>,
        /// Tesseract data directory (overrides config).
        #[arg(long)]
        tessdata: Option<PathBuf>,
    },
    /// Downscale a receipt photo for storage (never upscales).
    Resize {
        image: PathBuf,
        /// Output path; defaults to `<stem>-web.jpg` next to the input.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Maximum output width in pixels (overrides config).
        #[arg(long)]
        max_width: Option<u32>,
    },
    /// Per-salesperson daily/weekly/monthly rollups over an entries file.
    Report {
        /// JSON array of collection entries.
        entries: PathBuf,
        /// Reference date, YYYY-MM-DD; defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Restrict the report to one salesperson.
        #[arg(long)]
        salesperson: Option<String>,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = config::CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Scan { image, lang, tessdata } => {
            commands::scan(&config, &image, lang, tessdata).await
        }
        Command::Resize { image, out, max_width } => {
            commands::resize(&config, &image, out, max_width).await
        }
        Command::Report { entries, date, salesperson } => {
            commands::report(&entries, date, salesperson.as_deref())
        }
    }
}
