//! CLI for scraping EV charging operator tariffs.

mod fetch;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use console::style;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

use cennik_core::pipeline::OfflineFetcher;
use cennik_core::{build_document, operators, PricingDocument, WriteError};
use fetch::HttpFetcher;

/// Scrape EV charging operator price lists into one pricing document
#[derive(Parser)]
#[command(name = "cennik")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output file
    #[arg(short, long, default_value = "pricing-data.json")]
    output: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Skip all network access and emit the static fallback dataset
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let specs = operators::all();

    // Operator failures are absorbed by the pipelines; only the final
    // write can abort the run
    let document = if cli.offline {
        build_document(&OfflineFetcher, &specs).await
    } else {
        match HttpFetcher::new(Duration::from_secs(cli.timeout)) {
            Ok(fetcher) => build_document(&fetcher, &specs).await,
            Err(err) => {
                warn!(error = %err, "HTTP client unavailable, emitting fallback data");
                build_document(&OfflineFetcher, &specs).await
            }
        }
    };

    write_document(&document, &cli.output)?;

    println!(
        "{} pricing document written to {}",
        style("[OK]").green().bold(),
        cli.output.display()
    );
    for (id, operator) in &document.operators {
        println!(
            "  {} ({}): {} plans, {} promotions",
            operator.name,
            id,
            operator.subscriptions.len(),
            operator.promotions.len()
        );
    }

    Ok(())
}

fn write_document(document: &PricingDocument, path: &PathBuf) -> Result<(), WriteError> {
    let json = serde_json::to_string_pretty(document).map_err(WriteError::Serialize)?;
    fs::write(path, json).map_err(|source| WriteError::File {
        path: path.display().to_string(),
        source,
    })
}
