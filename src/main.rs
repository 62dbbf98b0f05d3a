//! Journalist CLI: run one scraping session and print the resulting
//! per-source session records as JSON.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use journalist::cli::Cli;
use journalist::{Journalist, JournalistConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args.urls, ?args.keywords, depth = args.scrape_depth, "Parsed CLI arguments");

    let mut config = JournalistConfig::default();
    config.base_workspace_path = PathBuf::from(&args.workspace);
    config.max_age_days = args.max_age_days;

    let mut journalist = Journalist::new(config, !args.memory, args.scrape_depth)?;
    info!(
        session_id = %journalist.session_id(),
        persist = journalist.is_persistent(),
        "Session starting"
    );

    let records = journalist.read(&args.urls, &args.keywords).await?;

    for record in &records {
        info!(
            domain = %record.source_domain,
            articles = record.articles_count,
            success_rate = record.session_metadata.success_rate,
            "Source processed"
        );
    }
    if let Some(path) = journalist.session_path() {
        info!(path = %path.display(), "Session data persisted");
    }

    println!("{}", serde_json::to_string_pretty(&records)?);

    let elapsed = start_time.elapsed();
    info!(
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        records = records.len(),
        "Execution complete"
    );

    Ok(())
}
