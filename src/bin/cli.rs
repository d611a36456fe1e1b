//! JupiterWeb Crawler CLI
//!
//! Scrapes lectures (default) or courses (`--cursos`) into `OUTPUT_DIR`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use jupiter_crawler::{
    error::Result,
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::http::{self, PageSource},
};

/// JupiterWeb catalog crawler
#[derive(Parser, Debug)]
#[command(
    name = "jupiter-crawler",
    version,
    about = "Scrapes JupiterWeb subjects, classrooms and course curricula into JSON"
)]
struct Cli {
    /// Directory the JSON files are written to
    output_dir: PathBuf,

    /// Only crawl these unit codes
    #[arg(short, long, num_args = 1..)]
    units: Option<Vec<String>>,

    /// Maximum detail fetches in flight [config default: 50]
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Detail page timeout in seconds [config default: 60]
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Crawl courses and curricula instead of lectures
    #[arg(long)]
    cursos: bool,

    /// Path to config file (default: {output_dir}/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let started = Instant::now();
    log::info!("JupiterWeb crawler starting...");

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.output_dir.join("config.toml"));
    let mut config = Config::load_or_default(&config_path);

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.timeout_secs = timeout;
    }
    config.validate()?;

    log::info!(
        "Concurrency {}, detail timeout {}s",
        config.crawler.max_concurrent,
        config.crawler.timeout_secs
    );

    let source: Arc<dyn PageSource> = Arc::new(http::create_async_client(&config.crawler)?);
    let storage = LocalStorage::new(&cli.output_dir, config.output.clone());
    let units = cli.units.as_deref();

    let summary = if cli.cursos {
        pipeline::run_courses(&config, source, &storage, units).await?
    } else {
        pipeline::run_lectures(&config, source, &storage, units).await?
    };

    log::info!(
        "Wrote {} records to {}",
        summary.record_count,
        cli.output_dir.display()
    );
    log::info!("Finished in {:.2?}", started.elapsed());

    Ok(())
}
