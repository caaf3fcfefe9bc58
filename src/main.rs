//! Pagecrawl main entry point
//!
//! This is the command-line interface for the Pagecrawl text harvester.

use anyhow::Context;
use clap::Parser;
use pagecrawl::config::{load_config_with_hash, Config};
use pagecrawl::crawler::crawl;
use pagecrawl::output::{load_statistics, print_report, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pagecrawl: a breadth-first text harvester
///
/// Pagecrawl starts from the given seed URLs, follows links level by level,
/// and keeps the visible text of every page with enough words. Pages are
/// written to a directory of numbered text files with a tab-separated index.
#[derive(Parser, Debug)]
#[command(name = "pagecrawl")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first text harvester", long_about = None)]
struct Cli {
    /// Seed URLs to start crawling from
    #[arg(value_name = "URL")]
    seeds: Vec<String>,

    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and seeds without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics of the archive from a previous run and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Nothing to crawl, nothing to do
    if cli.seeds.is_empty() && !cli.stats {
        return Ok(());
    }

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.seeds);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config, cli.seeds, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagecrawl=info,warn"),
            1 => EnvFilter::new("pagecrawl=debug,info"),
            2 => EnvFilter::new("pagecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, seeds: &[String]) {
    println!("=== Pagecrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page quota: {}", config.crawler.min_pages);
    println!("  Minimum words per page: {}", config.crawler.min_words);
    println!("  Delay between requests: {}ms", config.crawler.request_delay_ms);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput:");
    println!("  Pages directory: {}", config.output.pages_dir.display());
    println!("  Index manifest: {}", config.output.index_path.display());

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        match pagecrawl::url::canonical_seed(seed) {
            Some(canonical) => println!("  - {}", canonical),
            None => println!("  - {} (invalid, will be ignored)", seed),
        }
    }
}

/// Handles the --stats mode: inspects the archive of a previous run
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Index manifest: {}\n", config.output.index_path.display());

    let stats = load_statistics(&config.output).context("Failed to read crawl archive")?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, seeds: Vec<String>, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Writing pages to {} and index to {}",
        config.output.pages_dir.display(),
        config.output.index_path.display()
    );

    match crawl(seeds, config).await {
        Ok(report) => {
            if !quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).context("Crawl could not start")
        }
    }
}
