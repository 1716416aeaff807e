//! Catalog Crawler main entry point
//!
//! This is the command-line interface for the course-catalog crawler.

use anyhow::Context;
use catalog_crawler::config::{load_config_with_hash, Config};
use catalog_crawler::crawler::run_crawl;
use catalog_crawler::index::CodeIdMap;
use catalog_crawler::output::{print_statistics, write_index};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog Crawler: a course-catalog crawler and keyword indexer
///
/// Crawls the course catalog from its start page, extracts every course
/// block and writes a word-to-course index of `ID|word` rows.
#[derive(Parser, Debug)]
#[command(name = "catalog-crawler")]
#[command(version)]
#[command(about = "A course-catalog crawler and keyword indexer", long_about = None)]
struct Cli {
    /// Maximum number of pages to visit (overrides the configured max-pages)
    #[arg(value_name = "NUMBER_OF_PAGES", value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Path to the course code to course ID JSON map
    #[arg(long, value_name = "FILE")]
    course_map: Option<PathBuf>,

    /// Path the index file is written to
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;

    if let Some(pages) = cli.pages {
        config.crawler.max_pages = pages;
    }
    if let Some(path) = &cli.course_map {
        config.output.course_map_path = path.display().to_string();
    }
    if let Some(path) = &cli.output {
        config.output.index_path = path.display().to_string();
    }

    let course_map_path = PathBuf::from(&config.output.course_map_path);
    let index_path = PathBuf::from(&config.output.index_path);

    let course_map = CodeIdMap::load(&course_map_path).with_context(|| {
        format!(
            "Failed to load course map from {}",
            course_map_path.display()
        )
    })?;
    tracing::info!(
        "Loaded {} course codes from {}",
        course_map.len(),
        course_map_path.display()
    );

    let report = run_crawl(config, course_map).await.context("Crawl failed")?;

    write_index(&report.index, &index_path)
        .with_context(|| format!("Failed to write index to {}", index_path.display()))?;

    if !cli.quiet {
        print_statistics(&report.stats);
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
            0 => EnvFilter::new("catalog_crawler=info,warn"),
            1 => EnvFilter::new("catalog_crawler=debug,info"),
            2 => EnvFilter::new("catalog_crawler=trace,debug"),
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

/// Loads the configuration file, or the defaults when no file is given
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}
