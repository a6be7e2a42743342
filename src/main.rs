//! Sitemill main entry point
//!
//! This is the command-line interface for the Sitemill sitemap generator.

use clap::Parser;
use sitemill::config::load_config;
use sitemill::crawler;
use sitemill::SitemillError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemill: a crawling XML sitemap generator
///
/// Sitemill crawls one or more configured domains while honoring
/// robots.txt and meta robots directives, applies site-specific filter
/// rules, and writes standards-compliant XML sitemaps (chunked and
/// indexed past 50,000 URLs).
#[derive(Parser, Debug)]
#[command(name = "sitemill")]
#[command(version = "1.0.0")]
#[command(about = "A crawling XML sitemap generator", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Access key; must match the access-key value in the configuration
    #[arg(long, value_name = "KEY")]
    key: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Resume from the visited cache, overriding the configuration
    #[arg(long, conflicts_with = "reset_cache")]
    resume: bool,

    /// Delete the visited cache before crawling, overriding the
    /// configuration
    #[arg(long, conflicts_with = "resume")]
    reset_cache: bool,

    /// Crawl and update the visited cache but write no sitemap files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Nothing runs without the matching key
    if cli.key != config.access_key {
        tracing::error!("Access key does not match the configuration");
        return Err(SitemillError::AccessDenied.into());
    }

    if cli.resume {
        config.cache.resume = true;
        config.cache.reset = false;
    }
    if cli.reset_cache {
        config.cache.reset = true;
        config.cache.resume = false;
    }

    let outcome = crawler::run(&config, cli.dry_run).await?;

    if !cli.quiet {
        println!("=== Sitemill Run Summary ===\n");
        println!("{}\n", outcome.log.summary());

        if cli.dry_run {
            println!("Dry run: no sitemap files written");
        } else {
            println!("Generated files:");
            for file in &outcome.files {
                println!("  {} -> {}", file.path.display(), file.url);
            }
        }
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
            0 => EnvFilter::new("sitemill=info,warn"),
            1 => EnvFilter::new("sitemill=debug,info"),
            2 => EnvFilter::new("sitemill=trace,debug"),
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
