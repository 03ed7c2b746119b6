//! scholarstreak - Continuous-Author Abstract Collection Pipeline
//!
//! Finds researchers with an unbroken top-venue publication record across a
//! fixed window of years, extracts one representative abstract per author
//! per year from the Semantic Scholar Graph API, and saves them as flat
//! text files with a companion run report.
//!
//! ## Usage
//!
//! ```bash
//! scholarstreak collect --field CS --target 20 --api-key $KEY
//! scholarstreak collect --field CS --target 25 --incremental
//! scholarstreak report --field CS
//! scholarstreak cache clear --field CS
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scholarstreak::cache::FileCache;
use scholarstreak::collector::{self, AbstractCollector, CollectorConfig};
use scholarstreak::fields::FieldProfile;
use scholarstreak::report;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Continuous-Author Abstract Collection Pipeline
#[derive(Parser)]
#[command(name = "scholarstreak")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find continuous authors and collect their abstracts
    Collect {
        /// Research field (CS, CHEMISTRY, BIOLOGY, PHYSICS, MEDICINE)
        #[arg(long, default_value = "CS")]
        field: String,

        /// Output directory (defaults to output_{FIELD})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target number of qualified authors
        #[arg(short, long, default_value = "20")]
        target: usize,

        /// Semantic Scholar API key for a higher request quota
        #[arg(long)]
        api_key: Option<String>,

        /// First year of the required publication window
        #[arg(long, default_value = "2020")]
        from_year: i32,

        /// Last year of the required publication window
        #[arg(long, default_value = "2024")]
        to_year: i32,

        /// Scholar list file (defaults to scholars/{FIELD}_scholars.txt)
        #[arg(long)]
        scholars: Option<PathBuf>,

        /// Ignore any existing progress snapshot and start fresh
        #[arg(long)]
        no_resume: bool,

        /// Only fill the shortfall between complete authors on disk and the target
        #[arg(long)]
        incremental: bool,

        /// Load qualified authors from a JSON file instead of calling the API
        #[arg(long)]
        debug_data: Option<PathBuf>,
    },

    /// Regenerate the collection report from the output directory
    Report {
        /// Research field (CS, CHEMISTRY, BIOLOGY, PHYSICS, MEDICINE)
        #[arg(long, default_value = "CS")]
        field: String,

        /// Output directory (defaults to output_{FIELD})
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// First year of the required publication window
        #[arg(long, default_value = "2020")]
        from_year: i32,

        /// Last year of the required publication window
        #[arg(long, default_value = "2024")]
        to_year: i32,
    },

    /// Manage the API response cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,

        /// Research field (CS, CHEMISTRY, BIOLOGY, PHYSICS, MEDICINE)
        #[arg(long, default_value = "CS")]
        field: String,

        /// Output directory (defaults to output_{FIELD})
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Delete all cached API responses
    Clear,
    /// Show the cache directory path
    Path,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Collect {
            field,
            output,
            target,
            api_key,
            from_year,
            to_year,
            scholars,
            no_resume,
            incremental,
            debug_data,
        } => {
            run_collect(
                field, output, target, api_key, from_year, to_year, scholars, no_resume,
                incremental, debug_data,
            )
            .await
        }
        Commands::Report {
            field,
            output,
            from_year,
            to_year,
        } => run_report(field, output, from_year, to_year),
        Commands::Cache {
            action,
            field,
            output,
        } => handle_cache(action, field, output),
    }
}

// ============================================================================
// Collection Pipeline
// ============================================================================

#[allow(clippy::too_many_arguments)]
async fn run_collect(
    field: String,
    output: Option<PathBuf>,
    target: usize,
    api_key: Option<String>,
    from_year: i32,
    to_year: i32,
    scholars: Option<PathBuf>,
    no_resume: bool,
    incremental: bool,
    debug_data: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        from_year <= to_year,
        "--from-year ({}) must not exceed --to-year ({})",
        from_year,
        to_year
    );

    let output_dir = output.unwrap_or_else(|| default_output_dir(&field));
    println!("Output directory: {}", output_dir.display());

    let config = CollectorConfig {
        field,
        output_dir,
        api_key,
        required_years: (from_year..=to_year).collect(),
        scholars_file: scholars,
        debug_data,
    };
    let collector = AbstractCollector::new(config).context("Failed to initialize collector")?;

    if incremental {
        collector.run_incremental(target).await?;
    } else {
        collector.run(target, !no_resume).await?;
    }

    Ok(())
}

fn run_report(
    field: String,
    output: Option<PathBuf>,
    from_year: i32,
    to_year: i32,
) -> Result<()> {
    anyhow::ensure!(
        from_year <= to_year,
        "--from-year ({}) must not exceed --to-year ({})",
        from_year,
        to_year
    );

    let output_dir = output.unwrap_or_else(|| default_output_dir(&field));
    let profile = FieldProfile::resolve(&field);
    let years: Vec<i32> = (from_year..=to_year).collect();

    // With a progress snapshot the author list is available; otherwise the
    // report falls back to the purely disk-derived variant.
    match collector::load_progress(&output_dir) {
        Some(authors) => {
            report::write_full_report(&output_dir, &profile.name, &years, &authors)
                .context("Failed to write report")?;
        }
        None => {
            report::write_incremental_report(&output_dir, &profile.name, &years)
                .context("Failed to write report")?;
        }
    }

    Ok(())
}

// ============================================================================
// Cache Management
// ============================================================================

fn handle_cache(action: CacheAction, field: String, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| default_output_dir(&field));
    let cache =
        FileCache::new(output_dir.join("cache")).context("Failed to open cache directory")?;

    match action {
        CacheAction::Clear => {
            let removed = cache.clear().context("Failed to clear cache")?;
            println!("Removed {} cache entries.", removed);
        }
        CacheAction::Path => {
            println!("Cache directory: {}", cache.dir().display());
        }
    }

    Ok(())
}

fn default_output_dir(field: &str) -> PathBuf {
    PathBuf::from(format!("output_{}", field.trim().to_uppercase()))
}
