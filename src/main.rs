//! srcsnap - source snapshot aggregator
//!
//! A CLI tool that concatenates an ordered list of source files into
//! a single reviewable text artifact.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, unwritable output, bad config, etc.)
//!   2 - Files missing with --strict set

mod cli;
mod config;
mod error;
mod models;
mod report;
mod snapshot;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use models::SectionStatus;
use snapshot::{Aggregator, AggregatorConfig};
use std::path::Path;
use tracing::{debug, error, warn, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration first so it can raise the log level
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(effective_log_level(&args, &config));

    debug!("srcsnap v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    match run_snapshot(&args, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Snapshot failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .srcsnap.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to list the files to aggregate and the output path.");
    Ok(())
}

/// `--quiet` wins over a config-enabled `verbose`.
fn effective_log_level(args: &Args, config: &Config) -> Level {
    if !args.quiet && config.general.verbose {
        Level::DEBUG
    } else {
        args.log_level()
    }
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` overrides the level picked from `--verbose`/`--quiet`.
fn init_logging(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the snapshot workflow. Returns exit code (0 or 2).
fn run_snapshot(args: &Args, config: &Config) -> Result<i32> {
    let aggregator = Aggregator::new(AggregatorConfig::from(config));

    if aggregator.config().files.is_empty() {
        warn!("No files to aggregate; the snapshot will be empty");
    }

    // Handle --dry-run: resolve files and exit
    if args.dry_run {
        return handle_dry_run(&aggregator, args.strict);
    }

    let output = aggregator.config().output.clone();
    let outcome = aggregator
        .generate()
        .with_context(|| format!("Failed to generate snapshot {}", output.display()))?;

    debug!(
        "Sections: {} | Present: {} | Missing: {} | Bytes: {}",
        outcome.summary.total, outcome.summary.present, outcome.summary.missing, outcome.summary.bytes
    );
    println!("{}", outcome.message());

    Ok(strict_exit_code(args.strict, outcome.summary.missing))
}

/// Exit code 2 when --strict is set and any file was not found.
fn strict_exit_code(strict: bool, missing: usize) -> i32 {
    if strict && missing > 0 {
        eprintln!("⛔ {} file(s) not found. Failing (exit code 2).", missing);
        2
    } else {
        0
    }
}

/// Handle --dry-run: resolve every file, print what would be aggregated, exit.
///
/// --strict applies here too, so a dry run can gate on missing files.
fn handle_dry_run(aggregator: &Aggregator, strict: bool) -> Result<i32> {
    let document = aggregator.collect().context("Dry run failed")?;
    let files = &aggregator.config().files;

    if document.is_empty() {
        println!("No files listed.");
        return Ok(0);
    }

    for (spec, section) in files.iter().zip(&document.sections) {
        match section.status {
            SectionStatus::Present => println!("  📄 {} ({} bytes)", spec, section.body_len()),
            SectionStatus::Missing => println!("  ❓ {} (NOT FOUND)", spec),
        }
    }

    let summary = document.summary();
    println!(
        "\nTotal: {} files ({} present, {} missing). Nothing was written.",
        summary.total, summary.present, summary.missing
    );
    Ok(strict_exit_code(strict, summary.missing))
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is initialized, so failures are returned rather than logged.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
