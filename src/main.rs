//! Reading Room: concurrent lending simulation
//!
//! Main entry point that loads configuration, wires the pool and the
//! coordinator together, and runs every reader session to completion.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use reading_room_core::config::AppConfig;
use reading_room_core::error::AppError;
use reading_room_lending::{ConsoleNarrator, LendingCoordinator, LendingRunner};

/// Command-line overrides for the loaded configuration.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration overlay to load from `config/<env>.toml`
    #[arg(long, env = "READING_ROOM_ENV", default_value = "development")]
    env: String,

    /// Number of reader sessions to launch
    #[arg(short, long)]
    readers: Option<usize>,

    /// Maximum number of readers in the room at once
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Maximum number of books one reader may hold
    #[arg(short, long)]
    quota: Option<u32>,

    /// Lower bound of the reading delay in milliseconds
    #[arg(long)]
    min_delay_ms: Option<u64>,

    /// Upper bound (exclusive) of the reading delay in milliseconds
    #[arg(long)]
    max_delay_ms: Option<u64>,

    /// Log format: `pretty` or `json`
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_configuration(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Run failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment, then apply CLI overrides
fn load_configuration(args: &Args) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load(&args.env)?;

    if let Some(readers) = args.readers {
        config.library.readers = readers;
    }
    if let Some(capacity) = args.capacity {
        config.library.max_readers_in_room = capacity;
    }
    if let Some(quota) = args.quota {
        config.library.max_books_per_reader = quota;
    }
    if let Some(min) = args.min_delay_ms {
        config.reading.min_delay_ms = min;
    }
    if let Some(max) = args.max_delay_ms {
        config.reading.max_delay_ms = max;
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
///
/// Log records go to stderr so the narration on stdout stays readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Main run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting reading room v{}", env!("CARGO_PKG_VERSION"));

    let coordinator = LendingCoordinator::from_config(&config, Arc::new(ConsoleNarrator))?;
    let runner = LendingRunner::new(coordinator);

    let report = runner.run(config.library.readers).await?;

    tracing::info!(
        "All {} readers departed ({} books borrowed, peak occupancy {}/{})",
        report.sessions.len(),
        report.books_borrowed(),
        report.pool.peak_occupancy,
        report.pool.room_capacity
    );
    Ok(())
}
