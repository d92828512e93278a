//! # Sediment CLI (`sediment`)
//!
//! ## Usage
//!
//! ```bash
//! sediment --config ./config/sediment.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `sediment init` | Create the SQLite database, sample table and indexes |
//! | `sediment ingest <csv>` | Sanitize a CSV file and store its samples |
//! | `sediment get <sample_id>` | Print the sample having a `Sample_ID` |
//! | `sediment serve` | Start the HTTP read API |
//!
//! Settings come from the TOML file, then `SEDIMENT_DB_PATH`,
//! `SEDIMENT_COLLECTION` and `SEDIMENT_BIND` (a `.env` file is honoured).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sediment_harness::{config, get, ingest, logging, migrate, server};

/// Sediment sample ingestion and lookup.
#[derive(Parser)]
#[command(
    name = "sediment",
    about = "Extracts sediment samples from CSV files, stores them, and serves them by Sample_ID",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults are used if it does not exist.
    #[arg(long, global = true, default_value = "./config/sediment.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database, sample table and indexes. Idempotent.
    Init,

    /// Extract samples from a CSV file and store them in the database.
    ///
    /// Samples whose (Study_Code, Sample_ID) pair is already stored are
    /// skipped and reported; every other sample is stored.
    Ingest {
        /// The relative or absolute path to the CSV file.
        csv_file_path: PathBuf,

        /// Enable debug output.
        #[arg(long, short = 'd')]
        debug: bool,
    },

    /// Print the sample having the given Sample_ID.
    Get {
        sample_id: String,
    },

    /// Start the HTTP read API on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let debug = matches!(cli.command, Commands::Ingest { debug: true, .. });
    logging::init(debug);

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Ingest { csv_file_path, .. } => {
            ingest::run_ingest(&cfg, &csv_file_path).await?;
        }
        Commands::Get { sample_id } => {
            get::run_get(&cfg, &sample_id).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
