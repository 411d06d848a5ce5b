//! Operator CLI for a Vasa store.
//!
//! # Responsibility
//! - Create/migrate a store file and load the demo dataset (`init-db`).
//! - Print live producer summaries (`summary`).
//! - Verify core crate wiring (`ping`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;
use vasa_core::repo::summary_repo::SqliteSummaryRepository;
use vasa_core::{default_log_level, init_logging, open_db, seed_demo_data, Page, SummaryService};

#[derive(Parser)]
#[command(name = "vasa")]
#[command(about = "Vasa producer traceability store tools")]
struct Cli {
    /// Log level (trace|debug|info|warn|error); logs go to stderr
    #[arg(long, global = true, env = "VASA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create or migrate the store, then insert the demo dataset if missing
    InitDb {
        /// SQLite database file
        #[arg(long, env = "VASA_DATABASE_PATH", default_value = "vasa.sqlite3")]
        database: PathBuf,
    },

    /// Print one line per producer with parcel count and dry weight
    Summary {
        /// SQLite database file
        #[arg(long, env = "VASA_DATABASE_PATH", default_value = "vasa.sqlite3")]
        database: PathBuf,
        /// Maximum rows to print
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Print core ping and version
    Ping,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, None) {
        eprintln!("vasa: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("vasa: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::InitDb { database } => {
            let conn = open_db(&database).map_err(|err| err.to_string())?;
            let report = seed_demo_data(&conn).map_err(|err| err.to_string())?;
            println!("database={}", database.display());
            println!(
                "seeded producers={} parcels={} products={}",
                report.producers, report.parcels, report.products
            );
            if !report.inserted_any() {
                println!("demo data already present");
            }
        }
        Command::Summary { database, limit } => {
            let conn = open_db(&database).map_err(|err| err.to_string())?;
            let summaries = SummaryService::new(SqliteSummaryRepository::new(&conn))
                .list_summaries(&Page { limit, offset: 0 })
                .map_err(|err| err.to_string())?;
            println!(
                "{:>6}  {:<28} {:<12} {:>7} {:>12}",
                "id", "name", "region", "parcels", "dry_kg"
            );
            for row in summaries {
                println!(
                    "{:>6}  {:<28} {:<12} {:>7} {:>12.2}",
                    row.producer_id,
                    row.name,
                    row.region.as_deref().unwrap_or("-"),
                    row.parcels_count,
                    row.total_dry_kg
                );
            }
        }
        Command::Ping => {
            println!("vasa_core ping={}", vasa_core::ping());
            println!("vasa_core version={}", vasa_core::core_version());
        }
    }
    Ok(())
}
