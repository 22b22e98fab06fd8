//! # Migration Runner
//!
//! Applies the embedded migrations outside the API process.
//!
//! ## Usage
//! ```bash
//! cargo run -p roster-db --bin migrate -- --db ./data/roster.db
//! cargo run -p roster-db --bin migrate -- --db ./data/roster.db --status
//! ```

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use roster_db::migrations::migration_status;
use roster_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Quiet by default so the progress lines stay readable; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./roster_dev.db");
    let mut status_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--status" | "-s" => status_only = true,
            "--help" | "-h" => {
                println!("Usage: migrate [--db PATH] [--status]");
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    let config = DbConfig::new(&db_path).run_migrations(false);
    let db = match Database::new(config).await {
        Ok(db) => db,
        Err(e) => {
            println!("✗ Could not open {db_path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !status_only {
        if let Err(e) = db.run_migrations().await {
            println!("✗ {e}");
            return ExitCode::FAILURE;
        }
        println!("✓ Migrations applied to {db_path}");
    }

    let code = match migration_status(db.pool()).await {
        Ok((total, applied)) => {
            println!("Applied {applied}/{total} migrations");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ Could not read migration status: {e}");
            ExitCode::FAILURE
        }
    };

    db.close().await;
    code
}
