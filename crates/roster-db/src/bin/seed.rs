//! # Seed Runner
//!
//! Populates the demo tenant with departments, positions and gyms.
//!
//! ## Usage
//! ```bash
//! # Run every pending seeder as one batch
//! cargo run -p roster-db --bin seed
//!
//! # Show which seeders have been applied
//! cargo run -p roster-db --bin seed -- --status
//!
//! # Undo the most recent batch
//! cargo run -p roster-db --bin seed -- --rollback
//!
//! # Rerun a single seeder
//! cargo run -p roster-db --bin seed -- --name gyms --force
//!
//! # Specify database path
//! cargo run -p roster-db --bin seed -- --db ./data/roster.db
//! ```
//!
//! Exits with status 1 when any seeder fails.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use roster_db::seed::{DEMO_ORG_ID, DEMO_ORG_NAME};
use roster_db::{Database, DbConfig, SeedReport, Seeder};

enum Mode {
    Run,
    Status,
    Rollback,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Quiet by default so the progress lines stay readable; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./roster_dev.db");
    let mut mode = Mode::Run;
    let mut name: Option<String> = None;
    let mut force = false;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--name" | "-n" => {
                if i + 1 < args.len() {
                    name = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--status" | "-s" => mode = Mode::Status,
            "--rollback" | "-r" => mode = Mode::Rollback,
            "--force" | "-f" => force = true,
            "--json" => json = true,
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    println!("🌱 Roster Seed Runner");
    println!("=====================");
    println!("Database: {}", db_path);
    println!("Tenant:   {} ({})", DEMO_ORG_NAME, DEMO_ORG_ID);
    println!();

    let db = match Database::new(DbConfig::new(&db_path)).await {
        Ok(db) => db,
        Err(e) => {
            println!("✗ Could not open database: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("✓ Connected to database");
    println!("✓ Migrations applied");
    println!();

    let seeds = db.seeds();

    let code = match mode {
        Mode::Status => match seeds.status().await {
            Ok(status) if json => match serde_json::to_string_pretty(&status) {
                Ok(out) => {
                    println!("{out}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    println!("✗ Could not render status: {e}");
                    ExitCode::FAILURE
                }
            },
            Ok(status) => {
                println!("{:<15} {:<7} {:<6} APPLIED", "SEEDER", "BATCH", "ROWS");
                for s in status {
                    println!(
                        "{:<15} {:<7} {:<6} {}",
                        s.name,
                        s.batch.map_or("-".to_string(), |b| b.to_string()),
                        s.rows.map_or("-".to_string(), |r| r.to_string()),
                        s.applied_on
                            .map_or("pending".to_string(), |t| t.to_rfc3339())
                    );
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("✗ Could not read seed history: {e}");
                ExitCode::FAILURE
            }
        },

        Mode::Rollback => match seeds.rollback().await {
            Ok(undone) if undone.is_empty() => {
                println!("Nothing to roll back.");
                ExitCode::SUCCESS
            }
            Ok(undone) => {
                for name in undone {
                    println!("↩ Rolled back {name}");
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("✗ Rollback failed: {e}");
                ExitCode::FAILURE
            }
        },

        Mode::Run => {
            let result = match name.as_deref() {
                Some(name) => {
                    if Seeder::from_name(name).is_none() {
                        println!("✗ Unknown seeder '{name}'");
                        let known: Vec<_> = Seeder::ALL.iter().map(Seeder::name).collect();
                        println!("  Known seeders: {}", known.join(", "));
                        return ExitCode::FAILURE;
                    }
                    seeds.run_named(name, force).await
                }
                None => seeds.run_all(force).await,
            };

            match result {
                Ok(report) => print_report(&report),
                Err(e) => {
                    println!("✗ Seeding failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    };

    db.close().await;
    code
}

fn print_report(report: &SeedReport) -> ExitCode {
    println!("Batch {}", report.batch);
    for (name, rows) in &report.applied {
        println!("  ✓ {name:<15} {rows} rows");
    }
    for name in &report.skipped {
        println!("  · {name:<15} already applied (use --force to rerun)");
    }

    if report.is_success() {
        println!();
        println!("✓ Seed complete!");
        return ExitCode::SUCCESS;
    }

    println!();
    println!("✗ {} seeder(s) failed:", report.failures.len());
    for (name, err) in &report.failures {
        println!("  - {name}: {err}");
    }
    ExitCode::FAILURE
}

fn print_help() {
    println!("Roster Seed Runner");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>      Database file path (default: ./roster_dev.db)");
    println!("  -s, --status         List seeders and when they were applied");
    println!("      --json           With --status, print JSON");
    println!("  -r, --rollback       Undo the most recent batch");
    println!("  -n, --name <NAME>    Run only the named seeder");
    println!("  -f, --force          Rerun seeders that were already applied");
    println!("  -h, --help           Show this help message");
}
