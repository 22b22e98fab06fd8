//! # Demo Data Seeders
//!
//! Registered seeders that populate a demo tenant, with a history table so
//! runs can be inspected and rolled back.
//!
//! ## Batches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seed            → batch 1: organizations, departments, positions, gyms │
//! │  seed            → nothing to do (all applied)                          │
//! │  seed --rollback → undo batch 1 in reverse: gyms, positions, ...        │
//! │  seed --name gyms --force → clear + rerun gyms as a new batch           │
//! │                                                                         │
//! │  Each seeder runs in its own transaction together with its             │
//! │  _seed_history row, so a failed seeder leaves no trace.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Seeded rows carry `CreatedBy = "system:seed-<name>"`, which is how a
//! rollback finds them.

use chrono::{DateTime, Utc};
use roster_core::{
    CreateDepartment, CreateGym, CreatePosition, Department, Gym, Model, Position, RequestContext,
};
use serde::Serialize;
use sqlx::FromRow;
use tracing::{info, warn};

use crate::entity::Entity;
use crate::error::{DbError, DbResult};
use crate::query::Query;
use crate::unit_of_work::UnitOfWork;

/// Uid of the demo tenant every seeder writes to.
pub const DEMO_ORG_ID: &str = "00000000-0000-4000-8000-000000000001";

pub const DEMO_ORG_NAME: &str = "Demo Fitness Group";

const DEPARTMENTS: &[(&str, &str)] = &[
    ("Training", "Coaches and class instructors"),
    ("Front Desk", "Memberships and check-in"),
    ("Maintenance", "Equipment and facilities"),
];

/// (department, title, openings)
const POSITIONS: &[(&str, &str, i64)] = &[
    ("Training", "Personal Trainer", 3),
    ("Training", "Group Fitness Instructor", 2),
    ("Front Desk", "Membership Advisor", 1),
    ("Maintenance", "Facilities Technician", 1),
];

/// (name, address, capacity)
const GYMS: &[(&str, &str, i64)] = &[
    ("Downtown Club", "12 Main Street", 250),
    ("Riverside Studio", "4 Quay Road", 80),
    ("Northside Performance", "301 North Avenue", 150),
];

// =============================================================================
// Seeders
// =============================================================================

/// A registered seeder. Order of [`Seeder::ALL`] is the run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeder {
    Organizations,
    Departments,
    Positions,
    Gyms,
}

impl Seeder {
    pub const ALL: [Seeder; 4] = [
        Seeder::Organizations,
        Seeder::Departments,
        Seeder::Positions,
        Seeder::Gyms,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Seeder::Organizations => "organizations",
            Seeder::Departments => "departments",
            Seeder::Positions => "positions",
            Seeder::Gyms => "gyms",
        }
    }

    pub fn from_name(name: &str) -> Option<Seeder> {
        Seeder::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    fn context(&self) -> RequestContext {
        RequestContext::system(DEMO_ORG_ID, &format!("seed-{}", self.name()))
    }

    /// Inserts this seeder's rows. Returns the number of rows written.
    async fn run(&self, uow: &UnitOfWork) -> DbResult<u64> {
        let ctx = self.context();
        let now = Utc::now();

        match self {
            Seeder::Organizations => {
                let query = Query::new(
                    "INSERT INTO Organizations (Uid, Name, IsActive, CreatedOn) \
                     VALUES (?, ?, 1, ?) ON CONFLICT(Uid) DO NOTHING",
                )
                .bind(DEMO_ORG_ID)
                .bind(DEMO_ORG_NAME)
                .bind(now);
                Ok(uow.executor().insert(&query).await?.affected_rows)
            }

            Seeder::Departments => {
                let rows: Vec<Department> = DEPARTMENTS
                    .iter()
                    .map(|(name, description)| {
                        stamped::<Department>(
                            &CreateDepartment {
                                name: name.to_string(),
                                description: Some(description.to_string()),
                            },
                            &ctx,
                            now,
                        )
                    })
                    .collect();
                uow.repository::<Department>().create_many(&rows).await
            }

            Seeder::Positions => {
                let departments = uow.repository::<Department>().find_all(DEMO_ORG_ID).await?;

                let mut rows = Vec::with_capacity(POSITIONS.len());
                for (department, title, openings) in POSITIONS {
                    let parent = departments
                        .iter()
                        .find(|d| d.name == *department)
                        .ok_or_else(|| DbError::not_found("Department", *department))?;

                    rows.push(stamped::<Position>(
                        &CreatePosition {
                            department_uid: parent.base.uid.clone(),
                            title: title.to_string(),
                            description: None,
                            openings: Some(*openings),
                        },
                        &ctx,
                        now,
                    ));
                }
                uow.repository::<Position>().create_many(&rows).await
            }

            Seeder::Gyms => {
                let rows: Vec<Gym> = GYMS
                    .iter()
                    .map(|(name, address, capacity)| {
                        stamped::<Gym>(
                            &CreateGym {
                                name: name.to_string(),
                                address: Some(address.to_string()),
                                phone: None,
                                capacity: Some(*capacity),
                            },
                            &ctx,
                            now,
                        )
                    })
                    .collect();
                uow.repository::<Gym>().create_many(&rows).await
            }
        }
    }

    /// Removes the rows this seeder wrote.
    async fn clear(&self, uow: &UnitOfWork) -> DbResult<u64> {
        let query = match self {
            Seeder::Organizations => {
                Query::new("DELETE FROM Organizations WHERE Uid = ?").bind(DEMO_ORG_ID)
            }
            other => {
                let table = uow.table(other.entity_name())?;
                Query::new(format!(
                    "DELETE FROM {} WHERE OrgId = ? AND CreatedBy = ?",
                    table.name
                ))
                .bind(DEMO_ORG_ID)
                .bind(other.context().user_id)
            }
        };
        Ok(uow.executor().delete(&query).await?.affected_rows)
    }

    fn entity_name(&self) -> &'static str {
        match self {
            Seeder::Organizations => "Organization",
            Seeder::Departments => Department::NAME,
            Seeder::Positions => Position::NAME,
            Seeder::Gyms => Gym::NAME,
        }
    }
}

fn stamped<E: Entity>(model: &E::Create, ctx: &RequestContext, now: DateTime<Utc>) -> E {
    let mut entity = E::from_create(model);
    entity.base_mut().stamp_created(ctx, now);
    entity
}

// =============================================================================
// History and Reports
// =============================================================================

#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct HistoryRow {
    name: String,
    batch: i64,
    rows: i64,
    applied_on: DateTime<Utc>,
}

/// One line of `seed --status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedStatus {
    pub name: &'static str,
    pub batch: Option<i64>,
    pub rows: Option<i64>,
    pub applied_on: Option<DateTime<Utc>>,
}

impl SeedStatus {
    pub fn is_applied(&self) -> bool {
        self.applied_on.is_some()
    }
}

/// Outcome of a seed run.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub batch: i64,
    /// Seeders that ran, with rows written.
    pub applied: Vec<(&'static str, u64)>,
    /// Seeders already applied and not forced.
    pub skipped: Vec<&'static str>,
    /// The seeder that failed. Later seeders do not run.
    pub failures: Vec<(&'static str, DbError)>,
}

impl SeedReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// =============================================================================
// Runner
// =============================================================================

/// Runs seeders and maintains `_seed_history`.
#[derive(Debug, Clone)]
pub struct SeedRunner {
    uow: UnitOfWork,
}

impl SeedRunner {
    pub fn new(uow: UnitOfWork) -> Self {
        SeedRunner { uow }
    }

    /// Every registered seeder with its applied state.
    pub async fn status(&self) -> DbResult<Vec<SeedStatus>> {
        let history: Vec<HistoryRow> = self
            .uow
            .executor()
            .select(&Query::new(
                "SELECT Name, Batch, Rows, AppliedOn FROM _seed_history",
            ))
            .await?;

        Ok(Seeder::ALL
            .iter()
            .map(|seeder| {
                let row = history.iter().find(|h| h.name == seeder.name());
                SeedStatus {
                    name: seeder.name(),
                    batch: row.map(|r| r.batch),
                    rows: row.map(|r| r.rows),
                    applied_on: row.map(|r| r.applied_on),
                }
            })
            .collect())
    }

    /// Runs every pending seeder (or all of them with `force`) as one batch.
    pub async fn run_all(&self, force: bool) -> DbResult<SeedReport> {
        self.run(&Seeder::ALL, force).await
    }

    /// Runs one seeder by name.
    pub async fn run_named(&self, name: &str, force: bool) -> DbResult<SeedReport> {
        let seeder = Seeder::from_name(name).ok_or_else(|| DbError::invalid_identifier(name))?;
        self.run(&[seeder], force).await
    }

    async fn run(&self, seeders: &[Seeder], force: bool) -> DbResult<SeedReport> {
        let status = self.status().await?;
        let mut report = SeedReport {
            batch: self.next_batch().await?,
            ..SeedReport::default()
        };

        for seeder in seeders.iter().copied() {
            let applied = status
                .iter()
                .any(|s| s.name == seeder.name() && s.is_applied());

            if applied && !force {
                report.skipped.push(seeder.name());
                continue;
            }

            // The organization seeder is idempotent; clearing it would
            // cascade into every other seeder's rows.
            let rerun = applied && seeder != Seeder::Organizations;

            match self.run_one(seeder, report.batch, rerun).await {
                Ok(rows) => {
                    info!(seeder = seeder.name(), rows, batch = report.batch, "Seeder applied");
                    report.applied.push((seeder.name(), rows));
                }
                Err(err) => {
                    warn!(seeder = seeder.name(), error = %err, "Seeder failed");
                    report.failures.push((seeder.name(), err));
                    break;
                }
            }
        }

        Ok(report)
    }

    async fn run_one(&self, seeder: Seeder, batch: i64, rerun: bool) -> DbResult<u64> {
        self.uow
            .transaction(|tx| async move {
                if rerun {
                    seeder.clear(&tx).await?;
                }
                let rows = seeder.run(&tx).await?;

                let history = Query::new(
                    "INSERT INTO _seed_history (Name, Batch, Rows, AppliedOn) VALUES (?, ?, ?, ?) \
                     ON CONFLICT(Name) DO UPDATE SET Batch = excluded.Batch, \
                     Rows = excluded.Rows, AppliedOn = excluded.AppliedOn",
                )
                .bind(seeder.name())
                .bind(batch)
                .bind(rows as i64)
                .bind(Utc::now());
                tx.executor().insert(&history).await?;

                Ok::<_, DbError>(rows)
            })
            .await
    }

    /// Undoes the most recent batch in reverse run order.
    ///
    /// Returns the names of the seeders rolled back (empty if nothing was
    /// applied).
    pub async fn rollback(&self) -> DbResult<Vec<&'static str>> {
        let status = self.status().await?;
        let Some(latest) = status.iter().filter_map(|s| s.batch).max() else {
            return Ok(Vec::new());
        };

        let targets: Vec<Seeder> = Seeder::ALL
            .iter()
            .rev()
            .copied()
            .filter(|seeder| {
                status
                    .iter()
                    .any(|s| s.name == seeder.name() && s.batch == Some(latest))
            })
            .collect();

        self.uow
            .transaction(|tx| async move {
                let mut undone = Vec::with_capacity(targets.len());
                for seeder in targets {
                    let rows = seeder.clear(&tx).await?;
                    tx.executor()
                        .delete(&Query::new("DELETE FROM _seed_history WHERE Name = ?").bind(seeder.name()))
                        .await?;
                    info!(seeder = seeder.name(), rows, batch = latest, "Seeder rolled back");
                    undone.push(seeder.name());
                }
                Ok::<_, DbError>(undone)
            })
            .await
    }

    async fn next_batch(&self) -> DbResult<i64> {
        let max = self
            .uow
            .executor()
            .scalar_count(&Query::new("SELECT COALESCE(MAX(Batch), 0) FROM _seed_history"))
            .await?;
        Ok(max + 1)
    }
}
