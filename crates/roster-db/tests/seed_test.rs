//! Seed runner against an in-memory database.

use roster_core::{Department, Gym, Position};
use roster_db::{seed::DEMO_ORG_ID, Database, DbConfig, DbError};

#[tokio::test]
async fn test_run_all_then_skip() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let seeds = db.seeds();

    let report = seeds.run_all(false).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.batch, 1);
    assert_eq!(
        report.applied,
        vec![("organizations", 1), ("departments", 3), ("positions", 4), ("gyms", 3)]
    );

    let uow = db.unit_of_work();
    assert_eq!(uow.repository::<Department>().count(DEMO_ORG_ID).await.unwrap(), 3);
    assert_eq!(uow.repository::<Position>().count(DEMO_ORG_ID).await.unwrap(), 4);
    assert_eq!(uow.repository::<Gym>().count(DEMO_ORG_ID).await.unwrap(), 3);

    let gyms = uow.repository::<Gym>().find_all(DEMO_ORG_ID).await.unwrap();
    assert!(gyms.iter().all(|g| g.base.created_by == "system:seed-gyms"));

    let status = seeds.status().await.unwrap();
    assert!(status.iter().all(|s| s.is_applied() && s.batch == Some(1)));

    let again = seeds.run_all(false).await.unwrap();
    assert!(again.applied.is_empty());
    assert_eq!(again.skipped.len(), 4);
}

#[tokio::test]
async fn test_force_rerun_and_rollback() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let seeds = db.seeds();
    seeds.run_all(false).await.unwrap();

    let report = seeds.run_named("gyms", true).await.unwrap();
    assert!(report.is_success());
    assert_eq!(report.batch, 2);
    assert_eq!(report.applied, vec![("gyms", 3)]);

    // Cleared before rerunning, so no duplicates
    let uow = db.unit_of_work();
    assert_eq!(uow.repository::<Gym>().count(DEMO_ORG_ID).await.unwrap(), 3);

    // Latest batch only
    assert_eq!(seeds.rollback().await.unwrap(), vec!["gyms"]);
    assert_eq!(uow.repository::<Gym>().count(DEMO_ORG_ID).await.unwrap(), 0);
    assert_eq!(uow.repository::<Department>().count(DEMO_ORG_ID).await.unwrap(), 3);

    assert_eq!(
        seeds.rollback().await.unwrap(),
        vec!["positions", "departments", "organizations"]
    );
    assert!(db.organizations().find_by_id(DEMO_ORG_ID).await.unwrap().is_none());
    assert!(seeds.rollback().await.unwrap().is_empty());
    assert!(seeds.status().await.unwrap().iter().all(|s| !s.is_applied()));
}

#[tokio::test]
async fn test_unknown_seeder() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let err = db.seeds().run_named("payroll", false).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidIdentifier { .. }));
}
