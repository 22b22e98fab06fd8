//! Integration tests for the generic repository against in-memory SQLite.

use chrono::{Duration, Utc};
use roster_core::{
    CreateDepartment, CreateGym, CreatePosition, Department, Filter, Gym, Model,
    Position, RequestContext, SortOrder,
};
use roster_db::{Database, DbConfig, DbError, ForeignKeyReason, Repository};

const T1: &str = "11111111-1111-4111-8111-111111111111";
const T2: &str = "22222222-2222-4222-8222-222222222222";

async fn setup() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    for (uid, name) in [(T1, "Tenant One"), (T2, "Tenant Two")] {
        db.organizations()
            .insert(&roster_core::Organization {
                uid: uid.to_string(),
                name: name.to_string(),
                is_active: true,
                created_on: Utc::now(),
            })
            .await
            .unwrap();
    }
    db
}

fn gym(tenant: &str, name: &str) -> Gym {
    let mut gym = Gym::from_create(&CreateGym {
        name: name.to_string(),
        ..CreateGym::default()
    });
    gym.base.stamp_created(&RequestContext::new(tenant, "U1"), Utc::now());
    gym
}

fn gyms(db: &Database) -> Repository<Gym> {
    db.unit_of_work().repository::<Gym>()
}

#[tokio::test]
async fn test_create_and_find_by_id() {
    let db = setup().await;
    let repo = gyms(&db);
    let acme = gym(T1, "Acme Gym");

    let inserted = repo.create(&acme).await.unwrap();
    assert_eq!(inserted.insert_id, acme.base.uid);
    assert_eq!(inserted.affected_rows, 1);

    let found = repo.find_by_id(&acme.base.uid, T1).await.unwrap().unwrap();
    assert_eq!(found.name, "Acme Gym");
    assert_eq!(found.base.org_id, T1);
    assert!(found.base.is_active);
    assert!(!found.base.is_deleted);
}

#[tokio::test]
async fn test_find_by_id_never_crosses_tenants() {
    let db = setup().await;
    let repo = gyms(&db);
    let theirs = gym(T2, "Their Gym");
    repo.create(&theirs).await.unwrap();

    assert!(repo.find_by_id(&theirs.base.uid, T1).await.unwrap().is_none());
    assert!(!repo.exists(&theirs.base.uid, T1).await.unwrap());
    assert!(repo.exists(&theirs.base.uid, T2).await.unwrap());
    assert_eq!(repo.count(T1).await.unwrap(), 0);

    // The write-path lookup sees it regardless of tenant
    let any = repo.find_by_id_any_tenant(&theirs.base.uid).await.unwrap();
    assert_eq!(any.map(|g| g.base.org_id), Some(T2.to_string()));
}

#[tokio::test]
async fn test_find_list_pagination() {
    let db = setup().await;
    let repo = gyms(&db);
    let rows: Vec<Gym> = (0..25).map(|i| gym(T1, &format!("Gym {i:02}"))).collect();
    repo.create_many(&rows).await.unwrap();
    repo.create(&gym(T2, "Other tenant")).await.unwrap();

    let page = repo
        .find_list(T1, &Filter::new().page(2).page_size(10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next);
    assert!(page.pagination.has_prev);

    let last = repo
        .find_list(T1, &Filter::new().page(3).page_size(10))
        .await
        .unwrap();
    assert_eq!(last.data.len(), 5);
    assert!(!last.pagination.has_next);
}

#[tokio::test]
async fn test_find_list_search_and_sort() {
    let db = setup().await;
    let repo = gyms(&db);
    for name in ["Acme North", "Acme South", "Budget Fitness"] {
        repo.create(&gym(T1, name)).await.unwrap();
    }

    let filter = Filter::new().search("acme").sort("name", SortOrder::Desc);
    let page = repo.find_list(T1, &filter).await.unwrap();

    let names: Vec<_> = page.data.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Acme South", "Acme North"]);
    assert_eq!(page.pagination.total, 2);

    let bad = Filter::new().sort("Name; DROP TABLE Gyms", SortOrder::Asc);
    assert!(matches!(
        repo.find_list(T1, &bad).await,
        Err(DbError::InvalidIdentifier { .. })
    ));
}

#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct GymName {
    uid: String,
    name: String,
}

#[tokio::test]
async fn test_projections() {
    let db = setup().await;
    let repo = gyms(&db);
    let acme = gym(T1, "Acme");
    repo.create(&acme).await.unwrap();

    let names: Vec<GymName> = repo.find_all_as(T1, &["Uid", "Name"]).await.unwrap();
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].uid, acme.base.uid);

    let one: Option<GymName> = repo
        .find_by_id_as(&acme.base.uid, T1, &["uid", "name"])
        .await
        .unwrap();
    assert_eq!(one.map(|g| g.name), Some("Acme".to_string()));
}

#[tokio::test]
async fn test_update_keeps_immutable_columns() {
    let db = setup().await;
    let repo = gyms(&db);
    let original = gym(T1, "Acme");
    repo.create(&original).await.unwrap();

    let mut changed = original.clone();
    changed.name = "Acme Prime".to_string();
    changed.base.org_id = T2.to_string();
    changed.base.created_by = "intruder".to_string();
    changed
        .base
        .stamp_modified(&RequestContext::new(T1, "U2"), Utc::now());

    let stored = repo.update(&original.base.uid, &changed).await.unwrap();
    assert_eq!(stored.name, "Acme Prime");
    assert_eq!(stored.base.org_id, T1);
    assert_eq!(stored.base.created_by, "U1");
    assert_eq!(stored.base.modified_by.as_deref(), Some("U2"));

    let missing = repo.update("no-such-row", &changed).await;
    assert!(matches!(missing, Err(DbError::NotFound { .. })));
}

#[tokio::test]
async fn test_batches_reject_empty_input() {
    let db = setup().await;
    let repo = gyms(&db);

    assert!(matches!(repo.create_many(&[]).await, Err(DbError::EmptyBatch { .. })));
    assert!(matches!(repo.update_many(&[], &[]).await, Err(DbError::EmptyBatch { .. })));
    assert!(matches!(
        repo.upsert_many(&[], None, &[]).await,
        Err(DbError::EmptyBatch { .. })
    ));
    assert!(matches!(repo.soft_delete_many(&[]).await, Err(DbError::EmptyBatch { .. })));
    assert!(matches!(repo.hard_delete_many(&[]).await, Err(DbError::EmptyBatch { .. })));
}

#[tokio::test]
async fn test_update_many() {
    let db = setup().await;
    let repo = gyms(&db);
    let mut a = gym(T1, "A");
    let mut b = gym(T1, "B");
    repo.create_many(&[a.clone(), b.clone()]).await.unwrap();

    a.name = "A2".to_string();
    a.capacity = Some(10);
    b.name = "B2".to_string();
    b.capacity = Some(20);

    let affected = repo.update_many(&[a.clone(), b.clone()], &["Capacity"]).await.unwrap();
    assert_eq!(affected, 2);

    let a_stored = repo.find_by_id(&a.base.uid, T1).await.unwrap().unwrap();
    let b_stored = repo.find_by_id(&b.base.uid, T1).await.unwrap().unwrap();
    assert_eq!(a_stored.name, "A2");
    assert_eq!(b_stored.name, "B2");
    assert_eq!(a_stored.capacity, None);
}

#[tokio::test]
async fn test_upsert_many_updates_existing_and_inserts_new() {
    let db = setup().await;
    let repo = gyms(&db);
    let existing = gym(T1, "Old name");
    repo.create(&existing).await.unwrap();

    let mut incoming = existing.clone();
    incoming.name = "New name".to_string();
    incoming.phone = Some("555-0100".to_string());
    incoming.base.created_by = "someone-else".to_string();
    incoming.base.created_on = Utc::now() + Duration::days(3);

    let fresh = gym(T1, "Brand new");

    repo.upsert_many(&[incoming, fresh.clone()], None, &["Phone"])
        .await
        .unwrap();

    let stored = repo.find_by_id(&existing.base.uid, T1).await.unwrap().unwrap();
    assert_eq!(stored.name, "New name");
    assert_eq!(stored.phone, None);
    assert_eq!(stored.base.created_by, existing.base.created_by);
    assert_eq!(stored.base.created_on, existing.base.created_on);

    assert!(repo.find_by_id(&fresh.base.uid, T1).await.unwrap().is_some());
    assert_eq!(repo.count(T1).await.unwrap(), 2);
}

#[tokio::test]
async fn test_soft_then_hard_delete() {
    let db = setup().await;
    let repo = gyms(&db);
    let acme = gym(T1, "Acme");
    repo.create(&acme).await.unwrap();
    let id = acme.base.uid.clone();

    assert!(repo.soft_delete(&id).await.unwrap());
    assert!(!repo.soft_delete(&id).await.unwrap());
    assert!(repo.find_by_id(&id, T1).await.unwrap().is_none());
    assert!(repo.find_all(T1).await.unwrap().is_empty());
    assert_eq!(repo.count(T1).await.unwrap(), 0);
    assert_eq!(
        repo.find_list(T1, &Filter::new()).await.unwrap().pagination.total,
        0
    );

    // Single-row soft delete leaves DeletedOn alone
    let raw = repo.find_raw(&id).await.unwrap().unwrap();
    assert!(raw.base.is_deleted);
    assert!(raw.base.deleted_on.is_none());

    assert!(repo.hard_delete(&id).await.unwrap());
    assert!(repo.find_raw(&id).await.unwrap().is_none());
    assert!(!repo.hard_delete(&id).await.unwrap());
}

#[tokio::test]
async fn test_update_does_not_revive_soft_deleted_row() {
    let db = setup().await;
    let repo = gyms(&db);
    let acme = gym(T1, "Acme");
    repo.create(&acme).await.unwrap();
    let id = acme.base.uid.clone();
    assert!(repo.soft_delete(&id).await.unwrap());

    let mut changed = acme.clone();
    changed.name = "Acme Reborn".to_string();
    let result = repo.update(&id, &changed).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    assert!(repo.find_by_id(&id, T1).await.unwrap().is_none());
    let raw = repo.find_raw(&id).await.unwrap().unwrap();
    assert!(raw.base.is_deleted);
    assert_eq!(raw.name, "Acme");
}

#[tokio::test]
async fn test_update_many_skips_soft_deleted_rows() {
    let db = setup().await;
    let repo = gyms(&db);
    let mut live = gym(T1, "Live");
    let mut gone = gym(T1, "Gone");
    repo.create_many(&[live.clone(), gone.clone()]).await.unwrap();
    assert!(repo.soft_delete(&gone.base.uid).await.unwrap());

    live.name = "Live 2".to_string();
    gone.name = "Gone 2".to_string();
    let affected = repo.update_many(&[live.clone(), gone.clone()], &[]).await.unwrap();
    assert_eq!(affected, 1);

    assert!(repo.find_by_id(&gone.base.uid, T1).await.unwrap().is_none());
    let raw = repo.find_raw(&gone.base.uid).await.unwrap().unwrap();
    assert!(raw.base.is_deleted);
    assert_eq!(raw.name, "Gone");

    let stored = repo.find_by_id(&live.base.uid, T1).await.unwrap().unwrap();
    assert_eq!(stored.name, "Live 2");

    // Only deleted rows in the batch: nothing matches
    assert_eq!(repo.update_many(&[gone.clone()], &[]).await.unwrap(), 0);
    assert!(repo.find_by_id(&gone.base.uid, T1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_upsert_keeps_soft_delete_state() {
    let db = setup().await;
    let repo = gyms(&db);
    let acme = gym(T1, "Acme");
    repo.create(&acme).await.unwrap();
    assert!(repo.soft_delete(&acme.base.uid).await.unwrap());

    repo.upsert_many(&[acme.clone()], None, &[]).await.unwrap();

    assert!(repo.find_by_id(&acme.base.uid, T1).await.unwrap().is_none());
    assert!(repo.find_raw(&acme.base.uid).await.unwrap().unwrap().base.is_deleted);
}

#[tokio::test]
async fn test_find_list_huge_page_is_empty() {
    let db = setup().await;
    let repo = gyms(&db);
    repo.create(&gym(T1, "Acme")).await.unwrap();

    let page = repo
        .find_list(T1, &Filter::new().page(i64::MAX).page_size(10))
        .await
        .unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.pagination.page, i64::MAX);
    assert!(!page.pagination.has_next);
}

#[tokio::test]
async fn test_soft_delete_many_stamps_deleted_on() {
    let db = setup().await;
    let repo = gyms(&db);
    let rows = vec![gym(T1, "A"), gym(T1, "B")];
    repo.create_many(&rows).await.unwrap();

    let ids: Vec<String> = rows.iter().map(|g| g.base.uid.clone()).collect();
    assert_eq!(repo.soft_delete_many(&ids).await.unwrap(), 2);

    let raw = repo.find_raw(&ids[0]).await.unwrap().unwrap();
    assert!(raw.base.deleted_on.is_some());

    assert_eq!(repo.hard_delete_many(&ids).await.unwrap(), 2);
}

#[tokio::test]
async fn test_duplicate_and_foreign_key_mapping() {
    let db = setup().await;
    let uow = db.unit_of_work();
    let repo = uow.repository::<Gym>();
    let acme = gym(T1, "Acme");
    repo.create(&acme).await.unwrap();

    let dup = repo.create(&acme).await.unwrap_err();
    assert!(matches!(dup, DbError::DuplicateEntry { .. }));
    assert_eq!(dup.status_code(), 409);

    // Parent missing on insert
    let ctx = RequestContext::new(T1, "U1");
    let mut orphan = Position::from_create(&CreatePosition {
        department_uid: "missing-department".to_string(),
        title: "Coach".to_string(),
        ..CreatePosition::default()
    });
    orphan.base.stamp_created(&ctx, Utc::now());
    let err = uow.repository::<Position>().create(&orphan).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::ForeignKeyConstraint {
            reason: ForeignKeyReason::MissingReference,
            ..
        }
    ));
    assert_eq!(err.status_code(), 400);

    // Parent still referenced on delete
    let mut dept = Department::from_create(&CreateDepartment {
        name: "Training".to_string(),
        description: None,
    });
    dept.base.stamp_created(&ctx, Utc::now());
    uow.repository::<Department>().create(&dept).await.unwrap();

    let mut child = orphan.clone();
    child.base.stamp_created(&ctx, Utc::now());
    child.department_uid = dept.base.uid.clone();
    uow.repository::<Position>().create(&child).await.unwrap();

    let err = uow
        .repository::<Department>()
        .hard_delete(&dept.base.uid)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::ForeignKeyConstraint {
            reason: ForeignKeyReason::StillReferenced,
            ..
        }
    ));
    assert_eq!(err.status_code(), 409);
}
