//! Base service flows against an in-memory database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roster_core::{
    CreateApplication, CreateDepartment, CreateGym, CreatePosition, CreateTask, CreateUser, Filter,
    Gym, RequestContext, UpdateGym, ValidationError,
};
use roster_db::{Database, DbConfig};
use roster_service::rules::authenticate;
use roster_service::{
    ApplicationRules, ApplicationService, DepartmentRules, DepartmentService, GymRules,
    GymService, Notification, Notifier, PositionRules, PositionService, ServiceError,
    ServiceResult, TaskRules, TaskService, UserRules, UserService,
};

struct Tenants {
    db: Database,
    t1: String,
    t2: String,
}

async fn setup() -> Tenants {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let t1 = db.organizations().create("Tenant One").await.unwrap().uid;
    let t2 = db.organizations().create("Tenant Two").await.unwrap().uid;
    Tenants { db, t1, t2 }
}

fn gyms(db: &Database, tenant: &str, user: &str) -> GymService {
    GymService::new(db.unit_of_work(), RequestContext::new(tenant, user), GymRules)
}

fn acme() -> CreateGym {
    CreateGym {
        name: "Acme Gym".to_string(),
        ..CreateGym::default()
    }
}

#[tokio::test]
async fn test_create_stamps_tenant_and_audit() {
    let t = setup().await;

    let gym = gyms(&t.db, &t.t1, "U1")
        .create(&acme())
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    assert_eq!(gym.name, "Acme Gym");
    assert_eq!(gym.base.org_id, t.t1);
    assert_eq!(gym.base.created_by, "U1");
    assert!(gym.base.is_active);
    assert!(!gym.base.is_deleted);
    assert!(gym.base.modified_on.is_none());
    assert!(!gym.base.uid.is_empty());
}

#[tokio::test]
async fn test_create_runs_validation_first() {
    let t = setup().await;
    let service = gyms(&t.db, &t.t1, "U1");

    let err = service
        .create(&CreateGym {
            name: "   ".to_string(),
            ..CreateGym::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Required { .. })
    ));
    assert!(service.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cross_tenant_update_is_forbidden_and_writes_nothing() {
    let t = setup().await;
    let created = gyms(&t.db, &t.t1, "U1")
        .create(&acme())
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    let err = gyms(&t.db, &t.t2, "U9")
        .update(
            &UpdateGym {
                name: Some("Hijacked".to_string()),
                ..UpdateGym::default()
            },
            &created.base.uid,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Forbidden(_)));
    assert_eq!(err.to_string(), "Not authorized");
    assert_eq!(err.status_code(), 403);

    let stored = t
        .db
        .unit_of_work()
        .repository::<Gym>()
        .find_raw(&created.base.uid)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_update_merges_and_stamps() {
    let t = setup().await;
    let created = gyms(&t.db, &t.t1, "U1")
        .create(&CreateGym {
            name: "Acme Gym".to_string(),
            address: Some("1 Main St".to_string()),
            ..CreateGym::default()
        })
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    let updated = gyms(&t.db, &t.t1, "U2")
        .update(
            &UpdateGym {
                capacity: Some(120),
                ..UpdateGym::default()
            },
            &created.base.uid,
        )
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    assert_eq!(updated.name, "Acme Gym");
    assert_eq!(updated.address.as_deref(), Some("1 Main St"));
    assert_eq!(updated.capacity, Some(120));
    assert_eq!(updated.base.created_by, "U1");
    assert_eq!(updated.base.modified_by.as_deref(), Some("U2"));
    assert!(updated.base.modified_on.is_some());

    let missing = gyms(&t.db, &t.t1, "U2")
        .update(&UpdateGym::default(), "no-such-gym")
        .await
        .unwrap_err();
    assert!(matches!(missing, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_list_second_page() {
    let t = setup().await;
    let service = gyms(&t.db, &t.t1, "U1");
    for i in 0..25 {
        service
            .create(&CreateGym {
                name: format!("Gym {i}"),
                ..CreateGym::default()
            })
            .await
            .unwrap();
    }

    let page = service
        .get_list(&Filter::new().page(2).page_size(10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);
    assert!(page.pagination.has_next);
    assert!(page.pagination.has_prev);
}

#[tokio::test]
async fn test_reads_hide_other_tenants() {
    let t = setup().await;
    let created = gyms(&t.db, &t.t1, "U1")
        .create(&acme())
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    let other = gyms(&t.db, &t.t2, "U9");
    let err = other.get_by_id(&created.base.uid).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
    assert!(other.get_all().await.unwrap().is_empty());

    let err = other.delete(&created.base.uid).await.unwrap_err();
    assert_eq!(err.status_code(), 404);

    let err = other.hard_delete(&created.base.uid).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn test_soft_then_hard_delete() {
    let t = setup().await;
    let service = gyms(&t.db, &t.t1, "U1");
    let id = service
        .create(&acme())
        .await
        .unwrap()
        .into_entity()
        .unwrap()
        .base
        .uid;

    service.delete(&id).await.unwrap();
    assert!(matches!(
        service.get_by_id(&id).await,
        Err(ServiceError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(&id).await,
        Err(ServiceError::NotFound { .. })
    ));

    assert!(service.hard_delete(&id).await.unwrap());
    assert!(!service.hard_delete(&id).await.unwrap());
}

#[tokio::test]
async fn test_position_requires_department_in_tenant() {
    let t = setup().await;
    let dept = DepartmentService::new(
        t.db.unit_of_work(),
        RequestContext::new(&t.t1, "U1"),
        DepartmentRules,
    )
    .create(&CreateDepartment {
        name: "Training".to_string(),
        description: None,
    })
    .await
    .unwrap()
    .into_entity()
    .unwrap();

    let model = CreatePosition {
        department_uid: dept.base.uid.clone(),
        title: "Coach".to_string(),
        ..CreatePosition::default()
    };

    let mine = PositionService::new(t.db.unit_of_work(), RequestContext::new(&t.t1, "U1"), PositionRules);
    let created = mine.create(&model).await.unwrap().into_entity().unwrap();
    assert_eq!(created.openings, 1);

    let theirs = PositionService::new(t.db.unit_of_work(), RequestContext::new(&t.t2, "U9"), PositionRules);
    let err = theirs.create(&model).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::UnknownReference { .. })
    ));

    let err = mine
        .create(&CreatePosition {
            openings: Some(-1),
            ..model
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::OutOfRange { .. })
    ));
}

#[tokio::test]
async fn test_task_status_must_be_known() {
    let t = setup().await;
    let service = TaskService::new(t.db.unit_of_work(), RequestContext::new(&t.t1, "U1"), TaskRules);

    let err = service
        .create(&CreateTask {
            title: "Restock towels".to_string(),
            status: Some("someday".to_string()),
            ..CreateTask::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NotAllowed { .. })
    ));

    let task = service
        .create(&CreateTask {
            title: "Restock towels".to_string(),
            ..CreateTask::default()
        })
        .await
        .unwrap()
        .into_entity()
        .unwrap();
    assert_eq!(task.status, "open");
}

#[tokio::test]
async fn test_user_password_is_hashed_and_email_unique() {
    let t = setup().await;
    let service = UserService::new(t.db.unit_of_work(), RequestContext::new(&t.t1, "U1"), UserRules);
    let model = CreateUser {
        email: "Jane@Acme.io".to_string(),
        full_name: "Jane Doe".to_string(),
        password: "hunter22x".to_string(),
        role: Some("manager".to_string()),
    };

    let user = service.create(&model).await.unwrap().into_entity().unwrap();
    assert_eq!(user.email, "jane@acme.io");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let err = service.create(&model).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Duplicate { .. })
    ));

    let weak = service
        .create(&CreateUser {
            email: "weak@acme.io".to_string(),
            password: "short".to_string(),
            ..model.clone()
        })
        .await
        .unwrap_err();
    assert!(matches!(
        weak,
        ServiceError::Validation(ValidationError::TooShort { .. })
    ));

    let uow = t.db.unit_of_work();
    let signed_in = authenticate(&uow, &t.t1, "JANE@acme.io", "hunter22x").await.unwrap();
    assert_eq!(signed_in.base.uid, user.base.uid);

    let err = authenticate(&uow, &t.t1, "jane@acme.io", "wrong-password1").await.unwrap_err();
    assert_eq!(err.status_code(), 401);
    let err = authenticate(&uow, &t.t2, "jane@acme.io", "hunter22x").await.unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notification: Notification) -> ServiceResult<()> {
        self.sent.lock().unwrap().push(notification);
        Ok(())
    }
}

#[tokio::test]
async fn test_application_notifies_candidate() {
    let t = setup().await;
    let ctx = RequestContext::new(&t.t1, "U1");

    let dept = DepartmentService::new(t.db.unit_of_work(), ctx.clone(), DepartmentRules)
        .create(&CreateDepartment {
            name: "Training".to_string(),
            description: None,
        })
        .await
        .unwrap()
        .into_entity()
        .unwrap();
    let position = PositionService::new(t.db.unit_of_work(), ctx.clone(), PositionRules)
        .create(&CreatePosition {
            department_uid: dept.base.uid,
            title: "Coach".to_string(),
            ..CreatePosition::default()
        })
        .await
        .unwrap()
        .into_entity()
        .unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let service = ApplicationService::new(
        t.db.unit_of_work(),
        ctx,
        ApplicationRules::new(notifier.clone()),
    );

    let bad_email = CreateApplication {
        position_uid: position.base.uid.clone(),
        candidate_name: "Sam".to_string(),
        candidate_email: "sam-at-example".to_string(),
        notes: None,
    };
    assert!(service.create(&bad_email).await.is_err());
    assert!(notifier.sent.lock().unwrap().is_empty());

    let application = service
        .create(&CreateApplication {
            candidate_email: "Sam@Example.com".to_string(),
            ..bad_email
        })
        .await
        .unwrap()
        .into_entity()
        .unwrap();
    assert_eq!(application.status, "applied");

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "sam@example.com");
    assert_eq!(sent[0].subject, "Application received");
}
