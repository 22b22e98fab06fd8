//! Router tests over an in-memory database.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use roster_api::{app, ApiConfig, AppState};
use roster_core::{CreateUser, RequestContext};
use roster_db::{Database, DbConfig};
use roster_service::{UserRules, UserService};
use serde_json::{json, Value};
use tower::ServiceExt;

const PASSWORD: &str = "hunter22x";

struct TestApp {
    router: Router,
    org_a: String,
    org_b: String,
}

async fn create_user(db: &Database, org: &str, email: &str) {
    UserService::new(db.unit_of_work(), RequestContext::system(org, "test"), UserRules)
        .create(&CreateUser {
            email: email.to_string(),
            full_name: "Test User".to_string(),
            password: PASSWORD.to_string(),
            role: Some("admin".to_string()),
        })
        .await
        .unwrap();
}

async fn setup() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let org_a = db.organizations().create("Org A").await.unwrap().uid;
    let org_b = db.organizations().create("Org B").await.unwrap().uid;
    create_user(&db, &org_a, "admin@a.io").await;
    create_user(&db, &org_b, "admin@b.io").await;

    let config = ApiConfig::from_builder(ApiConfig::defaults().unwrap()).unwrap();
    TestApp {
        router: app(AppState::new(db, config)),
        org_a,
        org_b,
    }
}

async fn send(router: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-request-id", "req-123");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &TestApp, org: &str, email: &str) -> String {
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "orgId": org, "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = setup().await;
    let (status, body) = send(&app.router, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], json!(true));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = setup().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "orgId": app.org_a, "email": "admin@a.io", "password": "wrong-pass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));
    assert_eq!(body["error"]["requestId"], json!("req-123"));

    // Right password, wrong organization
    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "orgId": app.org_b, "email": "admin@a.io", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let app = setup().await;

    let (status, body) = send(&app.router, Method::GET, "/api/gyms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["requestId"], json!("req-123"));

    let (status, _) = send(&app.router, Method::GET, "/api/gyms", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gym_crud_flow() {
    let app = setup().await;
    let token = login(&app, &app.org_a, "admin@a.io").await;
    let token = Some(token.as_str());

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/gyms",
        token,
        Some(json!({ "name": "Acme Gym", "capacity": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["orgId"], json!(app.org_a));
    assert_eq!(body["data"]["isDeleted"], json!(false));
    let id = body["data"]["uid"].as_str().unwrap().to_string();

    let (status, body) = send(&app.router, Method::GET, &format!("/api/gyms/{id}"), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Acme Gym"));

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/gyms/{id}"),
        token,
        Some(json!({ "name": "Acme Prime" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Acme Prime"));
    assert_eq!(body["data"]["capacity"], json!(120));

    let (status, body) = send(&app.router, Method::GET, "/api/gyms?page=1&pageSize=10", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], json!(1));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app.router, Method::DELETE, &format!("/api/gyms/{id}"), token, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.router, Method::GET, &format!("/api/gyms/{id}"), token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));

    let (status, body) = send(&app.router, Method::DELETE, &format!("/api/gyms/{id}/hard"), token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], json!(true));

    let (_, body) = send(&app.router, Method::DELETE, &format!("/api/gyms/{id}/hard"), token, None).await;
    assert_eq!(body["data"]["removed"], json!(false));
}

#[tokio::test]
async fn test_tenant_isolation() {
    let app = setup().await;
    let token_a = login(&app, &app.org_a, "admin@a.io").await;
    let token_b = login(&app, &app.org_b, "admin@b.io").await;

    let (_, body) = send(
        &app.router,
        Method::POST,
        "/api/departments",
        Some(token_a.as_str()),
        Some(json!({ "name": "Training" })),
    )
    .await;
    let id = body["data"]["uid"].as_str().unwrap().to_string();

    let (status, _) = send(&app.router, Method::GET, &format!("/api/departments/{id}"), Some(token_b.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app.router,
        Method::PUT,
        &format!("/api/departments/{id}"),
        Some(token_b.as_str()),
        Some(json!({ "name": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["message"], json!("Not authorized"));

    let (_, body) = send(&app.router, Method::GET, &format!("/api/departments/{id}"), Some(token_a.as_str()), None).await;
    assert_eq!(body["data"]["name"], json!("Training"));

    let (status, body) = send(&app.router, Method::GET, "/api/departments/all", Some(token_b.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_and_conflicts() {
    let app = setup().await;
    let token = login(&app, &app.org_a, "admin@a.io").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/positions",
        Some(token.as_str()),
        Some(json!({ "departmentUid": "nope", "title": "Coach" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));
    assert_eq!(body["error"]["details"]["field"], json!("departmentUid"));
    // Development mode exposes the debug rendering
    assert!(body["error"]["stack"].is_string());

    let (_, body) = send(
        &app.router,
        Method::POST,
        "/api/departments",
        Some(token.as_str()),
        Some(json!({ "name": "Training" })),
    )
    .await;
    let dept = body["data"]["uid"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/positions",
        Some(token.as_str()),
        Some(json!({ "departmentUid": dept, "title": "Coach" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app.router,
        Method::DELETE,
        &format!("/api/departments/{dept}/hard"),
        Some(token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], json!("FOREIGN_KEY_CONSTRAINT"));

    let (status, body) = send(
        &app.router,
        Method::GET,
        "/api/departments?sortBy=Name%3B%20DROP%20TABLE%20Departments",
        Some(token.as_str()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], json!("INVALID_IDENTIFIER"));
}

#[tokio::test]
async fn test_user_payload_hides_password_hash() {
    let app = setup().await;
    let token = login(&app, &app.org_a, "admin@a.io").await;

    let (status, body) = send(&app.router, Method::GET, "/api/users/all", Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("passwordHash").is_none());
    assert_eq!(users[0]["email"], json!("admin@a.io"));
}
