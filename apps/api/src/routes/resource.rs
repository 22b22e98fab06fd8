//! # Resource Routes
//!
//! One generic set of handlers serves every entity. A [`Resource`] names
//! the entity, its URL segment and the rules its service runs with.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use roster_core::{
    Application, Department, Filter, Gym, Model, Position, RequestContext, Task, User,
};
use roster_db::Entity;
use roster_service::{
    ApplicationRules, BaseService, DepartmentRules, GymRules, PositionRules, ServiceHooks,
    TaskRules, UserRules,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::Auth;
use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

pub trait Resource: Send + Sync + 'static {
    type Create: DeserializeOwned + Send + Sync + 'static;
    type Update: DeserializeOwned + Send + Sync + 'static;
    type Entity: Entity + Model<Create = Self::Create, Update = Self::Update> + Serialize;
    type Hooks: ServiceHooks<Self::Entity> + 'static;

    /// URL segment under `/api`.
    const PATH: &'static str;

    /// Human-readable plural for response messages.
    const LABEL: &'static str;

    fn hooks(state: &AppState) -> Self::Hooks;
}

fn service<R: Resource>(state: &AppState, ctx: RequestContext) -> BaseService<R::Entity, R::Hooks> {
    BaseService::new(state.db.unit_of_work(), ctx, R::hooks(state))
}

pub fn routes<R: Resource>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<R>).post(create::<R>))
        .route("/all", get(all::<R>))
        .route(
            "/{id}",
            get(by_id::<R>).put(update::<R>).delete(soft_delete::<R>),
        )
        .route("/{id}/hard", delete(hard_delete::<R>))
}

// =============================================================================
// Handlers
// =============================================================================

async fn list<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(filter): Query<Filter>,
) -> ApiResult<Json<ApiResponse<Vec<R::Entity>>>> {
    let fail = state.failure(&ctx);
    let page = service::<R>(&state, ctx)
        .get_list(&filter)
        .await
        .map_err(fail)?;
    Ok(Json(ApiResponse::paged(format!("{} retrieved", R::LABEL), page)))
}

async fn all<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> ApiResult<Json<ApiResponse<Vec<R::Entity>>>> {
    let fail = state.failure(&ctx);
    let rows = service::<R>(&state, ctx).get_all().await.map_err(fail)?;
    Ok(Json(ApiResponse::ok(format!("{} retrieved", R::LABEL), rows)))
}

async fn by_id<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<R::Entity>>> {
    let fail = state.failure(&ctx);
    let entity = service::<R>(&state, ctx).get_by_id(&id).await.map_err(fail)?;
    Ok(Json(ApiResponse::ok(format!("{} retrieved", <R::Entity as Model>::NAME), entity)))
}

async fn create<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(model): Json<R::Create>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Option<R::Entity>>>)> {
    let fail = state.failure(&ctx);
    let created = service::<R>(&state, ctx).create(&model).await.map_err(fail)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            format!("{} created", <R::Entity as Model>::NAME),
            created.into_entity(),
        )),
    ))
}

async fn update<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<String>,
    Json(model): Json<R::Update>,
) -> ApiResult<Json<ApiResponse<Option<R::Entity>>>> {
    let fail = state.failure(&ctx);
    let updated = service::<R>(&state, ctx)
        .update(&model, &id)
        .await
        .map_err(fail)?;
    Ok(Json(ApiResponse::ok(
        format!("{} updated", <R::Entity as Model>::NAME),
        updated.into_entity(),
    )))
}

async fn soft_delete<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fail = state.failure(&ctx);
    service::<R>(&state, ctx).delete(&id).await.map_err(fail)?;
    Ok(Json(ApiResponse::ok(
        format!("{} deleted", <R::Entity as Model>::NAME),
        json!({ "uid": id }),
    )))
}

async fn hard_delete<R: Resource>(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    let fail = state.failure(&ctx);
    let removed = service::<R>(&state, ctx)
        .hard_delete(&id)
        .await
        .map_err(fail)?;
    Ok(Json(ApiResponse::ok(
        format!("{} permanently deleted", <R::Entity as Model>::NAME),
        json!({ "uid": id, "removed": removed }),
    )))
}

// =============================================================================
// Resources
// =============================================================================

macro_rules! resource {
    ($name:ident, $entity:ty, $hooks:ty, $path:literal, $label:literal, |$state:ident| $make:expr) => {
        pub struct $name;

        impl Resource for $name {
            type Create = <$entity as Model>::Create;
            type Update = <$entity as Model>::Update;
            type Entity = $entity;
            type Hooks = $hooks;

            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;

            fn hooks($state: &AppState) -> Self::Hooks {
                $make
            }
        }
    };
}

resource!(Gyms, Gym, GymRules, "gyms", "Gyms", |_state| GymRules);
resource!(Departments, Department, DepartmentRules, "departments", "Departments", |_state| DepartmentRules);
resource!(Positions, Position, PositionRules, "positions", "Positions", |_state| PositionRules);
resource!(Tasks, Task, TaskRules, "tasks", "Tasks", |_state| TaskRules);
resource!(
    Applications,
    Application,
    ApplicationRules,
    "applications",
    "Applications",
    |state| ApplicationRules::new(state.notifier.clone())
);
resource!(Users, User, UserRules, "users", "Users", |_state| UserRules);
