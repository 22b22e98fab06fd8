//! # Routes
//!
//! ```text
//! GET    /health
//! POST   /api/auth/login
//!
//! for r in gyms, departments, positions, tasks, applications, users:
//! GET    /api/<r>              ?page&pageSize&sortBy&sortOrder&searchKeyword
//! GET    /api/<r>/all
//! GET    /api/<r>/{id}
//! POST   /api/<r>
//! PUT    /api/<r>/{id}
//! DELETE /api/<r>/{id}         soft delete
//! DELETE /api/<r>/{id}/hard
//! ```

pub mod auth;
pub mod health;
pub mod resource;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;
use resource::{Applications, Departments, Gyms, Positions, Resource, Tasks, Users};

/// All routes, state attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .nest(&api_path::<Gyms>(), resource::routes::<Gyms>())
        .nest(&api_path::<Departments>(), resource::routes::<Departments>())
        .nest(&api_path::<Positions>(), resource::routes::<Positions>())
        .nest(&api_path::<Tasks>(), resource::routes::<Tasks>())
        .nest(&api_path::<Applications>(), resource::routes::<Applications>())
        .nest(&api_path::<Users>(), resource::routes::<Users>())
        .with_state(state)
}

fn api_path<R: Resource>() -> String {
    format!("/api/{}", R::PATH)
}
