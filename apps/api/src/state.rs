//! Shared application state.

use std::sync::Arc;

use roster_core::RequestContext;
use roster_db::Database;
use roster_service::{Notifier, ServiceError, TracingNotifier};

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
    pub jwt: Arc<JwtManager>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_access_lifetime_secs);

        AppState {
            db,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Error translator for one request.
    pub fn failure(&self, ctx: &RequestContext) -> impl Fn(ServiceError) -> ApiError {
        let debug = self.config.is_development();
        let request_id = ctx.request_id.clone();
        move |err| ApiError::from_service(err, debug).with_request_id(request_id.clone())
    }
}
