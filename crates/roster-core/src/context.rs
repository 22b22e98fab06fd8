//! # Request Context
//!
//! The identity every service call runs under.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                           │
//! │       │  Authorization: Bearer <jwt>   x-request-id: <id>              │
//! │       ▼                                                                 │
//! │  auth extractor ──► RequestContext { tenant_id, user_id, request_id }   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BaseService::new(uow, ctx, hooks)   ← passed explicitly, never global  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant, user and request identifiers for one logical request.
///
/// Concurrent requests each own their context value, so they never observe
/// each other's identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Tenant (OrgId) the caller acts for.
    pub tenant_id: String,

    /// Authenticated user; written to CreatedBy / ModifiedBy.
    pub user_id: String,

    /// Correlation id echoed in logs and error envelopes.
    pub request_id: String,
}

impl RequestContext {
    /// Creates a context with a freshly generated request id.
    pub fn new(tenant_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        RequestContext {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Replaces the request id (e.g. with an inbound `x-request-id`).
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    /// Context for non-HTTP callers such as seeders and maintenance tasks.
    pub fn system(tenant_id: impl Into<String>, actor: &str) -> Self {
        RequestContext::new(tenant_id, format!("system:{actor}"))
    }

    /// Returns true if `org_id` belongs to this context's tenant.
    #[inline]
    pub fn owns(&self, org_id: &str) -> bool {
        self.tenant_id == org_id
    }
}
