//! # Base Entity
//!
//! Columns every tenant-scoped table carries, plus the [`Model`] trait that
//! ties a domain type to its view models.
//!
//! ## Row Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  created ──► active ──► [deactivated] ──► soft-deleted ──► [hard-deleted]│
//! │              IsActive=1   IsActive=0       IsDeleted=1       terminal   │
//! │                                                                         │
//! │  • Reads filter IsDeleted = 0, so soft-deleted rows disappear           │
//! │  • Nothing resurrects a soft-deleted row                                │
//! │  • OrgId never changes after creation                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::context::RequestContext;

/// Identity, tenant and audit columns shared by all entity tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BaseEntity {
    /// Primary key (UUID v4), assigned by the service layer.
    pub uid: String,

    /// Owning tenant. Immutable after creation.
    pub org_id: String,

    /// Deactivated rows stay visible; only `is_deleted` hides them.
    pub is_active: bool,

    /// Soft-delete marker.
    pub is_deleted: bool,

    pub created_by: String,

    #[ts(as = "String")]
    pub created_on: DateTime<Utc>,

    pub modified_by: Option<String>,

    /// `None` until the first update.
    #[ts(as = "Option<String>")]
    pub modified_on: Option<DateTime<Utc>>,

    #[ts(as = "Option<String>")]
    pub deleted_on: Option<DateTime<Utc>>,
}

impl BaseEntity {
    /// Stamps server-controlled fields for a new row.
    ///
    /// Whatever the caller put into these fields is overwritten.
    pub fn stamp_created(&mut self, ctx: &RequestContext, now: DateTime<Utc>) {
        self.uid = Uuid::new_v4().to_string();
        self.org_id = ctx.tenant_id.clone();
        self.is_active = true;
        self.is_deleted = false;
        self.created_by = ctx.user_id.clone();
        self.created_on = now;
        self.modified_by = None;
        self.modified_on = None;
        self.deleted_on = None;
    }

    /// Stamps the modification audit pair.
    pub fn stamp_modified(&mut self, ctx: &RequestContext, now: DateTime<Utc>) {
        self.modified_by = Some(ctx.user_id.clone());
        self.modified_on = Some(now);
    }
}

/// A tenant-scoped domain type with its create/update view models.
///
/// `merge_update` is an explicit allow-list: update view models simply do
/// not contain base columns, so `Uid`, `OrgId`, audit fields and
/// `IsDeleted` can never be overwritten by a client payload.
pub trait Model: Clone + Send + Sync + Unpin + 'static {
    /// Logical entity name, used in error messages and the table registry.
    const NAME: &'static str;

    /// View model accepted on create.
    type Create: Send + Sync;

    /// View model accepted on update. Absent fields are left unchanged.
    type Update: Send + Sync;

    fn base(&self) -> &BaseEntity;

    fn base_mut(&mut self) -> &mut BaseEntity;

    /// Maps a create view model to an unstamped entity.
    fn from_create(model: &Self::Create) -> Self;

    /// Copies the fields present on `model` into `self`.
    fn merge_update(&mut self, model: &Self::Update);

    #[inline]
    fn uid(&self) -> &str {
        &self.base().uid
    }

    #[inline]
    fn org_id(&self) -> &str {
        &self.base().org_id
    }
}
