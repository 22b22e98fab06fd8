//! # Service Hooks
//!
//! Extension points the [`BaseService`](crate::BaseService) calls during
//! create and update. Every hook defaults to a no-op, so an entity with no
//! special rules can use [`NoHooks`].
//!
//! ```text
//! create:  validate_add  → (map + stamp) → pre_add    → INSERT → post_add
//! update:  validate_update → (fetch + merge + stamp + tenant check)
//!                                        → pre_update → UPDATE → post_update
//! ```
//!
//! Any hook returning `Err` aborts the flow. Hooks that run before the
//! write leave the database untouched.

use async_trait::async_trait;
use roster_core::{Model, RequestContext};
use roster_db::{Entity, UnitOfWork};

use crate::error::ServiceResult;

/// What a hook may look at: the caller and the data layer.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub ctx: &'a RequestContext,
    pub uow: &'a UnitOfWork,
}

impl Scope<'_> {
    /// True if `id` names a live `T` row in the caller's tenant.
    pub async fn exists_in_tenant<T: Entity>(&self, id: &str) -> ServiceResult<bool> {
        Ok(self
            .uow
            .repository::<T>()
            .exists(id, &self.ctx.tenant_id)
            .await?)
    }
}

#[async_trait]
pub trait ServiceHooks<E: Entity>: Send + Sync {
    async fn validate_add(&self, _scope: Scope<'_>, _model: &<E as Model>::Create) -> ServiceResult<()> {
        Ok(())
    }

    async fn validate_update(
        &self,
        _scope: Scope<'_>,
        _id: &str,
        _model: &<E as Model>::Update,
    ) -> ServiceResult<()> {
        Ok(())
    }

    /// Runs on the stamped entity just before INSERT.
    async fn pre_add(
        &self,
        _scope: Scope<'_>,
        _model: &<E as Model>::Create,
        _entity: &mut E,
    ) -> ServiceResult<()> {
        Ok(())
    }

    async fn post_add(&self, _scope: Scope<'_>, _entity: &E) -> ServiceResult<()> {
        Ok(())
    }

    /// Runs on the merged entity after the tenant check, just before UPDATE.
    async fn pre_update(
        &self,
        _scope: Scope<'_>,
        _model: &<E as Model>::Update,
        _entity: &mut E,
    ) -> ServiceResult<()> {
        Ok(())
    }

    async fn post_update(&self, _scope: Scope<'_>, _entity: &E) -> ServiceResult<()> {
        Ok(())
    }
}

/// Hooks for entities with no rules of their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<E: Entity> ServiceHooks<E> for NoHooks {}
