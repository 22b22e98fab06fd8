//! # Base Service
//!
//! Generic create/read/update/delete over one entity type, with tenant
//! scoping and audit stamping applied the same way for every table.
//!
//! ```rust,ignore
//! let service = GymService::new(db.unit_of_work(), ctx, GymRules);
//! let created = service.create(&CreateGym { name: "Acme Gym".into(), ..Default::default() }).await?;
//! let page = service.get_list(&Filter::new().page(2).page_size(10)).await?;
//! ```

use std::marker::PhantomData;

use chrono::Utc;
use roster_core::{EntityResult, Filter, Model, PaginatedResult, RequestContext};
use roster_db::{Entity, Repository, UnitOfWork};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::hooks::{NoHooks, Scope, ServiceHooks};

pub struct BaseService<E: Entity, H: ServiceHooks<E> = NoHooks> {
    uow: UnitOfWork,
    ctx: RequestContext,
    hooks: H,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, H: ServiceHooks<E>> BaseService<E, H> {
    pub fn new(uow: UnitOfWork, ctx: RequestContext, hooks: H) -> Self {
        BaseService {
            uow,
            ctx,
            hooks,
            _entity: PhantomData,
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn unit_of_work(&self) -> &UnitOfWork {
        &self.uow
    }

    fn repository(&self) -> Repository<E> {
        self.uow.repository::<E>()
    }

    fn scope(&self) -> Scope<'_> {
        Scope {
            ctx: &self.ctx,
            uow: &self.uow,
        }
    }

    fn tenant(&self) -> &str {
        &self.ctx.tenant_id
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Every live row of the caller's tenant.
    pub async fn get_all(&self) -> ServiceResult<Vec<E>> {
        Ok(self.repository().find_all(self.tenant()).await?)
    }

    /// One page of the caller's rows.
    pub async fn get_list(&self, filter: &Filter) -> ServiceResult<PaginatedResult<E>> {
        Ok(self.repository().find_list(self.tenant(), filter).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<E> {
        self.repository()
            .find_by_id(id, self.tenant())
            .await?
            .ok_or_else(|| ServiceError::not_found(E::NAME, id))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates, stamps and inserts a new row, returning it as stored.
    ///
    /// Server-controlled columns are always overwritten, whatever the model
    /// mapping produced.
    pub async fn create(&self, model: &E::Create) -> ServiceResult<EntityResult<E>> {
        let scope = self.scope();
        self.hooks.validate_add(scope, model).await?;

        let mut entity = E::from_create(model);
        entity.base_mut().stamp_created(&self.ctx, Utc::now());

        self.hooks.pre_add(scope, model, &mut entity).await?;

        let repo = self.repository();
        let inserted = repo.create(&entity).await?;

        self.hooks.post_add(scope, &entity).await?;

        let stored = repo
            .find_by_id(&inserted.insert_id, self.tenant())
            .await?
            .ok_or_else(|| ServiceError::not_found(E::NAME, &inserted.insert_id))?;

        info!(
            entity = E::NAME,
            uid = %stored.uid(),
            tenant_id = %self.ctx.tenant_id,
            request_id = %self.ctx.request_id,
            "Created"
        );

        Ok(EntityResult::single(stored))
    }

    /// Merges `model` into the stored row and writes it back.
    ///
    /// ## Errors
    /// * `NotFound` - no live row with this id
    /// * `Forbidden` - the row belongs to another tenant (nothing is written)
    pub async fn update(&self, model: &E::Update, id: &str) -> ServiceResult<EntityResult<E>> {
        let scope = self.scope();
        self.hooks.validate_update(scope, id, model).await?;

        let repo = self.repository();
        let mut entity = repo
            .find_by_id_any_tenant(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(E::NAME, id))?;

        entity.merge_update(model);
        entity.base_mut().stamp_modified(&self.ctx, Utc::now());

        if !self.ctx.owns(entity.org_id()) {
            warn!(
                entity = E::NAME,
                uid = %id,
                tenant_id = %self.ctx.tenant_id,
                request_id = %self.ctx.request_id,
                "Cross-tenant update rejected"
            );
            return Err(ServiceError::forbidden());
        }

        self.hooks.pre_update(scope, model, &mut entity).await?;

        let stored = repo.update(id, &entity).await?;

        self.hooks.post_update(scope, &stored).await?;

        info!(entity = E::NAME, uid = %id, request_id = %self.ctx.request_id, "Updated");

        Ok(EntityResult::single(stored))
    }

    /// Soft-deletes a row of the caller's tenant.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let repo = self.repository();
        if !repo.exists(id, self.tenant()).await? {
            return Err(ServiceError::not_found(E::NAME, id));
        }

        repo.soft_delete(id).await?;
        info!(entity = E::NAME, uid = %id, request_id = %self.ctx.request_id, "Soft deleted");
        Ok(())
    }

    /// Removes a row for good, soft-deleted or not.
    ///
    /// Returns `false` when there was nothing to remove.
    pub async fn hard_delete(&self, id: &str) -> ServiceResult<bool> {
        let repo = self.repository();
        let Some(row) = repo.find_raw(id).await? else {
            debug!(entity = E::NAME, uid = %id, "Hard delete of absent row");
            return Ok(false);
        };

        if !self.ctx.owns(row.org_id()) {
            warn!(
                entity = E::NAME,
                uid = %id,
                tenant_id = %self.ctx.tenant_id,
                "Cross-tenant hard delete rejected"
            );
            return Err(ServiceError::forbidden());
        }

        let removed = repo.hard_delete(id).await?;
        info!(entity = E::NAME, uid = %id, request_id = %self.ctx.request_id, "Hard deleted");
        Ok(removed)
    }
}
