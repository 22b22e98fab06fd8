use async_trait::async_trait;
use roster_core::validation::{validate_email, validate_one_of, validate_password, validate_text};
use roster_core::{CreateUser, UpdateUser, User, ValidationError, USER_ROLES};
use roster_db::{schema, Query, UnitOfWork};
use tracing::warn;

use super::NAME_MAX;
use crate::error::{ServiceError, ServiceResult};
use crate::hooks::{Scope, ServiceHooks};
use crate::password::{hash_password, verify_password};

#[derive(Debug, Clone, Copy, Default)]
pub struct UserRules;

#[async_trait]
impl ServiceHooks<User> for UserRules {
    async fn validate_add(&self, scope: Scope<'_>, model: &CreateUser) -> ServiceResult<()> {
        validate_email("email", &model.email)?;
        validate_text("fullName", &model.full_name, NAME_MAX)?;
        validate_password("password", &model.password)?;
        if let Some(role) = &model.role {
            validate_one_of("role", role, USER_ROLES)?;
        }

        let email = model.email.trim().to_lowercase();
        if find_by_email(scope.uow, &scope.ctx.tenant_id, &email)
            .await?
            .is_some()
        {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email,
            }
            .into());
        }
        Ok(())
    }

    async fn validate_update(&self, _scope: Scope<'_>, _id: &str, model: &UpdateUser) -> ServiceResult<()> {
        if let Some(name) = &model.full_name {
            validate_text("fullName", name, NAME_MAX)?;
        }
        if let Some(role) = &model.role {
            validate_one_of("role", role, USER_ROLES)?;
        }
        Ok(())
    }

    async fn pre_add(&self, _scope: Scope<'_>, model: &CreateUser, entity: &mut User) -> ServiceResult<()> {
        entity.password_hash = hash_password(&model.password)?;
        Ok(())
    }
}

/// Live user of `org_id` with this (lowercased) email.
pub async fn find_by_email(uow: &UnitOfWork, org_id: &str, email: &str) -> ServiceResult<Option<User>> {
    let query = Query::new(format!(
        "SELECT * FROM {} WHERE IsDeleted = 0 AND OrgId = ? AND Email = ?",
        schema::USERS.name
    ))
    .bind(org_id)
    .bind(email.trim().to_lowercase());

    Ok(uow.executor().select_one(&query).await?)
}

/// Checks credentials for a login.
///
/// Unknown email, inactive account and wrong password all produce the
/// same `Unauthorized` error.
pub async fn authenticate(
    uow: &UnitOfWork,
    org_id: &str,
    email: &str,
    password: &str,
) -> ServiceResult<User> {
    let rejected = || ServiceError::Unauthorized("Invalid credentials".to_string());

    let Some(user) = find_by_email(uow, org_id, email).await? else {
        warn!(org_id = %org_id, "Login for unknown email");
        return Err(rejected());
    };

    if !user.base.is_active || !verify_password(password, &user.password_hash) {
        warn!(org_id = %org_id, user_id = %user.base.uid, "Login rejected");
        return Err(rejected());
    }

    Ok(user)
}
