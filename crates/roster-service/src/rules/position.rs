use async_trait::async_trait;
use roster_core::validation::{validate_optional_text, validate_range, validate_text};
use roster_core::{CreatePosition, Department, Position, UpdatePosition};

use super::{unknown_reference, NAME_MAX, TEXT_MAX};
use crate::error::ServiceResult;
use crate::hooks::{Scope, ServiceHooks};

const OPENINGS_MAX: i64 = 1_000;

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionRules;

impl PositionRules {
    async fn check_department(scope: Scope<'_>, department_uid: &str) -> ServiceResult<()> {
        if !scope.exists_in_tenant::<Department>(department_uid).await? {
            return Err(unknown_reference("departmentUid", "Department", department_uid).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceHooks<Position> for PositionRules {
    async fn validate_add(&self, scope: Scope<'_>, model: &CreatePosition) -> ServiceResult<()> {
        validate_text("title", &model.title, NAME_MAX)?;
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        if let Some(openings) = model.openings {
            validate_range("openings", openings, 0, OPENINGS_MAX)?;
        }
        Self::check_department(scope, &model.department_uid).await
    }

    async fn validate_update(&self, scope: Scope<'_>, _id: &str, model: &UpdatePosition) -> ServiceResult<()> {
        if let Some(title) = &model.title {
            validate_text("title", title, NAME_MAX)?;
        }
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        if let Some(openings) = model.openings {
            validate_range("openings", openings, 0, OPENINGS_MAX)?;
        }
        if let Some(department_uid) = &model.department_uid {
            Self::check_department(scope, department_uid).await?;
        }
        Ok(())
    }
}
