use async_trait::async_trait;
use roster_core::validation::{validate_optional_text, validate_text};
use roster_core::{CreateDepartment, Department, UpdateDepartment};

use super::{NAME_MAX, TEXT_MAX};
use crate::error::ServiceResult;
use crate::hooks::{Scope, ServiceHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentRules;

#[async_trait]
impl ServiceHooks<Department> for DepartmentRules {
    async fn validate_add(&self, _scope: Scope<'_>, model: &CreateDepartment) -> ServiceResult<()> {
        validate_text("name", &model.name, NAME_MAX)?;
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        Ok(())
    }

    async fn validate_update(
        &self,
        _scope: Scope<'_>,
        _id: &str,
        model: &UpdateDepartment,
    ) -> ServiceResult<()> {
        if let Some(name) = &model.name {
            validate_text("name", name, NAME_MAX)?;
        }
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        Ok(())
    }
}
