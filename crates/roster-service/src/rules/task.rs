use async_trait::async_trait;
use roster_core::validation::{validate_one_of, validate_optional_text, validate_text};
use roster_core::{CreateTask, Task, UpdateTask, User, TASK_STATUSES};

use super::{unknown_reference, NAME_MAX, TEXT_MAX};
use crate::error::ServiceResult;
use crate::hooks::{Scope, ServiceHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskRules;

impl TaskRules {
    async fn check_assignee(scope: Scope<'_>, assignee: Option<&str>) -> ServiceResult<()> {
        if let Some(uid) = assignee {
            if !scope.exists_in_tenant::<User>(uid).await? {
                return Err(unknown_reference("assigneeUid", "User", uid).into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceHooks<Task> for TaskRules {
    async fn validate_add(&self, scope: Scope<'_>, model: &CreateTask) -> ServiceResult<()> {
        validate_text("title", &model.title, NAME_MAX)?;
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        if let Some(status) = &model.status {
            validate_one_of("status", status, TASK_STATUSES)?;
        }
        Self::check_assignee(scope, model.assignee_uid.as_deref()).await
    }

    async fn validate_update(&self, scope: Scope<'_>, _id: &str, model: &UpdateTask) -> ServiceResult<()> {
        if let Some(title) = &model.title {
            validate_text("title", title, NAME_MAX)?;
        }
        validate_optional_text("description", model.description.as_deref(), TEXT_MAX)?;
        if let Some(status) = &model.status {
            validate_one_of("status", status, TASK_STATUSES)?;
        }
        Self::check_assignee(scope, model.assignee_uid.as_deref()).await
    }
}
