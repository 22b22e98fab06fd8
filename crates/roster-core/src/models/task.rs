//! Work items assigned to organization members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{merge, merge_opt};
use crate::entity::{BaseEntity, Model};

/// Allowed values for [`Task::status`].
pub const TASK_STATUSES: &[&str] = &["open", "in_progress", "done"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Task {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    pub title: String,

    pub description: Option<String>,

    /// User the task is assigned to, if any.
    pub assignee_uid: Option<String>,

    #[ts(as = "Option<String>")]
    pub due_on: Option<DateTime<Utc>>,

    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub assignee_uid: Option<String>,
    #[ts(as = "Option<String>")]
    pub due_on: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_uid: Option<String>,
    #[ts(as = "Option<String>")]
    pub due_on: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

impl Model for Task {
    const NAME: &'static str = "Task";
    type Create = CreateTask;
    type Update = UpdateTask;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn from_create(model: &CreateTask) -> Self {
        Task {
            base: BaseEntity::default(),
            title: model.title.clone(),
            description: model.description.clone(),
            assignee_uid: model.assignee_uid.clone(),
            due_on: model.due_on,
            status: model
                .status
                .clone()
                .unwrap_or_else(|| TASK_STATUSES[0].to_string()),
        }
    }

    fn merge_update(&mut self, model: &UpdateTask) {
        merge(&mut self.title, &model.title);
        merge_opt(&mut self.description, &model.description);
        merge_opt(&mut self.assignee_uid, &model.assignee_uid);
        merge_opt(&mut self.due_on, &model.due_on);
        merge(&mut self.status, &model.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_open() {
        let task = Task::from_create(&CreateTask {
            title: "Mop floor".to_string(),
            ..CreateTask::default()
        });
        assert_eq!(task.status, "open");
    }
}
