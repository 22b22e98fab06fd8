//! Candidate applications against a position.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{merge, merge_opt};
use crate::entity::{BaseEntity, Model};

/// Allowed values for [`Application::status`], in pipeline order.
pub const APPLICATION_STATUSES: &[&str] = &[
    "applied",
    "screening",
    "interview",
    "offered",
    "hired",
    "rejected",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Application {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    /// Position applied for (FK, same tenant).
    pub position_uid: String,

    pub candidate_name: String,

    pub candidate_email: String,

    pub status: String,

    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateApplication {
    pub position_uid: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateApplication {
    pub candidate_name: Option<String>,
    pub candidate_email: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl Model for Application {
    const NAME: &'static str = "Application";
    type Create = CreateApplication;
    type Update = UpdateApplication;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn from_create(model: &CreateApplication) -> Self {
        Application {
            base: BaseEntity::default(),
            position_uid: model.position_uid.clone(),
            candidate_name: model.candidate_name.clone(),
            candidate_email: model.candidate_email.trim().to_lowercase(),
            status: APPLICATION_STATUSES[0].to_string(),
            notes: model.notes.clone(),
        }
    }

    fn merge_update(&mut self, model: &UpdateApplication) {
        merge(&mut self.candidate_name, &model.candidate_name);
        if let Some(email) = &model.candidate_email {
            self.candidate_email = email.trim().to_lowercase();
        }
        merge(&mut self.status, &model.status);
        merge_opt(&mut self.notes, &model.notes);
    }
}
