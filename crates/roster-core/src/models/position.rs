//! Open positions candidates apply to.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{merge, merge_opt};
use crate::entity::{BaseEntity, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Position {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    /// Owning department (FK, same tenant).
    pub department_uid: String,

    pub title: String,

    pub description: Option<String>,

    /// Number of seats still to fill.
    pub openings: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatePosition {
    pub department_uid: String,
    pub title: String,
    pub description: Option<String>,
    pub openings: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdatePosition {
    pub department_uid: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub openings: Option<i64>,
}

impl Model for Position {
    const NAME: &'static str = "Position";
    type Create = CreatePosition;
    type Update = UpdatePosition;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn from_create(model: &CreatePosition) -> Self {
        Position {
            base: BaseEntity::default(),
            department_uid: model.department_uid.clone(),
            title: model.title.clone(),
            description: model.description.clone(),
            openings: model.openings.unwrap_or(1),
        }
    }

    fn merge_update(&mut self, model: &UpdatePosition) {
        merge(&mut self.department_uid, &model.department_uid);
        merge(&mut self.title, &model.title);
        merge_opt(&mut self.description, &model.description);
        merge(&mut self.openings, &model.openings);
    }
}
