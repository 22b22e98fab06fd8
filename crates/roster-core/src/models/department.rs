//! Departments group open positions inside an organization.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{merge, merge_opt};
use crate::entity::{BaseEntity, Model};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Department {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateDepartment {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateDepartment {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Model for Department {
    const NAME: &'static str = "Department";
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn from_create(model: &CreateDepartment) -> Self {
        Department {
            base: BaseEntity::default(),
            name: model.name.clone(),
            description: model.description.clone(),
        }
    }

    fn merge_update(&mut self, model: &UpdateDepartment) {
        merge(&mut self.name, &model.name);
        merge_opt(&mut self.description, &model.description);
    }
}
