//! Gym locations operated by an organization.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::merge_opt;
use crate::entity::{BaseEntity, Model};

/// A gym location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Gym {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    pub name: String,

    pub address: Option<String>,

    pub phone: Option<String>,

    /// Maximum members on the floor at once.
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateGym {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateGym {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub capacity: Option<i64>,
}

impl Model for Gym {
    const NAME: &'static str = "Gym";
    type Create = CreateGym;
    type Update = UpdateGym;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    fn from_create(model: &CreateGym) -> Self {
        Gym {
            base: BaseEntity::default(),
            name: model.name.trim().to_string(),
            address: model.address.clone(),
            phone: model.phone.clone(),
            capacity: model.capacity,
        }
    }

    fn merge_update(&mut self, model: &UpdateGym) {
        if let Some(name) = &model.name {
            self.name = name.trim().to_string();
        }
        merge_opt(&mut self.address, &model.address);
        merge_opt(&mut self.phone, &model.phone);
        merge_opt(&mut self.capacity, &model.capacity);
    }
}
