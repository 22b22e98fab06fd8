//! Tenant root. Every other row points here through `OrgId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Organization {
    pub uid: String,
    pub name: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_on: DateTime<Utc>,
}
