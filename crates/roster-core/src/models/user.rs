//! Organization members who sign in to the backend.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::merge;
use crate::entity::{BaseEntity, Model};

/// Allowed values for [`User::role`].
pub const USER_ROLES: &[&str] = &["admin", "manager", "member"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "PascalCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub base: BaseEntity,

    /// Unique per tenant, stored lowercase.
    pub email: String,

    pub full_name: String,

    /// Argon2 PHC string. Never leaves the process.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,

    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub role: Option<String>,
}

impl Model for User {
    const NAME: &'static str = "User";
    type Create = CreateUser;
    type Update = UpdateUser;

    fn base(&self) -> &BaseEntity {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseEntity {
        &mut self.base
    }

    /// The password hash is left empty; the user rules fill it in `pre_add`.
    fn from_create(model: &CreateUser) -> Self {
        User {
            base: BaseEntity::default(),
            email: model.email.trim().to_lowercase(),
            full_name: model.full_name.clone(),
            password_hash: String::new(),
            role: model
                .role
                .clone()
                .unwrap_or_else(|| "member".to_string()),
        }
    }

    fn merge_update(&mut self, model: &UpdateUser) {
        merge(&mut self.full_name, &model.full_name);
        merge(&mut self.role, &model.role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let mut user = User::from_create(&CreateUser {
            email: " Jane@Acme.io ".to_string(),
            full_name: "Jane".to_string(),
            password: "hunter22x".to_string(),
            role: None,
        });
        user.password_hash = "$argon2id$secret".to_string();

        assert_eq!(user.email, "jane@acme.io");
        assert_eq!(user.role, "member");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
    }
}
