use async_trait::async_trait;
use roster_core::validation::{validate_optional_text, validate_range, validate_text};
use roster_core::{CreateGym, Gym, UpdateGym};

use super::{NAME_MAX, TEXT_MAX};
use crate::error::ServiceResult;
use crate::hooks::{Scope, ServiceHooks};

const PHONE_MAX: usize = 32;
const CAPACITY_MAX: i64 = 100_000;

#[derive(Debug, Clone, Copy, Default)]
pub struct GymRules;

#[async_trait]
impl ServiceHooks<Gym> for GymRules {
    async fn validate_add(&self, _scope: Scope<'_>, model: &CreateGym) -> ServiceResult<()> {
        validate_text("name", &model.name, NAME_MAX)?;
        validate_optional_text("address", model.address.as_deref(), TEXT_MAX)?;
        validate_optional_text("phone", model.phone.as_deref(), PHONE_MAX)?;
        if let Some(capacity) = model.capacity {
            validate_range("capacity", capacity, 0, CAPACITY_MAX)?;
        }
        Ok(())
    }

    async fn validate_update(&self, _scope: Scope<'_>, _id: &str, model: &UpdateGym) -> ServiceResult<()> {
        if let Some(name) = &model.name {
            validate_text("name", name, NAME_MAX)?;
        }
        validate_optional_text("address", model.address.as_deref(), TEXT_MAX)?;
        validate_optional_text("phone", model.phone.as_deref(), PHONE_MAX)?;
        if let Some(capacity) = model.capacity {
            validate_range("capacity", capacity, 0, CAPACITY_MAX)?;
        }
        Ok(())
    }
}
