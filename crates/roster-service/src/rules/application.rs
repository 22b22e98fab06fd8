use std::sync::Arc;

use async_trait::async_trait;
use roster_core::validation::{validate_email, validate_one_of, validate_optional_text, validate_text};
use roster_core::{
    Application, CreateApplication, Position, UpdateApplication, APPLICATION_STATUSES,
};

use super::{unknown_reference, NAME_MAX, TEXT_MAX};
use crate::error::ServiceResult;
use crate::hooks::{Scope, ServiceHooks};
use crate::notification::{Notification, Notifier, TracingNotifier};

/// Application rules. Candidates are notified once their application is
/// stored.
#[derive(Clone)]
pub struct ApplicationRules {
    notifier: Arc<dyn Notifier>,
}

impl ApplicationRules {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        ApplicationRules { notifier }
    }
}

impl Default for ApplicationRules {
    fn default() -> Self {
        ApplicationRules::new(Arc::new(TracingNotifier))
    }
}

impl std::fmt::Debug for ApplicationRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationRules").finish_non_exhaustive()
    }
}

#[async_trait]
impl ServiceHooks<Application> for ApplicationRules {
    async fn validate_add(&self, scope: Scope<'_>, model: &CreateApplication) -> ServiceResult<()> {
        validate_text("candidateName", &model.candidate_name, NAME_MAX)?;
        validate_email("candidateEmail", &model.candidate_email)?;
        validate_optional_text("notes", model.notes.as_deref(), TEXT_MAX)?;

        if !scope.exists_in_tenant::<Position>(&model.position_uid).await? {
            return Err(unknown_reference("positionUid", "Position", &model.position_uid).into());
        }
        Ok(())
    }

    async fn validate_update(
        &self,
        _scope: Scope<'_>,
        _id: &str,
        model: &UpdateApplication,
    ) -> ServiceResult<()> {
        if let Some(name) = &model.candidate_name {
            validate_text("candidateName", name, NAME_MAX)?;
        }
        if let Some(email) = &model.candidate_email {
            validate_email("candidateEmail", email)?;
        }
        if let Some(status) = &model.status {
            validate_one_of("status", status, APPLICATION_STATUSES)?;
        }
        validate_optional_text("notes", model.notes.as_deref(), TEXT_MAX)?;
        Ok(())
    }

    async fn post_add(&self, _scope: Scope<'_>, entity: &Application) -> ServiceResult<()> {
        self.notifier
            .send(Notification {
                to: entity.candidate_email.clone(),
                subject: "Application received".to_string(),
                body: format!(
                    "Hi {}, we have received your application and will be in touch.",
                    entity.candidate_name
                ),
            })
            .await
    }
}
