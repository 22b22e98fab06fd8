//! # Notifications
//!
//! Outbound messages (e.g. "application received") leave the service
//! layer through [`Notifier`]. Template rendering and provider selection
//! live behind the trait; the bundled [`TracingNotifier`] only logs.

use async_trait::async_trait;
use tracing::info;

use crate::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> ServiceResult<()>;
}

/// Writes each notification to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send(&self, notification: Notification) -> ServiceResult<()> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification sent"
        );
        Ok(())
    }
}
