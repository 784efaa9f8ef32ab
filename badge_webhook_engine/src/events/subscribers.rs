use futures_util::future::BoxFuture;
use log::*;
use thiserror::Error;

use crate::events::NotificationIssuedEvent;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct SubscriberError(pub String);

impl From<String> for SubscriberError {
    fn from(e: String) -> Self {
        Self(e)
    }
}

/// A subscriber to "notification issued" events.
///
/// Subscribers are registered with the [`crate::events::EventBus`] at startup and called in registration order,
/// inside the request that accepted the webhook. A subscriber fails a delivery by returning `Err`; the failure is
/// logged against [`NotificationSubscriber::name`] and reported in the outcome list, and has no effect on the
/// other subscribers or on the webhook response.
pub trait NotificationSubscriber: Send + Sync {
    /// A short identifier used when logging delivery outcomes.
    fn name(&self) -> &str;

    /// Handle one issued notification.
    fn on_notification_issued(&self, event: NotificationIssuedEvent) -> BoxFuture<'_, Result<(), SubscriberError>>;
}

/// Writes one structured log line per issued badge. Registered by default so that even a bare deployment keeps a
/// visible record of everything accepted over the webhook.
pub struct LoggingSubscriber;

impl NotificationSubscriber for LoggingSubscriber {
    fn name(&self) -> &str {
        "notification_logger"
    }

    fn on_notification_issued(&self, event: NotificationIssuedEvent) -> BoxFuture<'_, Result<(), SubscriberError>> {
        Box::pin(async move {
            let details =
                serde_json::to_string(&event.notification).map_err(|e| SubscriberError(e.to_string()))?;
            info!("📬️ Badge issued: {details}");
            Ok(())
        })
    }
}
