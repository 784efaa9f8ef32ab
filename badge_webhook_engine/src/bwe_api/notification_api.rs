use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::{
    db_types::{BadgeNotification, NewBadgeNotification},
    events::{DeliveryOutcome, EventBus, NotificationIssuedEvent},
    traits::{NotificationManagement, StoreError},
};

/// `NotificationApi` is the primary API for handling validated badge notifications: it stores each one and fans
/// the resulting "notification issued" event out to the registered subscribers.
pub struct NotificationApi<B> {
    db: B,
    bus: Arc<EventBus>,
}

impl<B> Debug for NotificationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi")
    }
}

impl<B> NotificationApi<B> {
    pub fn new(db: B, bus: Arc<EventBus>) -> Self {
        Self { db, bus }
    }
}

impl<B> NotificationApi<B>
where B: NotificationManagement
{
    /// Stores a validated notification, then delivers the issued event to every subscriber in turn.
    ///
    /// The stored record and the per-subscriber outcomes are returned together. Subscriber failures are already
    /// logged and isolated by the bus; callers only fail on storage errors, in which case no event was published.
    pub async fn process_notification(
        &self,
        notification: NewBadgeNotification,
    ) -> Result<(BadgeNotification, Vec<DeliveryOutcome>), StoreError> {
        let stored = self.db.insert_notification(notification).await?;
        let outcomes = self.bus.publish(NotificationIssuedEvent::new(stored.clone())).await;
        let failures = outcomes.iter().filter(|o| !o.succeeded()).count();
        debug!(
            "🗃️ Notification [{}] processing complete. Delivered to {} subscribers, {failures} failed",
            stored.uid,
            outcomes.len(),
        );
        Ok((stored, outcomes))
    }

    /// Returns all stored notifications, oldest issuance first.
    pub async fn fetch_notifications(&self) -> Result<Vec<BadgeNotification>, StoreError> {
        self.db.fetch_notifications().await
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
