//! Synchronous fan-out of "notification issued" events.
//!
//! The subscriber list is fixed at startup: components register themselves while the server is being wired
//! together, and the bus is then shared behind an `Arc` for the life of the process. Delivery is awaited in the
//! request that accepted the webhook, one subscriber at a time, in registration order. A slow subscriber
//! therefore lengthens that request. Failures are contained per subscriber: they are logged with the subscriber's
//! name, captured in the returned outcome list, and never propagate to the caller.
use std::sync::Arc;

use log::*;

use crate::events::{NotificationIssuedEvent, NotificationSubscriber, SubscriberError};

/// The result of delivering one event to one subscriber.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub subscriber: String,
    pub result: Result<(), SubscriberError>,
}

impl DeliveryOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Arc<dyn NotificationSubscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. Subscribers are invoked in the order they were registered.
    pub fn subscribe(&mut self, subscriber: Arc<dyn NotificationSubscriber>) -> &mut Self {
        debug!("📬️ Registered notification subscriber '{}'", subscriber.name());
        self.subscribers.push(subscriber);
        self
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers the event to every subscriber in turn and reports how each one fared. This call itself cannot
    /// fail: a subscriber error is logged, recorded in the outcome list, and delivery continues with the next
    /// subscriber.
    pub async fn publish(&self, event: NotificationIssuedEvent) -> Vec<DeliveryOutcome> {
        let mut outcomes = Vec::with_capacity(self.subscribers.len());
        for subscriber in &self.subscribers {
            let name = subscriber.name().to_string();
            trace!("📬️ Delivering notification [{}] to '{name}'", event.notification.uid);
            let result = subscriber.on_notification_issued(event.clone()).await;
            if let Err(e) = &result {
                warn!("📬️ Subscriber '{name}' failed to handle notification [{}]: {e}", event.notification.uid);
            }
            outcomes.push(DeliveryOutcome { subscriber: name, result });
        }
        outcomes
    }
}
