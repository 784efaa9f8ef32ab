mod bus;
mod event_types;
mod subscribers;

pub use bus::{DeliveryOutcome, EventBus};
pub use event_types::*;
pub use subscribers::{LoggingSubscriber, NotificationSubscriber, SubscriberError};
