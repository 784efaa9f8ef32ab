use serde::{Deserialize, Serialize};

use crate::db_types::BadgeNotification;

/// Emitted once for every notification that has been validated and stored. Subscribers receive their own clone of
/// the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIssuedEvent {
    pub notification: BadgeNotification,
}

impl NotificationIssuedEvent {
    pub fn new(notification: BadgeNotification) -> Self {
        Self { notification }
    }
}
