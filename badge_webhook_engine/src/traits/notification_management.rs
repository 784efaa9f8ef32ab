use thiserror::Error;

use crate::db_types::{BadgeNotification, NewBadgeNotification};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("The notification failed validation on: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

/// The `NotificationManagement` trait defines the behaviour a backend needs in order to persist badge
/// notifications for the webhook server.
///
/// The store is append-only. Insertion re-validates every field before writing, so a backend never holds a
/// partially valid row regardless of which code path produced the record. There is deliberately no dedup on
/// `uid`: the issuing service retries deliveries it thinks failed, and every accepted retry lands as its own row.
#[allow(async_fn_in_trait)]
pub trait NotificationManagement: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Validates and stores a single notification, returning the stored record (with its row id and insertion
    /// time filled in).
    ///
    /// Fails with [`StoreError::Invalid`] if any field is invalid; nothing is written in that case.
    async fn insert_notification(
        &self,
        notification: NewBadgeNotification,
    ) -> Result<BadgeNotification, StoreError>;

    /// Returns all stored notifications, ordered by issuance time, oldest first. Ties on `issued_on` are broken
    /// by insertion order, so the listing is stable.
    async fn fetch_notifications(&self) -> Result<Vec<BadgeNotification>, StoreError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
