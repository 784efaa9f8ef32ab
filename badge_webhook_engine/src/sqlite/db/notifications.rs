use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{BadgeNotification, NewBadgeNotification},
    traits::StoreError,
};

/// Inserts a notification row. Callers are expected to have validated the fields already; this function just
/// writes what it is given. Duplicate uids are allowed, each delivery gets its own row.
pub async fn insert_notification(
    notification: NewBadgeNotification,
    conn: &mut SqliteConnection,
) -> Result<BadgeNotification, StoreError> {
    // `fetch_all` steps the `INSERT .. RETURNING` statement to completion, committing the implicit write
    // transaction before the connection goes back to the pool. `fetch_one` stops at the first row and leaves
    // the write invisible to sibling pool connections.
    let mut rows: Vec<BadgeNotification> = sqlx::query_as(
        r#"
            INSERT INTO badge_notifications (
                uid,
                email,
                assertion_url,
                issued_on
            ) VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(notification.uid)
    .bind(notification.email)
    .bind(notification.assertion_url)
    .bind(notification.issued_on)
    .fetch_all(conn)
    .await?;
    rows.pop().ok_or_else(|| StoreError::DatabaseError("INSERT did not return the stored notification".to_string()))
}

/// Returns all stored notifications, oldest issuance first. Ties on `issued_on` are broken by insertion id, so
/// repeated calls return the same ordering.
pub async fn fetch_notifications(conn: &mut SqliteConnection) -> Result<Vec<BadgeNotification>, StoreError> {
    let notifications =
        sqlx::query_as("SELECT * FROM badge_notifications ORDER BY issued_on ASC, id ASC").fetch_all(conn).await?;
    trace!("📝️ Result of fetch_notifications: {} rows", notifications.len());
    Ok(notifications)
}

/// Counts the stored notifications.
pub async fn notification_count(conn: &mut SqliteConnection) -> Result<i64, StoreError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM badge_notifications").fetch_one(conn).await?;
    Ok(count)
}
