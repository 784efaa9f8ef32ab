//! `SqliteDatabase` is a concrete implementation of a Badge Webhook engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{claim_codes, db_url, new_pool, notifications};
use crate::{
    db_types::{BadgeNotification, ClaimCode, NewBadgeNotification, NewClaimCode},
    helpers::invalid_notification_fields,
    traits::{ClaimCodeError, ClaimCodeManagement, NotificationManagement, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl NotificationManagement for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_notification(
        &self,
        notification: NewBadgeNotification,
    ) -> Result<BadgeNotification, StoreError> {
        let invalid_fields = invalid_notification_fields(&notification);
        if !invalid_fields.is_empty() {
            debug!("🗃️ Rejecting notification [{}]. Invalid fields: {}", notification.uid, invalid_fields.join(", "));
            return Err(StoreError::Invalid(invalid_fields));
        }
        let mut conn = self.pool.acquire().await?;
        let stored = notifications::insert_notification(notification, &mut conn).await?;
        debug!("🗃️ Notification [{}] has been saved in the DB with id {}", stored.uid, stored.id);
        Ok(stored)
    }

    async fn fetch_notifications(&self) -> Result<Vec<BadgeNotification>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::fetch_notifications(&mut conn).await
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl ClaimCodeManagement for SqliteDatabase {
    async fn insert_claim_code(&self, code: NewClaimCode) -> Result<ClaimCode, ClaimCodeError> {
        let mut conn = self.pool.acquire().await.map_err(|e| ClaimCodeError::DatabaseError(e.to_string()))?;
        claim_codes::insert_claim_code(code, &mut conn).await
    }

    async fn fetch_claim_code(&self, code: &str) -> Result<Option<ClaimCode>, ClaimCodeError> {
        let mut conn = self.pool.acquire().await.map_err(|e| ClaimCodeError::DatabaseError(e.to_string()))?;
        claim_codes::fetch_claim_code(code, &mut conn).await
    }

    async fn fetch_claim_codes(&self) -> Result<Vec<ClaimCode>, ClaimCodeError> {
        let mut conn = self.pool.acquire().await.map_err(|e| ClaimCodeError::DatabaseError(e.to_string()))?;
        claim_codes::fetch_claim_codes(&mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Applies any outstanding embedded migrations. The server calls this once at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations are up to date");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
