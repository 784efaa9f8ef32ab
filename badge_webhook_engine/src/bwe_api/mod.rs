//! # Badge webhook engine public API
//!
//! The `bwe_api` module exposes the programmatic API for the badge webhook engine. The API is modular, so that
//! clients can pick and choose the functionality they want: a deployment that never mints claim codes only needs
//! the notification API, for example.
//!
//! * [`notification_api`] records validated badge notifications and fans the "notification issued" event out to
//!   subscribers.
//! * [`claim_code_api`] records claim codes minted by the badge-issuing service and looks them up again.
//!
//! # API usage
//!
//! The pattern for using the APIs is the same everywhere. An API instance is created by supplying a database
//! backend that implements the specific backend traits required by the API.
//!
//! For example, to record a notification and notify subscribers:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use badge_webhook_engine::{events::EventBus, NotificationApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let bus = Arc::new(EventBus::new());
//! // SqliteDatabase implements NotificationManagement
//! let api = NotificationApi::new(db, bus);
//! let (stored, outcomes) = api.process_notification(new_notification).await?;
//! ```

pub mod claim_code_api;
pub mod notification_api;
