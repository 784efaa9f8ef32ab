//! Badge Webhook Engine
//!
//! The Badge Webhook Engine holds the core logic behind the badge webhook gateway. It is provider-agnostic: the
//! HTTP layer lives in the server crate, and remote badge-issuer calls live in `badgekit_tools`.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the default backend. You should never need to
//!    access the database directly. Instead, use the public API provided by the engine. The exception is the data
//!    types used in the database. These are defined in the `db_types` module and are public.
//! 2. The engine public API ([`mod@bwe_api`]). This provides the public-facing functionality of the engine:
//!    recording incoming badge notifications and claim codes. Specific backends need to implement the traits in
//!    the [`mod@traits`] module in order to act as a backend for the badge webhook server.
//! 3. The event layer ([`mod@events`]). When a notification is accepted, a "notification issued" event is
//!    delivered to every registered subscriber in turn. Subscriber failures are isolated: they are logged and
//!    reported back to the caller without affecting the other subscribers or the request itself.
mod bwe_api;

pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use bwe_api::{claim_code_api::ClaimCodeApi, notification_api::NotificationApi};
pub use traits::{ClaimCodeError, ClaimCodeManagement, NotificationManagement, StoreError};
