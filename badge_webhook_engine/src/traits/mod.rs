//! # Database management and control.
//!
//! This module provides the interfaces that define the contracts of the engine's database *backends*.
//!
//! ## Notifications
//! A notification is the record of one accepted "badge issued" webhook delivery. The store is append-only: rows
//! are written once when a delivery is accepted and never updated or deleted afterwards.
//!
//! ## Claim codes
//! A claim code row records a code minted by the badge-issuing service. The row itself is immutable; live claim
//! state always comes from the issuing service.
//!
//! ## Traits
//! * [`NotificationManagement`] defines the behaviour a backend needs in order to store and list notifications.
//! * [`ClaimCodeManagement`] defines the behaviour for recording and looking up claim codes.
mod claim_code_management;
mod notification_management;

pub use claim_code_management::{ClaimCodeError, ClaimCodeManagement};
pub use notification_management::{NotificationManagement, StoreError};
