mod api;
mod claims;
mod config;
mod error;

mod data_objects;

pub use api::BadgeKitApi;
pub use config::BadgeKitConfig;
pub use data_objects::{BadgeSummary, ClaimCodeInfo, CodeContext, MintedClaimCode};
pub use error::BadgeKitApiError;
