pub mod claim_link;
mod secret;

pub use claim_link::{create_claim_url, decode_param, encode_param, DecodeError};
pub use secret::Secret;
