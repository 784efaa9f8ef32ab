//! Outbound request signing.
//!
//! BadgeKit authorizes API calls with the same scheme it uses when it delivers webhooks: an HS256 JWT carried as
//! `Authorization: JWT token="..."`. The claims bind the token to a single request by naming the HTTP method, the
//! path, and a SHA-256 digest of the body when there is one.

use bwg_common::Secret;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::BadgeKitApiError;

const TOKEN_LIFETIME_SECS: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestClaims {
    pub key: String,
    pub exp: i64,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyHash>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyHash {
    pub alg: String,
    pub hash: String,
}

impl BodyHash {
    pub fn from_bytes(body: &[u8]) -> Self {
        let hash = hex::encode(Sha256::digest(body));
        Self { alg: "sha256".to_string(), hash }
    }
}

impl RequestClaims {
    pub fn new(method: &str, path: &str, body: Option<&[u8]>) -> Self {
        Self {
            key: "master".to_string(),
            exp: Utc::now().timestamp() + TOKEN_LIFETIME_SECS,
            method: method.to_string(),
            path: path.to_string(),
            body: body.map(BodyHash::from_bytes),
        }
    }
}

pub fn sign_request(key: &Secret<String>, claims: &RequestClaims) -> Result<String, BadgeKitApiError> {
    encode(&Header::new(Algorithm::HS256), claims, &EncodingKey::from_secret(key.reveal_bytes()))
        .map_err(|e| BadgeKitApiError::SigningError(e.to_string()))
}
