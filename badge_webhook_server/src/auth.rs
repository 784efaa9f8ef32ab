//! Webhook delivery authorization.
//!
//! The issuing service signs every webhook delivery with a shared-secret HS256 JWT carried as
//! `Authorization: JWT token="..."`. The token's claims embed a SHA-256 digest of the exact body bytes, which
//! binds the signature to this delivery: a valid token replayed over a different body fails the digest check.
//!
//! [`authorize_webhook`] runs the whole gate: header extraction, token verification against the configured
//! secret, and the body-hash comparison. It is a pure decision over its inputs; the actix plumbing that buffers
//! the raw body lives in [`crate::middleware`].

use bwg_common::Secret;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    config::WebhookAuthConfig,
    errors::{AuthError, GateRejection},
};

/// The claims this gateway needs from a verified webhook token. Decoded once at verification time and dropped at
/// the end of the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookClaims {
    pub body: BodyClaim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyClaim {
    /// The digest algorithm the issuer says it used. Informational; the digest is always checked as SHA-256.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Lowercase hex SHA-256 digest of the raw request body.
    pub hash: String,
}

/// Verifies a webhook token against the shared secret and returns its claims.
///
/// A missing secret is a server misconfiguration, not a client error, and is logged at error severity because it
/// silently disables the endpoint. Verification failures are logged at debug without the token itself; neither
/// the secret nor the token ever appears in a log line.
pub fn verify_webhook_token(token: &str, secret: Option<&Secret<String>>) -> Result<WebhookClaims, AuthError> {
    let secret = secret.ok_or_else(|| {
        error!(
            "🔐️ No webhook signing secret is configured. Every signed delivery will be rejected until \
             BWG_WEBHOOK_JWT_SECRET is set."
        );
        AuthError::MissingSecret
    })?;
    // The issuing service does not put `exp` (or any registered claim) in webhook tokens, so don't demand one.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    decode::<WebhookClaims>(token, &DecodingKey::from_secret(secret.reveal_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("🔐️ Webhook token failed verification: {e}");
            AuthError::InvalidToken
        })
}

/// Compares the SHA-256 digest of the raw body bytes against the hash claimed in the token, as lowercase hex.
///
/// Not a constant-time comparison, deliberately: anyone holding a valid token already knows the digest it
/// carries, so a timing channel on this check reveals nothing new.
pub fn body_hash_matches(raw_body: &[u8], claimed_hash: &str) -> bool {
    hex::encode(Sha256::digest(raw_body)) == claimed_hash
}

/// The authorization gate for one webhook delivery.
///
/// `raw_body` must be the exact bytes of the request body, captured before any parsing. The checks run in a
/// fixed order and the first failure wins: no header → [`GateRejection::MissingAuth`] (401); header not matching
/// `JWT token="<token>"` → [`GateRejection::MalformedHeader`]; token verification failure (including a missing
/// claim or missing secret) → [`GateRejection::BadAuth`]; digest mismatch → [`GateRejection::BadSignature`]
/// (all 403). When `config.skip_auth` is set the gate admits immediately without reading the header.
pub fn authorize_webhook(
    header: Option<&str>,
    raw_body: &[u8],
    config: &WebhookAuthConfig,
) -> Result<(), GateRejection> {
    if config.skip_auth {
        warn!("🔐️ Webhook authorization is disabled. Admitting the delivery without checking credentials.");
        return Ok(());
    }
    let header = header.ok_or(GateRejection::MissingAuth)?;
    let re = Regex::new(r#"^JWT token="([0-9A-Za-z\-_.]+)"$"#).unwrap();
    let token = re
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(GateRejection::MalformedHeader)?;
    let claims = verify_webhook_token(token, config.secret.as_ref()).map_err(|_| GateRejection::BadAuth)?;
    if body_hash_matches(raw_body, &claims.body.hash) {
        trace!("🔐️ Webhook delivery admitted");
        Ok(())
    } else {
        warn!("🔐️ Webhook body hash does not match the token's claim. Rejecting the delivery.");
        Err(GateRejection::BadSignature)
    }
}
