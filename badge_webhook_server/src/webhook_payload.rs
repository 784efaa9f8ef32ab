//! Strict validation of the issued-badge webhook payload.
//!
//! The body must be a JSON object whose key set is *exactly* `{action, uid, email, assertionUrl, issuedOn}`.
//! Any extra, missing, or renamed key is a schema mismatch, no matter which key it is. `action` names the event
//! type; only issued-badge deliveries reach this route, so its presence is all that is checked, and it is
//! dropped before persistence.

use badge_webhook_engine::{
    db_types::NewBadgeNotification,
    helpers::{assertion_url_is_valid, email_is_valid, uid_is_valid},
};
use chrono::DateTime;
use log::*;
use serde_json::Value;

use crate::errors::PayloadError;

const EXPECTED_KEYS: [&str; 5] = ["action", "uid", "email", "assertionUrl", "issuedOn"];

/// Parses and validates the raw webhook body, returning a fully populated, not-yet-persisted notification.
///
/// Bodies are decoded as UTF-8 JSON. `issuedOn` must be a number holding epoch seconds (fractional seconds are
/// kept, to millisecond precision). `email` and `assertionUrl` are checked with the same field validators the
/// store applies before writing a row.
pub fn validate_payload(raw_body: &[u8]) -> Result<NewBadgeNotification, PayloadError> {
    let value: Value = serde_json::from_slice(raw_body).map_err(|e| {
        debug!("🎖️ Webhook body is not valid JSON: {e}");
        PayloadError::NotJson
    })?;
    let payload = value.as_object().ok_or(PayloadError::NotJson)?;
    if payload.len() != EXPECTED_KEYS.len() || !EXPECTED_KEYS.iter().all(|k| payload.contains_key(*k)) {
        let keys = payload.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
        debug!("🎖️ Webhook payload key set does not match the schema. Got: [{keys}]");
        return Err(PayloadError::SchemaMismatch);
    }
    let issued_on = payload
        .get("issuedOn")
        .and_then(Value::as_f64)
        .filter(|secs| secs.is_finite())
        .and_then(|secs| DateTime::from_timestamp_millis((secs * 1000.0).round() as i64))
        .ok_or(PayloadError::BadTimestamp)?;
    let uid = payload.get("uid").and_then(Value::as_str).unwrap_or_default();
    let email = payload.get("email").and_then(Value::as_str).unwrap_or_default();
    let assertion_url = payload.get("assertionUrl").and_then(Value::as_str).unwrap_or_default();
    let mut invalid = Vec::new();
    if !uid_is_valid(uid) {
        invalid.push("uid".to_string());
    }
    if !email_is_valid(email) {
        invalid.push("email".to_string());
    }
    if !assertion_url_is_valid(assertion_url) {
        invalid.push("assertionUrl".to_string());
    }
    if !invalid.is_empty() {
        debug!("🎖️ Webhook payload failed field validation on: {}", invalid.join(", "));
        return Err(PayloadError::FieldValidation(invalid));
    }
    Ok(NewBadgeNotification::new(uid, email, assertion_url, issued_on))
}
