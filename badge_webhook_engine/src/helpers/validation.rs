//! Field validation for badge notifications.
//!
//! The same rules are applied twice: once by the server when it parses a webhook payload, and again by the store
//! just before a row is written. The store-side check means no backend can be handed an invalid record via some
//! other code path.

use regex::Regex;
use url::Url;

use crate::db_types::NewBadgeNotification;

/// All text fields on a notification are capped at this many characters.
pub const MAX_FIELD_LENGTH: usize = 255;

/// A uid is an opaque identifier chosen by the issuing service. Any non-empty string up to the length cap is fine.
pub fn uid_is_valid(uid: &str) -> bool {
    !uid.is_empty() && uid.chars().count() <= MAX_FIELD_LENGTH
}

/// Syntactic email check: something before the `@`, a dot somewhere in the domain, no whitespace. Deliverability
/// is the issuing service's problem, not ours.
pub fn email_is_valid(email: &str) -> bool {
    if email.is_empty() || email.chars().count() > MAX_FIELD_LENGTH {
        return false;
    }
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    re.is_match(email)
}

/// Assertion urls must parse as absolute http(s) urls.
pub fn assertion_url_is_valid(url: &str) -> bool {
    if url.is_empty() || url.chars().count() > MAX_FIELD_LENGTH {
        return false;
    }
    Url::parse(url).map(|u| matches!(u.scheme(), "http" | "https")).unwrap_or(false)
}

/// Returns the names of every invalid field on the notification, in wire-format casing. An empty result means the
/// notification is valid.
pub fn invalid_notification_fields(notification: &NewBadgeNotification) -> Vec<String> {
    let mut fields = Vec::new();
    if !uid_is_valid(&notification.uid) {
        fields.push("uid".to_string());
    }
    if !email_is_valid(&notification.email) {
        fields.push("email".to_string());
    }
    if !assertion_url_is_valid(&notification.assertion_url) {
        fields.push("assertionUrl".to_string());
    }
    fields
}
