use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------  BadgeNotification  ----------------------------------------------------------

/// A stored badge notification. One row is written for every webhook delivery that passes authorization and
/// payload validation. Rows are append-only: there is no update or delete path for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BadgeNotification {
    pub id: i64,
    /// Opaque badge instance identifier assigned by the issuing service. Not unique: the issuer retries
    /// deliveries, and each accepted retry lands as its own row.
    pub uid: String,
    /// The earner's email address.
    pub email: String,
    /// Public url of the badge assertion.
    pub assertion_url: String,
    /// When the badge was issued, as reported in the payload.
    pub issued_on: DateTime<Utc>,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl Display for BadgeNotification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "badge {} for {} (issued {})", self.uid, self.email, self.issued_on)
    }
}

//--------------------------------------  NewBadgeNotification  -------------------------------------------------------

/// A validated, not-yet-persisted badge notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBadgeNotification {
    pub uid: String,
    pub email: String,
    pub assertion_url: String,
    pub issued_on: DateTime<Utc>,
}

impl NewBadgeNotification {
    pub fn new<S1, S2, S3>(uid: S1, email: S2, assertion_url: S3, issued_on: DateTime<Utc>) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self { uid: uid.into(), email: email.into(), assertion_url: assertion_url.into(), issued_on }
    }

    pub fn is_equivalent(&self, notification: &BadgeNotification) -> bool {
        self.uid == notification.uid
            && self.email == notification.email
            && self.assertion_url == notification.assertion_url
            && self.issued_on == notification.issued_on
    }
}

//--------------------------------------      ClaimCode      ----------------------------------------------------------

/// A claim code minted by the badge-issuing service and recorded locally. The local row is a record of the mint;
/// live state (claimed or not, by whom) always comes from the issuing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCode {
    /// The opaque code string minted by the issuing service.
    pub code: String,
    /// The email address the code was initially created for. Write-once.
    pub initial_email: String,
    pub badge: String,
    pub system: String,
    pub issuer: Option<String>,
    pub program: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------     NewClaimCode    ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaimCode {
    pub code: String,
    pub initial_email: String,
    pub badge: String,
    pub system: String,
    pub issuer: Option<String>,
    pub program: Option<String>,
}

impl NewClaimCode {
    pub fn new<S1, S2, S3, S4>(code: S1, initial_email: S2, badge: S3, system: S4) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
        S4: Into<String>,
    {
        Self {
            code: code.into(),
            initial_email: initial_email.into(),
            badge: badge.into(),
            system: system.into(),
            issuer: None,
            program: None,
        }
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }

    pub fn with_program(mut self, program: &str) -> Self {
        self.program = Some(program.to_string());
        self
    }
}
