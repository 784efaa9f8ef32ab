use thiserror::Error;

use crate::db_types::{ClaimCode, NewClaimCode};

#[derive(Debug, Clone, Error)]
pub enum ClaimCodeError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Cannot insert claim code, since it already exists: {0}")]
    CodeAlreadyExists(String),
}

impl From<sqlx::Error> for ClaimCodeError {
    fn from(e: sqlx::Error) -> Self {
        ClaimCodeError::DatabaseError(e.to_string())
    }
}

/// The `ClaimCodeManagement` trait defines the behaviour for recording claim codes minted by the badge-issuing
/// service and looking them up again. Rows are immutable once written; the `initial_email` field in particular is
/// write-once.
#[allow(async_fn_in_trait)]
pub trait ClaimCodeManagement: Clone {
    /// Records a freshly minted claim code. The code string is the primary key, so re-recording an existing code
    /// fails with [`ClaimCodeError::CodeAlreadyExists`].
    async fn insert_claim_code(&self, code: NewClaimCode) -> Result<ClaimCode, ClaimCodeError>;

    /// Looks up a locally recorded claim code. `None` if we never recorded it.
    async fn fetch_claim_code(&self, code: &str) -> Result<Option<ClaimCode>, ClaimCodeError>;

    /// Returns all recorded claim codes, newest first.
    async fn fetch_claim_codes(&self) -> Result<Vec<ClaimCode>, ClaimCodeError>;
}
