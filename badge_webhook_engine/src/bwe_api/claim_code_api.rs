use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{ClaimCode, NewClaimCode},
    traits::{ClaimCodeError, ClaimCodeManagement},
};

/// `ClaimCodeApi` records claim codes minted by the badge-issuing service and looks them up again. Talking to the
/// issuing service itself is the job of the `badgekit_tools` crate; this API only manages the local records.
pub struct ClaimCodeApi<B> {
    db: B,
}

impl<B> Debug for ClaimCodeApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClaimCodeApi")
    }
}

impl<B> ClaimCodeApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> ClaimCodeApi<B>
where B: ClaimCodeManagement
{
    /// Records a freshly minted claim code.
    pub async fn record_claim_code(&self, code: NewClaimCode) -> Result<ClaimCode, ClaimCodeError> {
        let recorded = self.db.insert_claim_code(code).await?;
        debug!("🗃️ Claim code [{}] recorded for badge '{}'", recorded.code, recorded.badge);
        Ok(recorded)
    }

    /// Looks up a locally recorded claim code.
    pub async fn fetch_claim_code(&self, code: &str) -> Result<Option<ClaimCode>, ClaimCodeError> {
        self.db.fetch_claim_code(code).await
    }

    /// Returns all recorded claim codes, newest first.
    pub async fn fetch_claim_codes(&self) -> Result<Vec<ClaimCode>, ClaimCodeError> {
        self.db.fetch_claim_codes().await
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
