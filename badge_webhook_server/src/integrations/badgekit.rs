//! Server-side glue between the BadgeKit client and the engine.
//!
//! Claim codes are minted by the issuing service, which owns them; the local row only records that the mint
//! happened and for whom. The two steps are not transactional: if recording fails after a successful mint, the
//! code still exists upstream and the error says so.

use badge_webhook_engine::{
    db_types::{ClaimCode, NewClaimCode},
    traits::{ClaimCodeError, ClaimCodeManagement},
    ClaimCodeApi,
};
use badgekit_tools::{BadgeKitApi, BadgeSummary, ClaimCodeInfo, CodeContext};
use log::*;

use crate::{data_objects::ClaimCodeRequest, errors::ServerError};

/// Asks the issuing service to mint a claim code for the request, then records it locally.
pub async fn mint_and_record_claim_code<B: ClaimCodeManagement>(
    request: ClaimCodeRequest,
    badgekit: &BadgeKitApi,
    api: &ClaimCodeApi<B>,
) -> Result<ClaimCode, ServerError> {
    let mut ctx = badgekit.default_context();
    if let Some(system) = &request.system {
        ctx.system = system.clone();
    }
    if let Some(issuer) = &request.issuer {
        ctx.issuer = Some(issuer.clone());
    }
    if let Some(program) = &request.program {
        ctx.program = Some(program.clone());
    }
    let minted = badgekit.create_claim_code(&request.email, &request.badge, &ctx).await.map_err(|e| {
        warn!("🎟️ Could not mint a claim code for badge '{}'. {e}", request.badge);
        ServerError::BackendError(e.to_string())
    })?;
    let mut new_code = NewClaimCode::new(minted.code, request.email, request.badge, ctx.system.clone());
    new_code.issuer = ctx.issuer.clone();
    new_code.program = ctx.program.clone();
    let recorded = api.record_claim_code(new_code).await.map_err(|e| match e {
        ClaimCodeError::CodeAlreadyExists(code) => {
            // The mint succeeded upstream but we already hold a row for that code string.
            warn!("🎟️ The issuing service minted a code we have already recorded: [{code}]");
            ServerError::BackendError(format!("Claim code {code} was already recorded"))
        },
        ClaimCodeError::DatabaseError(e) => {
            warn!("🎟️ Minted a claim code but could not record it locally. {e}");
            ServerError::BackendError(e)
        },
    })?;
    info!("🎟️ Claim code [{}] minted and recorded for badge '{}'", recorded.code, recorded.badge);
    Ok(recorded)
}

/// Lists the badges available in the configured issuing context. Badge definitions live upstream only, so this
/// always round-trips.
pub async fn live_badge_list(badgekit: &BadgeKitApi) -> Result<Vec<BadgeSummary>, ServerError> {
    let ctx = badgekit.default_context();
    badgekit.list_badges(&ctx).await.map_err(|e| {
        debug!("🎟️ Could not fetch the badge list. {e}");
        ServerError::BackendError(e.to_string())
    })
}

/// Fetches the live state of a claim code from the issuing service. Never consults the local record.
pub async fn live_claim_code_info(
    code: &str,
    badge: &str,
    badgekit: &BadgeKitApi,
) -> Result<ClaimCodeInfo, ServerError> {
    let ctx: CodeContext = badgekit.default_context();
    badgekit.get_claim_code(code, badge, &ctx).await.map_err(|e| {
        debug!("🎟️ Could not fetch live claim code info. {e}");
        ServerError::BackendError(e.to_string())
    })
}
