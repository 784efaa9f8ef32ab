use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{ClaimCode, NewClaimCode},
    traits::ClaimCodeError,
};

/// Inserts a freshly minted claim code. The code string is the primary key, so inserting the same code twice
/// fails with [`ClaimCodeError::CodeAlreadyExists`].
pub async fn insert_claim_code(code: NewClaimCode, conn: &mut SqliteConnection) -> Result<ClaimCode, ClaimCodeError> {
    // Drained with `fetch_all` so the implicit write transaction commits before the connection is released.
    let result: Result<Vec<ClaimCode>, sqlx::Error> = sqlx::query_as(
        r#"
            INSERT INTO claim_codes (
                code,
                initial_email,
                badge,
                system,
                issuer,
                program
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(code.code.clone())
    .bind(code.initial_email)
    .bind(code.badge)
    .bind(code.system)
    .bind(code.issuer)
    .bind(code.program)
    .fetch_all(conn)
    .await;
    match result {
        Ok(mut rows) => {
            let claim_code = rows
                .pop()
                .ok_or_else(|| ClaimCodeError::DatabaseError("INSERT did not return the stored claim code".to_string()))?;
            debug!("📝️ Claim code [{}] recorded", code.code);
            Ok(claim_code)
        },
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(ClaimCodeError::CodeAlreadyExists(code.code))
        },
        Err(e) => Err(e.into()),
    }
}

/// Returns the claim code row for the given code string, if we recorded one.
pub async fn fetch_claim_code(code: &str, conn: &mut SqliteConnection) -> Result<Option<ClaimCode>, ClaimCodeError> {
    let claim_code =
        sqlx::query_as("SELECT * FROM claim_codes WHERE code = $1").bind(code).fetch_optional(conn).await?;
    Ok(claim_code)
}

/// Returns all recorded claim codes, newest first.
pub async fn fetch_claim_codes(conn: &mut SqliteConnection) -> Result<Vec<ClaimCode>, ClaimCodeError> {
    let codes =
        sqlx::query_as("SELECT * FROM claim_codes ORDER BY created_at DESC, code DESC").fetch_all(conn).await?;
    Ok(codes)
}
