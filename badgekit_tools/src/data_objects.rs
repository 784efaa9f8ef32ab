use serde::{Deserialize, Serialize};

/// The system/issuer/program slugs a request is scoped to. BadgeKit nests programs under issuers, so a program
/// slug only takes effect when an issuer slug is present as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeContext {
    pub system: String,
    pub issuer: Option<String>,
    pub program: Option<String>,
}

impl CodeContext {
    pub fn new<S: Into<String>>(system: S) -> Self {
        Self { system: system.into(), issuer: None, program: None }
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

/// A claim code as the issuing service reports it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MintedClaimCode {
    pub code: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub claimed: Option<bool>,
    #[serde(default)]
    pub multiuse: Option<bool>,
}

/// Live claim-code info: the code's current state plus the badge it belongs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimCodeInfo {
    pub claim_code: MintedClaimCode,
    #[serde(default)]
    pub badge: Option<BadgeSummary>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeSummary {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn claim_code_info_parses_the_two_field_response() {
        let json = r#"{
            "claimCode": { "code": "abc123", "email": "alice@example.com", "claimed": false, "multiuse": false },
            "badge": { "slug": "rust-badge", "name": "Rustacean", "imageUrl": "http://example.com/badge.png" }
        }"#;
        let info: ClaimCodeInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.claim_code.code, "abc123");
        assert_eq!(info.claim_code.claimed, Some(false));
        let badge = info.badge.unwrap();
        assert_eq!(badge.slug, "rust-badge");
        assert_eq!(badge.name, "Rustacean");
        assert_eq!(badge.image_url.as_deref(), Some("http://example.com/badge.png"));
    }

    #[test]
    fn minted_codes_tolerate_sparse_responses() {
        let code: MintedClaimCode = serde_json::from_str(r#"{ "code": "xyz" }"#).unwrap();
        assert_eq!(code.code, "xyz");
        assert!(code.email.is_none());
        assert!(code.claimed.is_none());
    }
}
