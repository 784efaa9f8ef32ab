use serde::{Deserialize, Serialize};

/// The JSON body of a successful webhook response: `{"status": "ok"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub status: String,
}

impl JsonResponse {
    pub fn ok() -> Self {
        Self { status: "ok".to_string() }
    }
}

/// Request body for `POST /claim_codes`. The system/issuer/program slugs default to the deployment's configured
/// context when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimCodeRequest {
    pub email: String,
    pub badge: String,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}
