use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    claims::{sign_request, RequestClaims},
    config::BadgeKitConfig,
    data_objects::{BadgeSummary, ClaimCodeInfo, CodeContext, MintedClaimCode},
    BadgeKitApiError,
};

#[derive(Clone)]
pub struct BadgeKitApi {
    config: BadgeKitConfig,
    client: Arc<Client>,
}

impl BadgeKitApi {
    pub fn new(config: BadgeKitConfig) -> Result<Self, BadgeKitApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BadgeKitApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends one signed request. The body is serialized up front because the auth token has to commit to the
    /// exact bytes that go on the wire.
    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, BadgeKitApiError> {
        let body = body
            .map(|b| serde_json::to_vec(&b))
            .transpose()
            .map_err(|e| BadgeKitApiError::JsonError(e.to_string()))?;
        let claims = RequestClaims::new(method.as_str(), path, body.as_deref());
        let token = sign_request(&self.config.api_key, &claims)?;
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url).header(AUTHORIZATION, format!("JWT token=\"{token}\""));
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send().await.map_err(|e| BadgeKitApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| BadgeKitApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| BadgeKitApiError::RestResponseError(e.to_string()))?;
            Err(BadgeKitApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_url.trim_end_matches('/'))
    }

    pub fn default_context(&self) -> CodeContext {
        self.config.default_context()
    }

    /// Asks the issuing service to mint a random claim code for the given badge and email address.
    pub async fn create_claim_code(
        &self,
        email: &str,
        badge: &str,
        ctx: &CodeContext,
    ) -> Result<MintedClaimCode, BadgeKitApiError> {
        #[derive(Serialize)]
        struct CodeRequest<'a> {
            email: &'a str,
        }
        #[derive(Deserialize)]
        struct CodeResponse {
            #[serde(rename = "claimCode")]
            claim_code: MintedClaimCode,
        }
        let path = format!("{}/badges/{badge}/codes/random", context_path(ctx));
        debug!("Minting a random claim code for badge '{badge}'");
        let result = self.rest_query::<CodeResponse, CodeRequest>(Method::POST, &path, Some(CodeRequest { email })).await?;
        info!("Minted claim code for badge '{badge}'");
        Ok(result.claim_code)
    }

    /// Fetches the live state of a claim code. This always round-trips to the issuing service; locally recorded
    /// rows can be stale on everything except the code itself.
    pub async fn get_claim_code(
        &self,
        code: &str,
        badge: &str,
        ctx: &CodeContext,
    ) -> Result<ClaimCodeInfo, BadgeKitApiError> {
        let path = format!("{}/badges/{badge}/codes/{code}", context_path(ctx));
        debug!("Fetching claim code [{code}]");
        let result = self.rest_query::<ClaimCodeInfo, ()>(Method::GET, &path, None).await?;
        info!("Fetched claim code [{code}]");
        Ok(result)
    }

    pub async fn list_badges(&self, ctx: &CodeContext) -> Result<Vec<BadgeSummary>, BadgeKitApiError> {
        #[derive(Deserialize)]
        struct BadgeListResponse {
            badges: Vec<BadgeSummary>,
        }
        let path = format!("{}/badges", context_path(ctx));
        debug!("Fetching badge list");
        let result = self.rest_query::<BadgeListResponse, ()>(Method::GET, &path, None).await?;
        info!("Fetched {} badges", result.badges.len());
        Ok(result.badges)
    }
}

fn context_path(ctx: &CodeContext) -> String {
    let mut path = format!("/systems/{}", ctx.system);
    if let Some(issuer) = &ctx.issuer {
        path.push_str(&format!("/issuers/{issuer}"));
        if let Some(program) = &ctx.program {
            path.push_str(&format!("/programs/{program}"));
        }
    }
    path
}
