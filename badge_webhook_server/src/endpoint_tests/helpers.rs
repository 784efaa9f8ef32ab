use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test,
    HttpResponse,
};
use badge_webhook_engine::db_types::{BadgeNotification, NewBadgeNotification};
use bwg_common::Secret;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sha2::{Digest, Sha256};

use crate::{
    auth::{BodyClaim, WebhookClaims},
    config::WebhookAuthConfig,
};

// Test signing secret. DO NOT re-use anywhere.
pub const TEST_SECRET: &str = "endpoint-test-webhook-secret";

pub fn webhook_config() -> WebhookAuthConfig {
    WebhookAuthConfig::new(Some(Secret::new(TEST_SECRET.to_string())))
}

/// Mints a webhook token whose body-hash claim commits to `body`, signed with `secret`.
pub fn issue_webhook_token(body: &[u8], secret: &str) -> String {
    let claims =
        WebhookClaims { body: BodyClaim { alg: Some("sha256".to_string()), hash: hex::encode(Sha256::digest(body)) } };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn auth_header_for(body: &[u8]) -> String {
    format!("JWT token=\"{}\"", issue_webhook_token(body, TEST_SECRET))
}

pub fn stored_from(new: &NewBadgeNotification, id: i64) -> BadgeNotification {
    BadgeNotification {
        id,
        uid: new.uid.clone(),
        email: new.email.clone(),
        assertion_url: new.assertion_url.clone(),
        issued_on: new.issued_on,
        created_at: Utc::now(),
    }
}

/// Drives one request through the app and returns the status and body, converting middleware rejections into
/// their error responses the same way the real server does.
pub async fn send<S>(app: &S, req: actix_http::Request) -> (StatusCode, String)
where S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let res = match test::try_call_service(app, req).await {
        Ok(res) => res.into_parts().1,
        Err(e) => HttpResponse::from_error(e),
    };
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
