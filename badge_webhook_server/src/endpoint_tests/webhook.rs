use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

use actix_web::{http::header, test, test::TestRequest, web, App};
use badge_webhook_engine::{
    events::{EventBus, NotificationIssuedEvent, NotificationSubscriber, SubscriberError},
    traits::StoreError,
    NotificationApi,
};
use chrono::{TimeZone, Utc};
use futures::future::BoxFuture;
use log::*;

use super::{
    helpers::{auth_header_for, issue_webhook_token, send, stored_from, webhook_config},
    mocks::MockNotificationStore,
};
use crate::{
    config::WebhookAuthConfig,
    middleware::WebhookAuthMiddlewareFactory,
    routes::IssuedWebhookRoute,
    webhook_payload::validate_payload,
};

const GOLDEN_BODY: &[u8] =
    br#"{"action":"issued","uid":"u1","email":"a@b.com","assertionUrl":"http://x/a1","issuedOn":1400000000}"#;

struct CountingSubscriber {
    calls: Arc<AtomicI32>,
}

impl NotificationSubscriber for CountingSubscriber {
    fn name(&self) -> &str {
        "counting"
    }

    fn on_notification_issued(&self, _event: NotificationIssuedEvent) -> BoxFuture<'_, Result<(), SubscriberError>> {
        Box::pin(async move {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

struct AlwaysFailingSubscriber;

impl NotificationSubscriber for AlwaysFailingSubscriber {
    fn name(&self) -> &str {
        "broken_mailer"
    }

    fn on_notification_issued(&self, _event: NotificationIssuedEvent) -> BoxFuture<'_, Result<(), SubscriberError>> {
        Box::pin(async { Err(SubscriberError("smtp relay is down".to_string())) })
    }
}

fn accepting_store() -> MockNotificationStore {
    let mut store = MockNotificationStore::new();
    store.expect_insert_notification().returning(|n| Ok(stored_from(&n, 1)));
    store
}

async fn post_webhook(
    config: WebhookAuthConfig,
    store: MockNotificationStore,
    bus: EventBus,
    auth_header: Option<String>,
    body: &'static [u8],
) -> (actix_web::http::StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let api = NotificationApi::new(store, Arc::new(bus));
    let app = App::new().app_data(web::Data::new(api)).service(
        web::scope("/hooks")
            .wrap(WebhookAuthMiddlewareFactory::new(config))
            .service(IssuedWebhookRoute::<MockNotificationStore>::new()),
    );
    let app = test::init_service(app).await;
    let mut req = TestRequest::post().uri("/hooks/issued").set_payload(body);
    if let Some(h) = auth_header {
        req = req.insert_header((header::AUTHORIZATION, h));
    }
    debug!("Making webhook request");
    send(&app, req.to_request()).await
}

#[actix_web::test]
async fn golden_delivery_is_accepted_and_stored() {
    let mut store = MockNotificationStore::new();
    store
        .expect_insert_notification()
        .withf(|n| {
            n.uid == "u1" &&
                n.email == "a@b.com" &&
                n.assertion_url == "http://x/a1" &&
                n.issued_on == Utc.with_ymd_and_hms(2014, 5, 13, 16, 53, 20).unwrap()
        })
        .returning(|n| Ok(stored_from(&n, 1)));
    let header = auth_header_for(GOLDEN_BODY);
    let (status, body) = post_webhook(webhook_config(), store, EventBus::new(), Some(header), GOLDEN_BODY).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"status":"ok"}"#);
}

#[actix_web::test]
async fn failing_subscriber_never_fails_the_request() {
    let calls = Arc::new(AtomicI32::new(0));
    let mut bus = EventBus::new();
    // the broken subscriber sits in front, so a propagated failure would starve the counting one
    bus.subscribe(Arc::new(AlwaysFailingSubscriber))
        .subscribe(Arc::new(CountingSubscriber { calls: calls.clone() }));
    let header = auth_header_for(GOLDEN_BODY);
    let (status, body) = post_webhook(webhook_config(), accepting_store(), bus, Some(header), GOLDEN_BODY).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"status":"ok"}"#);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_web::test]
async fn tampered_body_is_rejected_with_bad_signature() {
    // token commits to the golden body; one byte of the delivered body differs
    let header = auth_header_for(GOLDEN_BODY);
    let tampered: &'static [u8] =
        br#"{"action":"issued","uid":"u2","email":"a@b.com","assertionUrl":"http://x/a1","issuedOn":1400000000}"#;
    let (status, body) = post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), Some(header), tampered).await;
    assert_eq!(status.as_u16(), 403);
    assert!(body.contains("bad_signature"), "was: {body}");
}

#[actix_web::test]
async fn missing_credentials_are_rejected_with_401() {
    let (status, body) =
        post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), None, GOLDEN_BODY).await;
    assert_eq!(status.as_u16(), 401);
    assert!(body.contains("missing_auth"), "was: {body}");
}

#[actix_web::test]
async fn malformed_header_is_rejected_with_403() {
    let token = issue_webhook_token(GOLDEN_BODY, super::helpers::TEST_SECRET);
    let header = format!("Bearer {token}");
    let (status, body) =
        post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), Some(header), GOLDEN_BODY).await;
    assert_eq!(status.as_u16(), 403);
    assert!(body.contains("malformed_header"), "was: {body}");
}

#[actix_web::test]
async fn token_signed_with_wrong_key_is_rejected_with_403() {
    let header = format!("JWT token=\"{}\"", issue_webhook_token(GOLDEN_BODY, "some other secret"));
    let (status, body) =
        post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), Some(header), GOLDEN_BODY).await;
    assert_eq!(status.as_u16(), 403);
    assert!(body.contains("bad_auth"), "was: {body}");
}

#[actix_web::test]
async fn unconfigured_secret_rejects_valid_tokens_with_403() {
    let config = WebhookAuthConfig::new(None);
    let header = auth_header_for(GOLDEN_BODY);
    let (status, body) =
        post_webhook(config, MockNotificationStore::new(), EventBus::new(), Some(header), GOLDEN_BODY).await;
    assert_eq!(status.as_u16(), 403);
    assert!(body.contains("bad_auth"), "was: {body}");
}

#[actix_web::test]
async fn bypass_mode_skips_auth_but_still_validates_the_payload() {
    let config = webhook_config().with_skip_auth();
    // no Authorization header at all, yet the request reaches the payload validator and the store
    let (status, body) = post_webhook(config.clone(), accepting_store(), EventBus::new(), None, GOLDEN_BODY).await;
    assert!(status.is_success());
    assert_eq!(body, r#"{"status":"ok"}"#);
    // a bad payload is still a 400, proving the gate was the only thing skipped
    let (status, _) = post_webhook(config, MockNotificationStore::new(), EventBus::new(), None, b"not json").await;
    assert_eq!(status.as_u16(), 400);
}

#[actix_web::test]
async fn unparsable_json_is_a_400() {
    let body: &'static [u8] = b"{this is not json";
    let header = auth_header_for(body);
    let (status, response) =
        post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), Some(header), body).await;
    assert_eq!(status.as_u16(), 400);
    assert!(response.contains("not a JSON object"), "was: {response}");
}

#[actix_web::test]
async fn schema_mismatch_is_a_400() {
    let body: &'static [u8] = br#"{"action":"issued","uid":"u1"}"#;
    let header = auth_header_for(body);
    let (status, response) =
        post_webhook(webhook_config(), MockNotificationStore::new(), EventBus::new(), Some(header), body).await;
    assert_eq!(status.as_u16(), 400);
    assert!(response.contains("schema"), "was: {response}");
}

#[actix_web::test]
async fn store_side_validation_failure_is_a_400() {
    // the store re-validates independently; simulate it disagreeing with the payload validator
    let mut store = MockNotificationStore::new();
    store
        .expect_insert_notification()
        .returning(|_| Err(StoreError::Invalid(vec!["email".to_string()])));
    let header = auth_header_for(GOLDEN_BODY);
    let (status, response) = post_webhook(webhook_config(), store, EventBus::new(), Some(header), GOLDEN_BODY).await;
    assert_eq!(status.as_u16(), 400);
    assert!(response.contains("email"), "was: {response}");
}

#[actix_web::test]
async fn validator_and_gate_agree_on_the_golden_body() {
    // the exact scenario from the interface contract: hash of these bytes, admitted, parsed, 2014-05-13T16:53:20Z
    let notification = validate_payload(GOLDEN_BODY).unwrap();
    assert_eq!(notification.issued_on, Utc.with_ymd_and_hms(2014, 5, 13, 16, 53, 20).unwrap());
}
