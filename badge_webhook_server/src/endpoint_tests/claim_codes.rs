use actix_web::{test, test::TestRequest, web, App};
use badge_webhook_engine::ClaimCodeApi;
use badgekit_tools::{BadgeKitApi, BadgeKitConfig};
use bwg_common::Secret;

use super::{helpers::send, mocks::MockClaimCodeStore};
use crate::routes::{list_badges, CreateClaimCodeRoute};

fn unreachable_badgekit() -> BadgeKitApi {
    // Nothing listens on port 1, so every mint attempt fails fast with a connection error.
    let config = BadgeKitConfig {
        api_url: "http://127.0.0.1:1".to_string(),
        api_key: Secret::new("test-master-secret".to_string()),
        system: "badges".to_string(),
        issuer: None,
        program: None,
    };
    BadgeKitApi::new(config).unwrap()
}

#[actix_web::test]
async fn mint_failure_is_a_500_and_records_nothing() {
    let _ = env_logger::try_init().ok();
    // No expectations on the store: a recorded code after a failed mint would panic the mock.
    let api = ClaimCodeApi::new(MockClaimCodeStore::new());
    let app = App::new()
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(unreachable_badgekit()))
        .service(CreateClaimCodeRoute::<MockClaimCodeStore>::new());
    let app = test::init_service(app).await;
    let req = TestRequest::post()
        .uri("/claim_codes")
        .set_json(serde_json::json!({"email": "alice@example.com", "badge": "rust-badge"}))
        .to_request();
    let (status, _body) = send(&app, req).await;
    assert_eq!(status.as_u16(), 500);
}

#[actix_web::test]
async fn badge_list_failure_is_a_500() {
    let _ = env_logger::try_init().ok();
    let app = App::new().app_data(web::Data::new(unreachable_badgekit())).service(list_badges);
    let app = test::init_service(app).await;
    let req = TestRequest::get().uri("/badges").to_request();
    let (status, _body) = send(&app, req).await;
    assert_eq!(status.as_u16(), 500);
}

#[actix_web::test]
async fn claim_code_requests_must_be_json() {
    let _ = env_logger::try_init().ok();
    let api = ClaimCodeApi::new(MockClaimCodeStore::new());
    let app = App::new()
        .app_data(web::Data::new(api))
        .app_data(web::Data::new(unreachable_badgekit()))
        .service(CreateClaimCodeRoute::<MockClaimCodeStore>::new());
    let app = test::init_service(app).await;
    let req = TestRequest::post().uri("/claim_codes").set_payload("not json").to_request();
    let (status, _body) = send(&app, req).await;
    assert!(status.is_client_error());
}
