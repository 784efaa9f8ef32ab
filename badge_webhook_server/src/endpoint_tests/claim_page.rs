use actix_web::{test, test::TestRequest, App};
use bwg_common::encode_param;

use super::helpers::send;
use crate::routes::claim_page;

async fn get_claim_page(param: &str) -> (actix_web::http::StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let app = App::new().service(claim_page);
    let app = test::init_service(app).await;
    let req = TestRequest::get().uri(&format!("/claim/{param}")).to_request();
    send(&app, req).await
}

#[actix_web::test]
async fn renders_the_decoded_assertion_url() {
    let url = "http://example.com/assertions/1";
    let (status, body) = get_claim_page(&encode_param(url)).await;
    assert!(status.is_success());
    assert!(body.contains(r#"<a href="http://example.com/assertions/1">"#), "was: {body}");
}

#[actix_web::test]
async fn escapes_hostile_decoded_urls() {
    let url = r#"http://x/"><script>alert(1)</script>"#;
    let (status, body) = get_claim_page(&encode_param(url)).await;
    assert!(status.is_success());
    assert!(!body.contains("<script>"), "was: {body}");
    assert!(body.contains("&lt;script&gt;"), "was: {body}");
}

#[actix_web::test]
async fn rejects_malformed_claim_parameters() {
    let (status, body) = get_claim_page("definitely*not!base64").await;
    assert_eq!(status.as_u16(), 400);
    assert!(body.contains("claim link"), "was: {body}");
}
