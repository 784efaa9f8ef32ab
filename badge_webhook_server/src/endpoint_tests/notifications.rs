use std::sync::Arc;

use actix_web::{test, test::TestRequest, web, App};
use badge_webhook_engine::{
    db_types::{BadgeNotification, NewBadgeNotification},
    events::EventBus,
    traits::StoreError,
    NotificationApi,
};
use chrono::{TimeZone, Utc};

use super::{helpers::send, mocks::MockNotificationStore};
use crate::routes::GetNotificationsRoute;

fn sample_rows() -> Vec<BadgeNotification> {
    let older = NewBadgeNotification::new(
        "u1",
        "a@b.com",
        "http://x/a1",
        Utc.with_ymd_and_hms(2014, 5, 13, 16, 53, 20).unwrap(),
    );
    let newer = NewBadgeNotification::new(
        "u2",
        "b@c.com",
        "http://x/a2",
        Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap(),
    );
    vec![super::helpers::stored_from(&older, 1), super::helpers::stored_from(&newer, 2)]
}

async fn get_notifications(store: MockNotificationStore) -> (actix_web::http::StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let api = NotificationApi::new(store, Arc::new(EventBus::new()));
    let app = App::new()
        .app_data(web::Data::new(api))
        .service(GetNotificationsRoute::<MockNotificationStore>::new());
    let app = test::init_service(app).await;
    let req = TestRequest::get().uri("/notifications").to_request();
    send(&app, req).await
}

#[actix_web::test]
async fn lists_stored_notifications_in_issuance_order() {
    let mut store = MockNotificationStore::new();
    store.expect_fetch_notifications().returning(|| Ok(sample_rows()));
    let (status, body) = get_notifications(store).await;
    assert!(status.is_success());
    let rows: Vec<BadgeNotification> = serde_json::from_str(&body).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].uid, "u1");
    assert_eq!(rows[1].uid, "u2");
    // wire format is camelCase
    assert!(body.contains("assertionUrl"), "was: {body}");
    assert!(body.contains("issuedOn"), "was: {body}");
}

#[actix_web::test]
async fn backend_failure_is_a_500() {
    let mut store = MockNotificationStore::new();
    store
        .expect_fetch_notifications()
        .returning(|| Err(StoreError::DatabaseError("the database fell over".to_string())));
    let (status, body) = get_notifications(store).await;
    assert_eq!(status.as_u16(), 500);
    assert!(body.contains("the database fell over"), "was: {body}");
}
