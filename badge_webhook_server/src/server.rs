use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use badge_webhook_engine::{
    events::{EventBus, LoggingSubscriber},
    ClaimCodeApi,
    NotificationApi,
    SqliteDatabase,
};
use badgekit_tools::BadgeKitApi;
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    middleware::WebhookAuthMiddlewareFactory,
    routes::{
        claim_code_info,
        claim_page,
        health,
        list_badges,
        CreateClaimCodeRoute,
        GetNotificationsRoute,
        IssuedWebhookRoute,
    },
    subscribers::ClaimLinkSubscriber,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Builds the server. The subscriber list is assembled here, per worker, before any request is served. The built-in
/// subscribers are the logger and the claim-link composer; deployment-specific subscribers get registered alongside
/// them.
pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let badgekit =
        BadgeKitApi::new(config.badgekit.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = HttpServer::new(move || {
        let mut bus = EventBus::new();
        bus.subscribe(Arc::new(LoggingSubscriber));
        bus.subscribe(Arc::new(ClaimLinkSubscriber::new(&config.base_url)));
        debug!("💻️ Notification event bus ready with {} subscriber(s)", bus.subscriber_count());
        let notifications_api = NotificationApi::new(db.clone(), Arc::new(bus));
        let claim_codes_api = ClaimCodeApi::new(db.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bwg::access_log"))
            .app_data(web::Data::new(notifications_api))
            .app_data(web::Data::new(claim_codes_api))
            .app_data(web::Data::new(badgekit.clone()));
        // The gate middleware only wraps the webhook scope. Everything else is unauthenticated by design.
        let hooks_scope = web::scope("/hooks")
            .wrap(WebhookAuthMiddlewareFactory::new(config.webhook.clone()))
            .service(IssuedWebhookRoute::<SqliteDatabase>::new());
        app.service(health)
            .service(GetNotificationsRoute::<SqliteDatabase>::new())
            .service(CreateClaimCodeRoute::<SqliteDatabase>::new())
            .service(claim_code_info)
            .service(list_badges)
            .service(claim_page)
            .service(hooks_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
