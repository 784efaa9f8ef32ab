//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (e.g. I/O, database operations)
//! must therefore be expressed as futures or asynchronous functions; async handlers get executed concurrently by
//! worker threads and don't block execution.

use actix_web::{get, web, HttpResponse, Responder};
use badge_webhook_engine::{
    traits::{ClaimCodeManagement, NotificationManagement},
    ClaimCodeApi,
    NotificationApi,
};
use badgekit_tools::BadgeKitApi;
use bwg_common::decode_param;
use log::*;

use crate::{
    data_objects::{ClaimCodeRequest, JsonResponse},
    errors::ServerError,
    helpers::escape_html,
    integrations::badgekit::{live_badge_list, live_claim_code_info, mint_and_record_claim_code},
    webhook_payload::validate_payload,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Webhook  ----------------------------------------------------
route!(issued_webhook => Post "/issued" impl NotificationManagement);
/// Route handler for the issued-badge webhook.
///
/// The authorization middleware has already admitted this delivery and re-injected the raw body, so the handler
/// only validates the payload and hands it to the engine. The issuing service retries any non-200 response, so a
/// subscriber failure must never fail the request; the engine isolates those and reports them in the outcomes.
pub async fn issued_webhook<B: NotificationManagement>(
    body: web::Bytes,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("🎖️ Received issued-badge webhook delivery");
    let notification = validate_payload(&body)?;
    let (stored, outcomes) = api.process_notification(notification).await?;
    let failures = outcomes.iter().filter(|o| !o.succeeded()).count();
    info!(
        "🎖️ Accepted badge notification [{}] for {}. {} of {} subscriber deliveries failed.",
        stored.uid,
        stored.email,
        failures,
        outcomes.len()
    );
    Ok(HttpResponse::Ok().json(JsonResponse::ok()))
}

//----------------------------------------------   Notifications  ----------------------------------------------
route!(get_notifications => Get "/notifications" impl NotificationManagement);
pub async fn get_notifications<B: NotificationManagement>(
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET notifications");
    let notifications = api.fetch_notifications().await?;
    Ok(HttpResponse::Ok().json(notifications))
}

//----------------------------------------------   Claim page  -------------------------------------------------
/// Renders a claim page for a url-safe encoded assertion url.
///
/// The decoded url is untrusted input straight from the request path: it is escaped and rendered as a link only,
/// and is never fetched server-side.
#[get("/claim/{param}")]
pub async fn claim_page(path: web::Path<String>) -> Result<HttpResponse, ServerError> {
    let param = path.into_inner();
    let assertion_url = decode_param(&param).map_err(|e| {
        debug!("💻️ Could not decode claim link parameter: {e}");
        ServerError::InvalidClaimLink
    })?;
    debug!("💻️ Rendering claim page");
    let url = escape_html(&assertion_url);
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Claim your badge</title></head>\n<body>\n<h1>You've earned a \
         badge!</h1>\n<p><a href=\"{url}\">Claim your badge</a></p>\n</body>\n</html>\n"
    );
    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(page))
}

//----------------------------------------------   Claim codes  ------------------------------------------------
route!(create_claim_code => Post "/claim_codes" impl ClaimCodeManagement);
/// Mints a claim code at the issuing service, then records it locally.
pub async fn create_claim_code<B: ClaimCodeManagement>(
    body: web::Json<ClaimCodeRequest>,
    badgekit: web::Data<BadgeKitApi>,
    api: web::Data<ClaimCodeApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST create claim code for badge '{}'", request.badge);
    let recorded = mint_and_record_claim_code(request, badgekit.as_ref(), api.as_ref()).await?;
    Ok(HttpResponse::Ok().json(recorded))
}

/// Lists the badges available in the configured issuing context.
#[get("/badges")]
pub async fn list_badges(badgekit: web::Data<BadgeKitApi>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET badge list");
    let badges = live_badge_list(badgekit.as_ref()).await?;
    Ok(HttpResponse::Ok().json(badges))
}

/// Fetches the live state of a claim code from the issuing service. Local rows are a record of the mint, not a
/// cache of claim state, so this always round-trips.
#[get("/claim_codes/{badge}/{code}")]
pub async fn claim_code_info(
    path: web::Path<(String, String)>,
    badgekit: web::Data<BadgeKitApi>,
) -> Result<HttpResponse, ServerError> {
    let (badge, code) = path.into_inner();
    debug!("💻️ GET live claim code info for badge '{badge}'");
    let info = live_claim_code_info(&code, &badge, badgekit.as_ref()).await?;
    Ok(HttpResponse::Ok().json(info))
}
