//! Webhook authorization middleware for Actix Web.
//!
//! This middleware buffers the raw request body, runs the authorization gate from [`crate::auth`] over the
//! `Authorization` header and the exact body bytes, and re-injects the body so the handler downstream can still
//! read it. The digest in the token commits to the bytes on the wire, so the gate has to see them before any
//! parsing or deserialization happens.
//!
//! Wrap the webhook scope with this middleware; handlers inside it can trust that the delivery was admitted.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_http::h1;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorBadRequest,
    http::header,
    web,
    Error,
};
use futures::future::LocalBoxFuture;
use log::{trace, warn};

use crate::{auth::authorize_webhook, config::WebhookAuthConfig, errors::GateRejection};

pub struct WebhookAuthMiddlewareFactory {
    config: WebhookAuthConfig,
}

impl WebhookAuthMiddlewareFactory {
    pub fn new(config: WebhookAuthConfig) -> Self {
        WebhookAuthMiddlewareFactory { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for WebhookAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = WebhookAuthMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(WebhookAuthMiddlewareService { config: self.config.clone(), service: Rc::new(service) }))
    }
}

pub struct WebhookAuthMiddlewareService<S> {
    config: WebhookAuthConfig,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for WebhookAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let config = self.config.clone();
        Box::pin(async move {
            trace!("🔐️ Authorizing webhook delivery");
            if config.skip_auth {
                trace!("🔐️ Webhook authorization is disabled. Allowing request.");
                return service.call(req).await;
            }
            let data = req.extract::<web::Bytes>().await.map_err(|e| {
                warn!("🔐️ Failed to extract request data: {:?}", e);
                ErrorBadRequest("Failed to extract request data.")
            })?;
            // A header that is present but not readable as a string is malformed, not missing.
            let auth_header = match req.headers().get(header::AUTHORIZATION).map(|v| v.to_str()) {
                None => None,
                Some(Ok(s)) => Some(s.to_string()),
                Some(Err(_)) => {
                    warn!("🔐️ Authorization header is not valid UTF-8. Rejecting the delivery.");
                    return Err(GateRejection::MalformedHeader.into());
                },
            };
            match authorize_webhook(auth_header.as_deref(), &data, &config) {
                Ok(()) => {
                    trace!("🔐️ Webhook authorization for request ✅️");
                    req.set_payload(bytes_to_payload(data));
                    service.call(req).await
                },
                Err(rejection) => {
                    warn!("🔐️ Webhook delivery rejected: {rejection}");
                    Err(rejection.into())
                },
            }
        })
    }
}

fn bytes_to_payload(buf: web::Bytes) -> Payload {
    let (_, mut pl) = h1::Payload::create(true);
    pl.unread_data(buf);
    Payload::from(pl)
}
