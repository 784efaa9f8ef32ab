//! # Badge webhook server
//! This module hosts the HTTP surface of the badge webhook gateway. It is responsible for:
//! Listening for incoming issued-badge webhook deliveries from the badge-issuing service.
//! Authorizing each delivery (signed token + body-hash binding) before the body is parsed.
//! Validating the payload and handing it to the engine for storage and event fan-out.
//! Serving claim pages and the claim-code endpoints.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/hooks/issued`: The webhook route for receiving issued-badge events. Wrapped in the authorization
//!   middleware.
//! * `/notifications`: Lists the stored badge notifications.
//! * `/claim/{param}`: Renders a claim page for an encoded assertion url.
//! * `/claim_codes`: Mints a claim code via the issuing service and records it locally.

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;

pub mod data_objects;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod subscribers;
pub mod webhook_payload;

#[cfg(test)]
mod endpoint_tests;
