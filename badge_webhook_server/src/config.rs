//! Server configuration.
//!
//! Everything is read from `BWG_*` environment variables exactly once, at startup. Nothing in the request path
//! reads ambient state: the webhook gate receives its [`WebhookAuthConfig`] at construction, which is also what
//! makes both enforced and bypass modes testable without touching process state.

use std::env;

use bwg_common::Secret;
use log::*;

use crate::errors::ServerError;

const DEFAULT_BWG_HOST: &str = "127.0.0.1";
const DEFAULT_BWG_PORT: u16 = 8640;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Public base url of this deployment, used when composing claim-page links.
    pub base_url: String,
    pub webhook: WebhookAuthConfig,
    /// Connection details for the upstream badge-issuing service.
    pub badgekit: badgekit_tools::BadgeKitConfig,
}

/// Configuration for the webhook authorization gate.
#[derive(Clone, Debug, Default)]
pub struct WebhookAuthConfig {
    /// The shared HS256 secret the issuing service signs webhook tokens with. `None` means the secret was never
    /// configured, which disables the endpoint rather than the checks: every signed delivery is rejected.
    pub secret: Option<Secret<String>>,
    /// When true, deliveries are admitted without any credential checks. For trusted or test deployments only.
    pub skip_auth: bool,
}

impl WebhookAuthConfig {
    pub fn new(secret: Option<Secret<String>>) -> Self {
        Self { secret, skip_auth: false }
    }

    pub fn with_skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BWG_HOST.to_string(),
            port: DEFAULT_BWG_PORT,
            database_url: String::default(),
            base_url: format!("http://{DEFAULT_BWG_HOST}:{DEFAULT_BWG_PORT}"),
            webhook: WebhookAuthConfig::default(),
            badgekit: badgekit_tools::BadgeKitConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BWG_HOST").ok().unwrap_or_else(|| DEFAULT_BWG_HOST.into());
        let port = env::var("BWG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BWG_PORT. {e} Using the default, {DEFAULT_BWG_PORT}, instead."
                    );
                    DEFAULT_BWG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BWG_PORT);
        let database_url = env::var("BWG_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ BWG_DATABASE_URL is not set. Please set it to the URL for the badge store database.");
            String::default()
        });
        let base_url = env::var("BWG_BASE_URL").ok().unwrap_or_else(|| {
            let fallback = format!("http://{host}:{port}");
            warn!("🪛️ BWG_BASE_URL is not set. Claim links will point at {fallback}.");
            fallback
        });
        let webhook = WebhookAuthConfig::try_from_env().unwrap_or_else(|e| {
            warn!("🪛️ Could not load the webhook authorization configuration. {e}. Using the default (enforced, no secret).");
            WebhookAuthConfig::default()
        });
        let badgekit = badgekit_tools::BadgeKitConfig::new_from_env_or_default();
        Self { host, port, database_url, base_url, webhook, badgekit }
    }
}

impl WebhookAuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let secret = match env::var("BWG_WEBHOOK_JWT_SECRET") {
            Ok(s) if s.is_empty() => None,
            Ok(s) => Some(Secret::new(s)),
            Err(_) => None,
        };
        if secret.is_none() {
            error!(
                "🚨️ BWG_WEBHOOK_JWT_SECRET is not set. The webhook endpoint cannot verify any delivery and will \
                 reject them all. 🚨️"
            );
        }
        let skip_auth = env::var("BWG_SKIP_WEBHOOK_AUTH").map(|s| &s == "1" || &s == "true").unwrap_or(false);
        if skip_auth {
            warn!(
                "🚨️ BWG_SKIP_WEBHOOK_AUTH is enabled. Webhook deliveries are accepted WITHOUT any credential \
                 checks. Do not run a production instance like this. 🚨️"
            );
        }
        Ok(Self { secret, skip_auth })
    }
}
