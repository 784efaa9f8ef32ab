//! Server-side notification subscribers.
//!
//! E-mail delivery is out of scope for this gateway, so the claim-link subscriber stops at composing the link
//! and writing it to the log, where a downstream mailer (or an operator) can pick it up.

use badge_webhook_engine::events::{NotificationIssuedEvent, NotificationSubscriber, SubscriberError};
use bwg_common::create_claim_url;
use futures::future::BoxFuture;
use log::*;

/// Composes the public claim-page link for every issued badge and logs it against the earner's address.
pub struct ClaimLinkSubscriber {
    base_url: String,
}

impl ClaimLinkSubscriber {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.to_string() }
    }

    fn claim_link_for(&self, event: &NotificationIssuedEvent) -> String {
        create_claim_url(&self.base_url, &event.notification.assertion_url)
    }
}

impl NotificationSubscriber for ClaimLinkSubscriber {
    fn name(&self) -> &str {
        "claim_link"
    }

    fn on_notification_issued(&self, event: NotificationIssuedEvent) -> BoxFuture<'_, Result<(), SubscriberError>> {
        Box::pin(async move {
            let link = self.claim_link_for(&event);
            info!("🔗️ Claim link for {} (badge [{}]): {link}", event.notification.email, event.notification.uid);
            Ok(())
        })
    }
}
