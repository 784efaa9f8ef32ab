use badge_webhook_engine::{
    db_types::{BadgeNotification, ClaimCode, NewBadgeNotification, NewClaimCode},
    traits::{ClaimCodeError, ClaimCodeManagement, NotificationManagement, StoreError},
};
use mockall::mock;

mock! {
    pub NotificationStore {}

    impl Clone for NotificationStore {
        fn clone(&self) -> Self;
    }

    impl NotificationManagement for NotificationStore {
        fn url(&self) -> &str;
        async fn insert_notification(&self, notification: NewBadgeNotification) -> Result<BadgeNotification, StoreError>;
        async fn fetch_notifications(&self) -> Result<Vec<BadgeNotification>, StoreError>;
    }
}

mock! {
    pub ClaimCodeStore {}

    impl Clone for ClaimCodeStore {
        fn clone(&self) -> Self;
    }

    impl ClaimCodeManagement for ClaimCodeStore {
        async fn insert_claim_code(&self, code: NewClaimCode) -> Result<ClaimCode, ClaimCodeError>;
        async fn fetch_claim_code(&self, code: &str) -> Result<Option<ClaimCode>, ClaimCodeError>;
        async fn fetch_claim_codes(&self) -> Result<Vec<ClaimCode>, ClaimCodeError>;
    }
}
