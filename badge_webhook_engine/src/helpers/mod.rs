mod validation;

pub use validation::{
    assertion_url_is_valid,
    email_is_valid,
    invalid_notification_fields,
    uid_is_valid,
    MAX_FIELD_LENGTH,
};
