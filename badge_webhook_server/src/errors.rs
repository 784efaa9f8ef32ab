use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use badge_webhook_engine::traits::StoreError;
use thiserror::Error;

/// Failures from the webhook token verifier itself. These never reach a client directly; the authorization gate
/// collapses them into a [`GateRejection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No webhook signing secret is configured")]
    MissingSecret,
    #[error("The webhook token could not be verified")]
    InvalidToken,
}

/// The terminal rejection states of the webhook authorization gate. Each one maps to an HTTP status: 401 when no
/// credentials were supplied at all, 403 when credentials are present but invalid. The messages are short
/// operator-facing reasons and never contain the secret or the token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateRejection {
    #[error("missing_auth: no Authorization header was supplied")]
    MissingAuth,
    #[error("malformed_header: the Authorization header is not of the form JWT token=\"...\"")]
    MalformedHeader,
    #[error("bad_auth: the supplied token could not be verified")]
    BadAuth,
    #[error("bad_signature: the token's body hash does not match the request body")]
    BadSignature,
}

impl ResponseError for GateRejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingAuth => StatusCode::UNAUTHORIZED,
            Self::MalformedHeader | Self::BadAuth | Self::BadSignature => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::plaintext()).body(self.to_string())
    }
}

/// Ways an authorized webhook body can still fail validation. All of these are client errors (400).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("The request body is not a JSON object")]
    NotJson,
    #[error("The payload keys do not match the issued-badge schema")]
    SchemaMismatch,
    #[error("issuedOn is not a valid epoch timestamp")]
    BadTimestamp,
    #[error("Invalid field(s): {}", .0.join(", "))]
    FieldValidation(Vec<String>),
}

impl ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::plaintext()).body(self.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("{0}")]
    AuthorizationError(#[from] GateRejection),
    #[error("{0}")]
    PayloadError(#[from] PayloadError),
    #[error("The claim link is not valid")]
    InvalidClaimLink,
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthorizationError(e) => e.status_code(),
            Self::PayloadError(e) => e.status_code(),
            Self::InvalidClaimLink => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) |
            Self::BackendError(_) |
            Self::IOError(_) |
            Self::ConfigurationError(_) |
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Error responses are plain text. Only success responses carry JSON bodies.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::plaintext()).body(self.to_string())
    }
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid(fields) => Self::PayloadError(PayloadError::FieldValidation(fields)),
            StoreError::DatabaseError(e) => Self::BackendError(e),
        }
    }
}
