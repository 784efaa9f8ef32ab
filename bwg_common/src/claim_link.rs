//! # Claim link parameter format
//!
//! Claim pages are addressed as `/claim/{param}`, where `param` carries the badge assertion url for the page.
//! The url is encoded as URL-safe base64 with the `=` padding stripped, so that it can live in a path segment
//! without any percent-encoding. Decoding restores the padding before handing the string to the base64 decoder.
//!
//! The decoded url comes straight from the request path and is untrusted. It is fine to display it or link to it,
//! but callers must never fetch it server-side without checking it against an allow-list first.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("The claim parameter is not url-safe base64 encoding a UTF-8 string")]
    Malformed,
}

/// Encode an assertion url as a claim-page path parameter.
pub fn encode_param(url: &str) -> String {
    base64::encode_config(url, base64::URL_SAFE_NO_PAD)
}

/// Decode a claim-page path parameter produced by [`encode_param`].
///
/// Inputs that are not valid URL-safe base64, or that decode to something other than UTF-8, are rejected with
/// [`DecodeError::Malformed`].
pub fn decode_param(param: &str) -> Result<String, DecodeError> {
    let padding = "=".repeat((4 - param.len() % 4) % 4);
    let bytes =
        base64::decode_config(format!("{param}{padding}"), base64::URL_SAFE).map_err(|_| DecodeError::Malformed)?;
    String::from_utf8(bytes).map_err(|_| DecodeError::Malformed)
}

/// Build the public claim-page url for an assertion, e.g.
/// `https://badges.example.com/claim/aHR0cDovL2V4YW1wbGUuY29tL2Fzc2VydGlvbnMvMQ`.
pub fn create_claim_url(base_url: &str, assertion_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/claim/{}", encode_param(assertion_url))
}
