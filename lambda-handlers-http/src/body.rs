//! Conditional JSON body decoding.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::request::{NormalizedRequest, RequestBody};

/// Typed, recoverable errors raised while decoding an inbound request.
#[derive(Debug)]
pub enum RequestError {
    /// Body flagged as base64 but the encoding is invalid.
    Base64(base64::DecodeError),
    /// Base64 payload did not decode to UTF-8 text.
    Utf8(std::string::FromUtf8Error),
    /// Body or parameter map did not match the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Base64(err) => write!(f, "invalid base64 body: {}", err),
            RequestError::Utf8(err) => write!(f, "body is not utf-8 text: {}", err),
            RequestError::Json(err) => write!(f, "invalid json: {}", err),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Base64(err) => Some(err),
            RequestError::Utf8(err) => Some(err),
            RequestError::Json(err) => Some(err),
        }
    }
}

impl From<base64::DecodeError> for RequestError {
    fn from(err: base64::DecodeError) -> Self {
        RequestError::Base64(err)
    }
}

impl From<std::string::FromUtf8Error> for RequestError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        RequestError::Utf8(err)
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Json(err)
    }
}

/// Media types treated as JSON: exactly `application/json`, or any type
/// whose subtype ends in `+json`, which covers vendor types such as
/// `application/vnd.api+json`. Parameters after `;` are ignored.
fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return false;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media_type == "application/json" || media_type.ends_with("+json")
}

/// Decode the request body as JSON when the content type calls for it.
///
/// An absent body or a non-JSON content type passes through unchanged. When
/// decoding happens, the body is base64-decoded first if the platform
/// flagged it, then parsed; the decoded value replaces `body` and the text
/// as delivered moves to `raw_body`. Runs after header normalization, which
/// is what makes the `content-type` lookup reliable.
pub fn json_body_parser(mut request: NormalizedRequest) -> Result<NormalizedRequest, RequestError> {
    let json = is_json_content_type(request.header("content-type"));
    match request.body.take() {
        Some(RequestBody::Text(text)) if json => {
            let decoded = if request.is_base64_encoded {
                String::from_utf8(BASE64.decode(text.as_bytes())?)?
            } else {
                text.clone()
            };
            let value: serde_json::Value = serde_json::from_str(&decoded)?;
            request.body = Some(RequestBody::Json(value));
            request.raw_body = Some(text);
            Ok(request)
        }
        body => {
            request.body = body;
            Ok(request)
        }
    }
}
