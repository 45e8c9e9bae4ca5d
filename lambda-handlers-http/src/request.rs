//! API Gateway REST proxy request types and header normalization.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Header map as API Gateway delivers it: values may be explicitly null.
pub type Headers = HashMap<String, Option<String>>;

/// API Gateway REST proxy request as delivered on the wire.
///
/// Header casing is whatever the client sent. [`header_normalizer`] folds
/// the keys to lowercase while keeping the delivered map around.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub resource: Option<String>,
    pub path: Option<String>,
    pub http_method: Option<String>,
    pub headers: Headers,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub stage_variables: Option<HashMap<String, String>>,
    pub request_context: Value,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

/// Body of a normalized request: raw text until
/// [`json_body_parser`](crate::json_body_parser) replaces it with the
/// decoded JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Json(Value),
}

/// Proxy request after header normalization and, once
/// [`json_body_parser`](crate::json_body_parser) ran, conditional JSON body
/// decoding.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRequest {
    pub resource: Option<String>,
    pub path: Option<String>,
    pub http_method: Option<String>,
    /// Header keys folded to lowercase; values untouched.
    pub headers: Headers,
    /// Headers exactly as delivered, original casing preserved.
    pub raw_headers: Headers,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub stage_variables: Option<HashMap<String, String>>,
    pub request_context: Value,
    pub body: Option<RequestBody>,
    /// Original body text, set once a JSON decode replaced `body`.
    pub raw_body: Option<String>,
    pub is_base64_encoded: bool,
}

impl NormalizedRequest {
    /// Value of a header by its lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.as_deref())
    }
}

/// Copy of the header map with every key folded to lowercase. Values pass
/// through verbatim, explicit nulls included. Idempotent on keys.
pub fn normalize_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

/// Normalize the request's header keys to lowercase, retaining the
/// delivered map under `raw_headers` for case-sensitive consumers.
pub fn header_normalizer(request: ProxyRequest) -> NormalizedRequest {
    NormalizedRequest {
        resource: request.resource,
        path: request.path,
        http_method: request.http_method,
        headers: normalize_headers(&request.headers),
        raw_headers: request.headers,
        multi_value_headers: request.multi_value_headers,
        query_string_parameters: request.query_string_parameters,
        multi_value_query_string_parameters: request.multi_value_query_string_parameters,
        path_parameters: request.path_parameters,
        stage_variables: request.stage_variables,
        request_context: request.request_context,
        body: request.body.map(RequestBody::Text),
        raw_body: None,
        is_base64_encoded: request.is_base64_encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn mixed_case_headers() -> Headers {
        hashmap! {
            "Content-Type".to_string() => Some("application/json".to_string()),
            "X-Request-Id".to_string() => None,
        }
    }

    #[test]
    fn folds_keys_and_keeps_values() {
        let normalized = normalize_headers(&mixed_case_headers());
        assert_eq!(
            normalized["content-type"],
            Some("application/json".to_string())
        );
        assert_eq!(normalized["x-request-id"], None);
        assert_eq!(normalized.len(), 2);
    }

    #[test]
    fn normalizing_twice_equals_normalizing_once() {
        let once = normalize_headers(&mixed_case_headers());
        let twice = normalize_headers(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn original_casing_stays_reachable() {
        let request = ProxyRequest {
            headers: mixed_case_headers(),
            body: Some("hello".to_string()),
            ..Default::default()
        };
        let normalized = header_normalizer(request);
        assert_eq!(normalized.raw_headers, mixed_case_headers());
        assert_eq!(normalized.header("content-type"), Some("application/json"));
        assert_eq!(normalized.body, Some(RequestBody::Text("hello".to_string())));
        assert_eq!(normalized.raw_body, None);
    }

    #[test]
    fn deserializes_a_wire_event() {
        let request: ProxyRequest = serde_json::from_value(serde_json::json!({
            "httpMethod": "POST",
            "path": "/greetings",
            "headers": { "Content-Type": "application/json" },
            "pathParameters": { "id": "7" },
            "body": "{}",
            "isBase64Encoded": false,
        }))
        .expect("failed to deserialize request");
        assert_eq!(request.http_method.as_deref(), Some("POST"));
        assert_eq!(
            request.path_parameters,
            Some(hashmap! { "id".to_string() => "7".to_string() })
        );
    }
}
