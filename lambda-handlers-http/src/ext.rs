//! Schema-checked accessors over the normalized request.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::body::{json_body_parser, RequestError};
use crate::request::{NormalizedRequest, RequestBody};

/// Extract typed values from a request, with serde as the schema.
///
/// Decode failures are typed and recoverable; route them to a 400-style
/// response.
pub trait RequestExt {
    /// The JSON body decoded into `T`.
    ///
    /// Runs the conditional body decode first, so this works whether or not
    /// the adapter already replaced the body with a JSON value. A missing
    /// body decodes as JSON null; a body with a non-JSON content type
    /// decodes as a JSON string.
    fn body_json<T: DeserializeOwned>(&self) -> Result<T, RequestError>;

    /// Path parameters decoded into `T`; an absent map decodes as empty.
    fn path_params<T: DeserializeOwned>(&self) -> Result<T, RequestError>;

    /// Query string parameters decoded into `T`; an absent map decodes as
    /// empty.
    fn query_params<T: DeserializeOwned>(&self) -> Result<T, RequestError>;
}

impl RequestExt for NormalizedRequest {
    fn body_json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let parsed = json_body_parser(self.clone())?;
        let value = match parsed.body {
            Some(RequestBody::Json(value)) => value,
            Some(RequestBody::Text(text)) => Value::String(text),
            None => Value::Null,
        };
        serde_json::from_value(value).map_err(RequestError::Json)
    }

    fn path_params<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        decode_map(self.path_parameters.clone().unwrap_or_default())
    }

    fn query_params<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        decode_map(self.query_string_parameters.clone().unwrap_or_default())
    }
}

fn decode_map<T: DeserializeOwned>(
    map: std::collections::HashMap<String, String>,
) -> Result<T, RequestError> {
    let value = serde_json::to_value(map)?;
    serde_json::from_value(value).map_err(RequestError::Json)
}
