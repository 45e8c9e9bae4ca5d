//! API Gateway adaptations for `lambda_handlers`.
//!
//! [`proxy_handler`] turns an async computation over a [`NormalizedRequest`]
//! into a handler for the REST proxy integration. Before the computation
//! runs, the inbound event goes through two composed transforms:
//!
//! - header keys are folded to lowercase (HTTP header names are
//!   case-insensitive, but the platform delivers whatever casing the client
//!   sent); the delivered map stays reachable under `raw_headers`;
//! - the body is decoded as JSON when the normalized `content-type` names a
//!   JSON-family media type, with the original text kept under `raw_body`.
//!
//! Typed request payloads come out of the [`RequestExt`] accessors, with
//! serde as the schema:
//!
//! ```rust,no_run
//! use lambda_handlers_http::{
//!     json_response, proxy_handler, Context, Error, NormalizedRequest, RequestExt,
//! };
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Greeting {
//!     message: String,
//! }
//!
//! let handler = proxy_handler(|request: NormalizedRequest, _: Context| async move {
//!     let response = match request.body_json::<Greeting>() {
//!         Ok(greeting) => json_response(200, json!({ "echo": greeting.message })),
//!         Err(err) => json_response(400, json!({ "message": err.to_string() })),
//!     };
//!     Ok::<_, Error>(response)
//! });
//! ```

pub mod authorizer;
pub mod body;
pub mod ext;
pub mod handler;
pub mod request;
pub mod response;

pub use authorizer::{authorizer_handler, AuthorizerHandler, Unauthorized};
pub use body::{json_body_parser, RequestError};
pub use ext::RequestExt;
pub use handler::{proxy_handler, ProxyHandler};
pub use request::{
    header_normalizer, normalize_headers, Headers, NormalizedRequest, ProxyRequest, RequestBody,
};
pub use response::{bad_request, internal_server_error, json_response};

pub use lambda_handlers::{Context, Error, Handler};
