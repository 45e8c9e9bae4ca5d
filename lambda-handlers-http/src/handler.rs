//! The REST proxy adapter.

use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use futures_util::future::{self, BoxFuture, FutureExt};
use lambda_handlers::handler::panic_message;
use lambda_handlers::{Context, Error, Handler};
use tracing::{error, warn};

use crate::body::json_body_parser;
use crate::request::{header_normalizer, NormalizedRequest, ProxyRequest};
use crate::response::{bad_request, internal_server_error};

/// Adapter produced by [`proxy_handler`].
pub struct ProxyHandler<F> {
    f: F,
}

/// Wrap an async computation over a [`NormalizedRequest`] into a handler for
/// the API Gateway REST proxy integration.
///
/// Per invocation the inbound event gets its header keys folded to lowercase
/// and its body conditionally decoded as JSON before the computation runs.
/// A body that fails to decode is answered with a 400 carrying the typed
/// rejection; the computation never runs. An `Err` or a panic from the
/// computation is logged and answered with the catch-all 500, so the
/// invocation itself never fails: the error type is [`Infallible`].
pub fn proxy_handler<F>(f: F) -> ProxyHandler<F> {
    ProxyHandler { f }
}

impl<F, Fut> Handler<ProxyRequest> for ProxyHandler<F>
where
    F: FnMut(NormalizedRequest, Context) -> Fut,
    Fut: Future<Output = Result<ApiGatewayProxyResponse, Error>> + Send + 'static,
{
    type Response = ApiGatewayProxyResponse;
    type Error = Infallible;
    type Fut = BoxFuture<'static, Result<ApiGatewayProxyResponse, Infallible>>;

    fn call(&mut self, event: ProxyRequest, context: Context) -> Self::Fut {
        let request = match json_body_parser(header_normalizer(event)) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "request body failed to decode");
                return future::ready(Ok(bad_request(&err.to_string()))).boxed();
            }
        };
        let fut = (self.f)(request, context);
        async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(err)) => {
                    error!(error = %err, "request handler failed");
                    Ok(internal_server_error())
                }
                Err(panic) => {
                    error!(panic = %panic_message(panic.as_ref()), "request handler panicked");
                    Ok(internal_server_error())
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestBody;
    use crate::response::json_response;
    use aws_lambda_events::encodings::Body;
    use serde_json::json;

    fn json_event(content_type: &str, body: &str) -> ProxyRequest {
        serde_json::from_value(json!({
            "httpMethod": "POST",
            "headers": { "Content-Type": content_type },
            "body": body,
            "isBase64Encoded": false,
        }))
        .expect("failed to deserialize request")
    }

    async fn explode(_: NormalizedRequest, _: Context) -> Result<ApiGatewayProxyResponse, Error> {
        panic!("boom")
    }

    #[tokio::test]
    async fn exposes_the_normalized_request() {
        let mut handler = proxy_handler(|request: NormalizedRequest, _: Context| async move {
            assert_eq!(request.header("content-type"), Some("application/json"));
            assert_eq!(
                request.raw_headers["Content-Type"],
                Some("application/json".to_string())
            );
            assert_eq!(
                request.body,
                Some(RequestBody::Json(json!({ "message": "hi" })))
            );
            assert_eq!(request.raw_body.as_deref(), Some(r#"{"message":"hi"}"#));
            Ok(json_response(200, json!({ "ok": true })))
        });
        let response = handler
            .call(
                json_event("application/json", r#"{"message":"hi"}"#),
                Context::default(),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn an_undecodable_body_is_answered_with_a_400() {
        let mut handler = proxy_handler(explode);
        let response = handler
            .call(
                json_event("application/json", "not json"),
                Context::default(),
            )
            .await
            .unwrap();
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn a_failing_computation_is_answered_with_a_500() {
        let mut handler = proxy_handler(|_: NormalizedRequest, _: Context| async move {
            Err::<ApiGatewayProxyResponse, Error>("storage unavailable".into())
        });
        let response = handler
            .call(json_event("text/plain", "hello"), Context::default())
            .await
            .unwrap();
        assert_eq!(response.status_code, 500);
        match response.body {
            Some(Body::Text(text)) => assert!(text.contains("Internal Server Error")),
            _ => panic!("invalid body"),
        }
    }

    #[tokio::test]
    async fn a_panicking_computation_is_answered_with_a_500() {
        let mut handler = proxy_handler(explode);
        let response = handler
            .call(json_event("text/plain", "hello"), Context::default())
            .await
            .unwrap();
        assert_eq!(response.status_code, 500);
    }
}
