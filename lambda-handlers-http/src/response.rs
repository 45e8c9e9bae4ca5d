//! Proxy response helpers.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde_json::{json, Value};

/// Build a JSON proxy response with the given status code.
pub fn json_response(status_code: i64, body: Value) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    ApiGatewayProxyResponse {
        status_code,
        headers: headers.clone(),
        multi_value_headers: headers,
        body: Some(Body::Text(
            serde_json::to_string(&body).expect("unable to serialize serde_json::Value"),
        )),
        ..Default::default()
    }
}

/// 400 response carrying the rejection message.
pub fn bad_request(message: &str) -> ApiGatewayProxyResponse {
    json_response(400, json!({ "message": message }))
}

/// The catch-all 500 response.
pub fn internal_server_error() -> ApiGatewayProxyResponse {
    json_response(500, json!({ "message": "Internal Server Error" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_response_sets_the_content_type() {
        let response = json_response(200, json!({ "hello": "lambda" }));
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response
                .headers
                .get(CONTENT_TYPE)
                .map(|value| value.to_str().expect("invalid header")),
            Some("application/json")
        );
        match response.body {
            Some(Body::Text(text)) => assert_eq!(text, r#"{"hello":"lambda"}"#),
            _ => panic!("invalid body"),
        }
    }

    #[test]
    fn canned_responses() {
        assert_eq!(bad_request("nope").status_code, 400);
        assert_eq!(internal_server_error().status_code, 500);
    }
}
