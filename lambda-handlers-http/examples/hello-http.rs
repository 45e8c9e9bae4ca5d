use lambda_handlers_http::{
    json_response, proxy_handler, Context, Handler, NormalizedRequest, ProxyRequest, RequestExt,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct Greeting {
    message: String,
}

#[tokio::main]
async fn main() {
    let mut handler = proxy_handler(|request: NormalizedRequest, _: Context| async move {
        let response = match request.body_json::<Greeting>() {
            Ok(greeting) => json_response(200, json!({ "echo": greeting.message })),
            Err(err) => json_response(400, json!({ "message": err.to_string() })),
        };
        Ok(response)
    });

    let event: ProxyRequest = serde_json::from_value(json!({
        "httpMethod": "POST",
        "path": "/greetings",
        "headers": { "Content-Type": "application/json" },
        "body": "{\"message\":\"hi\"}",
        "isBase64Encoded": false,
    }))
    .expect("failed to deserialize request");

    let response = handler
        .call(event, Context::default())
        .await
        .expect("proxy handler is infallible");
    println!("{}", response.status_code);
}
