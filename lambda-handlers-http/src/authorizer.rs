//! API Gateway request authorizer adapter.

use std::fmt;
use std::future::Future;

use aws_lambda_events::event::apigw::{
    ApiGatewayCustomAuthorizerRequestTypeRequest, ApiGatewayCustomAuthorizerResponse,
};
use futures_util::future::{BoxFuture, FutureExt};
use lambda_handlers::{Context, Error, Handler};

/// Denial returned by an authorizer computation.
///
/// Displays as exactly `Unauthorized`, the failure message API Gateway maps
/// to a 401 response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unauthorized;

impl fmt::Display for Unauthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unauthorized")
    }
}

impl std::error::Error for Unauthorized {}

/// Adapter produced by [`authorizer_handler`].
pub struct AuthorizerHandler<F> {
    f: F,
}

/// Wrap an authorizer computation into an invocation handler.
///
/// An allow comes back as the policy response; a deny fails the invocation
/// with [`Unauthorized`], letting the platform's own failure path answer.
/// No defect interception happens here.
pub fn authorizer_handler<F>(f: F) -> AuthorizerHandler<F> {
    AuthorizerHandler { f }
}

impl<F, Fut> Handler<ApiGatewayCustomAuthorizerRequestTypeRequest> for AuthorizerHandler<F>
where
    F: FnMut(ApiGatewayCustomAuthorizerRequestTypeRequest, Context) -> Fut,
    Fut: Future<Output = Result<ApiGatewayCustomAuthorizerResponse, Unauthorized>>
        + Send
        + 'static,
{
    type Response = ApiGatewayCustomAuthorizerResponse;
    type Error = Error;
    type Fut = BoxFuture<'static, Result<ApiGatewayCustomAuthorizerResponse, Error>>;

    fn call(
        &mut self,
        event: ApiGatewayCustomAuthorizerRequestTypeRequest,
        context: Context,
    ) -> Self::Fut {
        let fut = (self.f)(event, context);
        async move { fut.await.map_err(Into::into) }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::apigw::ApiGatewayCustomAuthorizerPolicy;
    use aws_lambda_events::iam::{IamPolicyEffect, IamPolicyStatement};

    fn allow(principal: &str) -> ApiGatewayCustomAuthorizerResponse {
        ApiGatewayCustomAuthorizerResponse {
            principal_id: Some(principal.to_string()),
            policy_document: ApiGatewayCustomAuthorizerPolicy {
                version: Some("2012-10-17".to_string()),
                statement: vec![IamPolicyStatement {
                    action: vec!["execute-api:Invoke".to_string()],
                    effect: IamPolicyEffect::Allow,
                    resource: vec!["*".to_string()],
                    condition: None,
                }],
            },
            context: serde_json::Value::Null,
            usage_identifier_key: None,
        }
    }

    #[tokio::test]
    async fn an_allow_passes_the_policy_through() {
        let mut handler = authorizer_handler(
            |_: ApiGatewayCustomAuthorizerRequestTypeRequest, _: Context| async move {
                Ok(allow("user"))
            },
        );
        let response = handler
            .call(Default::default(), Context::default())
            .await
            .unwrap();
        assert_eq!(response.principal_id.as_deref(), Some("user"));
    }

    #[tokio::test]
    async fn a_deny_fails_with_the_unauthorized_message() {
        let mut handler = authorizer_handler(
            |_: ApiGatewayCustomAuthorizerRequestTypeRequest, _: Context| async move {
                Err::<ApiGatewayCustomAuthorizerResponse, _>(Unauthorized)
            },
        );
        let err = handler
            .call(Default::default(), Context::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
