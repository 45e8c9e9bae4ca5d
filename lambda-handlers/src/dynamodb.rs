//! DynamoDB stream adapter.

use std::future::Future;

use aws_lambda_events::event::dynamodb::Event;

use crate::batch::BatchResponse;
use crate::context::Context;
use crate::handler::{event_handler, EventHandler};
use crate::Error;

/// Wrap a computation over a DynamoDB stream [`Event`] into an invocation
/// handler.
///
/// Return `Ok(None)` to checkpoint the whole batch, or
/// `Ok(Some(BatchResponse))` listing the sequence numbers that should be
/// retried.
pub fn stream_handler<F, Fut>(f: F) -> EventHandler<F>
where
    F: FnMut(Event, Context) -> Fut,
    Fut: Future<Output = Result<Option<BatchResponse>, Error>> + Send + 'static,
{
    event_handler(f)
}

/// New images carried by the stream records, in arrival order.
pub fn new_images(event: &Event) -> Vec<&serde_dynamo::Item> {
    event
        .records
        .iter()
        .map(|record| &record.change.new_image)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;

    #[tokio::test]
    async fn passes_a_batch_response_through() {
        let mut handler = stream_handler(|_: Event, _: Context| async move {
            Ok(Some(BatchResponse::default()))
        });
        let response = handler
            .call(Event { records: vec![] }, Context::default())
            .await
            .unwrap();
        assert_eq!(response, Some(BatchResponse::default()));
    }

    #[test]
    fn no_records_means_no_images() {
        assert!(new_images(&Event { records: vec![] }).is_empty());
    }
}
