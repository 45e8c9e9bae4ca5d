//! SNS notification adapter.

use std::future::Future;

use aws_lambda_events::event::sns::SnsEvent;

use crate::context::Context;
use crate::handler::{event_handler, EventHandler};
use crate::Error;

/// Wrap a computation over an [`SnsEvent`] into an invocation handler.
///
/// Notifications carry no partial-failure contract; the computation either
/// acknowledges the whole event or fails the invocation.
pub fn sns_handler<F, Fut>(f: F) -> EventHandler<F>
where
    F: FnMut(SnsEvent, Context) -> Fut,
    Fut: Future<Output = Result<(), Error>> + Send + 'static,
{
    event_handler(f)
}
