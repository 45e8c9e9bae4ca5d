//! The uniform invocation handler contract and the generic event adapter.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::future::{BoxFuture, FutureExt};
use tracing::error;

use crate::{context::Context, Error};

/// A Lambda invocation handler: one event and its invocation context in,
/// one result out.
pub trait Handler<Event> {
    /// Value returned to the runtime on success.
    type Response;
    /// Error surfaced to the runtime on failure.
    type Error;
    /// The future produced by one invocation.
    type Fut: Future<Output = Result<Self::Response, Self::Error>>;

    /// Process one invocation.
    fn call(&mut self, event: Event, context: Context) -> Self::Fut;
}

/// Adapter produced by [`event_handler`].
pub struct EventHandler<F> {
    f: F,
}

/// Wrap an async computation over an event and its [`Context`] into a
/// [`Handler`].
///
/// The adapter binds the concrete event and context to exactly one
/// invocation, drives the computation to completion, and contains defects at
/// the invocation boundary: a panic is logged and converted into an `Err`
/// for the runtime's own failure path. Typed failures are the computation's
/// business; whatever `Err` it returns is logged and propagated unchanged.
/// No retry, no timeout enforcement, no batching happens here.
///
/// ```rust,no_run
/// use aws_lambda_events::event::sns::SnsEvent;
/// use lambda_handlers::{event_handler, Context, Error, Handler};
///
/// # async fn run(event: SnsEvent) {
/// let mut handler = event_handler(|event: SnsEvent, _: Context| async move {
///     Ok::<_, Error>(event.records.len())
/// });
/// let n = handler.call(event, Context::default()).await.unwrap();
/// # }
/// ```
pub fn event_handler<F>(f: F) -> EventHandler<F> {
    EventHandler { f }
}

impl<F, Event, Response, Fut> Handler<Event> for EventHandler<F>
where
    F: FnMut(Event, Context) -> Fut,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
    Response: 'static,
{
    type Response = Response;
    type Error = Error;
    type Fut = BoxFuture<'static, Result<Response, Error>>;

    fn call(&mut self, event: Event, context: Context) -> Self::Fut {
        let fut = (self.f)(event, context);
        async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(outcome) => {
                    if let Err(err) = &outcome {
                        error!(error = %err, "handler failed");
                    }
                    outcome
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!(panic = %message, "handler panicked");
                    Err(message.into())
                }
            }
        }
        .boxed()
    }
}

/// Best-effort text for a panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(text) = panic.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else {
        "handler panicked".to_string()
    }
}
