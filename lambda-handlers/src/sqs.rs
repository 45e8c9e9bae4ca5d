//! SQS event adapters, including the batch record processor with
//! partial-failure reporting.

use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use futures_util::future::{BoxFuture, FutureExt};
use tracing::error;

use crate::batch::{settle_all, BatchItemFailure, BatchResponse, Concurrency};
use crate::context::Context;
use crate::handler::{event_handler, panic_message, EventHandler, Handler};
use crate::Error;

/// Wrap a computation over a whole [`SqsEvent`] into an invocation handler.
///
/// Return `Ok(None)` to acknowledge the whole batch, or
/// `Ok(Some(BatchResponse))` to report a failed subset yourself. For
/// per-record processing prefer [`process_records`].
pub fn sqs_handler<F, Fut>(f: F) -> EventHandler<F>
where
    F: FnMut(SqsEvent, Context) -> Fut,
    Fut: Future<Output = Result<Option<BatchResponse>, Error>> + Send + 'static,
{
    event_handler(f)
}

/// Message bodies of every record in the event, in arrival order.
pub fn message_bodies(event: &SqsEvent) -> Vec<&str> {
    event
        .records
        .iter()
        .map(|record| record.body.as_deref().unwrap_or_default())
        .collect()
}

/// Adapter produced by [`process_records`].
pub struct RecordProcessor<F> {
    f: F,
    concurrency: Concurrency,
    contain_panics: bool,
}

/// Adapt a computation over a single [`SqsMessage`] into a handler for a
/// whole [`SqsEvent`] that reports partial batch failures.
///
/// Every record gets its own invocation of the computation, all invocations
/// are settled — a failing record never cancels its siblings — and the
/// records whose outcome was a failure are reported by `messageId` in the
/// [`BatchResponse`], so only those are redelivered. The failure payload
/// itself is irrelevant here; only the success/failure classification is
/// kept. The adapter never fails as a whole: its error type is
/// [`Infallible`].
///
/// Concurrency defaults to [`Concurrency::Unbounded`] and can be capped with
/// [`RecordProcessor::concurrency`]; a cap of 1 processes records strictly
/// in arrival order.
///
/// ```rust,no_run
/// use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
/// use lambda_handlers::{sqs::process_records, Concurrency, Context, Handler};
///
/// # async fn run(event: SqsEvent) {
/// let mut handler = process_records(|record: SqsMessage, _: Context| async move {
///     match record.body.as_deref() {
///         Some("fail") => Err("unprocessable message"),
///         _ => Ok(()),
///     }
/// })
/// .concurrency(Concurrency::bounded(1));
///
/// let response = handler.call(event, Context::default()).await.unwrap();
/// # }
/// ```
pub fn process_records<F>(f: F) -> RecordProcessor<F> {
    RecordProcessor {
        f,
        concurrency: Concurrency::Unbounded,
        contain_panics: true,
    }
}

impl<F> RecordProcessor<F> {
    /// Cap the number of records processed at once.
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Panic containment for individual records. On by default: a panicking
    /// record is reported as that record's failure. When disabled, a panic
    /// aborts the whole invocation instead.
    pub fn contain_panics(mut self, contain: bool) -> Self {
        self.contain_panics = contain;
        self
    }
}

impl<F, Fut, E> Handler<SqsEvent> for RecordProcessor<F>
where
    F: FnMut(SqsMessage, Context) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: 'static,
{
    type Response = BatchResponse;
    type Error = Infallible;
    type Fut = BoxFuture<'static, Result<BatchResponse, Infallible>>;

    fn call(&mut self, event: SqsEvent, context: Context) -> Self::Fut {
        let concurrency = self.concurrency;
        let contain_panics = self.contain_panics;

        let mut identifiers = Vec::with_capacity(event.records.len());
        let mut invocations = Vec::with_capacity(event.records.len());
        for record in event.records {
            identifiers.push(record.message_id.clone().unwrap_or_default());
            invocations.push((self.f)(record, context.clone()));
        }

        async move {
            let outcomes: Vec<Result<(), ()>> = if contain_panics {
                let contained: Vec<_> = invocations
                    .into_iter()
                    .map(|invocation| async move {
                        match AssertUnwindSafe(invocation).catch_unwind().await {
                            Ok(outcome) => outcome.map_err(|_| ()),
                            Err(panic) => {
                                let message = panic_message(panic.as_ref());
                                error!(panic = %message, "record processing panicked");
                                Err(())
                            }
                        }
                    })
                    .collect();
                settle_all(contained, concurrency).await
            } else {
                let plain: Vec<_> = invocations
                    .into_iter()
                    .map(|invocation| async move { invocation.await.map_err(|_| ()) })
                    .collect();
                settle_all(plain, concurrency).await
            };

            let batch_item_failures = identifiers
                .into_iter()
                .zip(outcomes)
                .filter(|(_, outcome)| outcome.is_err())
                .map(|(item_identifier, _)| BatchItemFailure { item_identifier })
                .collect();
            Ok(BatchResponse { batch_item_failures })
        }
        .boxed()
    }
}
