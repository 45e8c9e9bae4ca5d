//! Batch settlement primitives and the partial-batch-failure wire shape.

use std::future::Future;
use std::num::NonZeroUsize;

use futures_util::{future, stream, StreamExt};
use serde::Serialize;

/// How many records of a batch may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// Every record's future is polled concurrently.
    Unbounded,
    /// At most this many records in flight; a cap of 1 is strictly
    /// sequential.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    /// Bounded concurrency with the given cap. A cap of zero makes no sense
    /// and is treated as unbounded.
    pub fn bounded(cap: usize) -> Self {
        match NonZeroUsize::new(cap) {
            Some(cap) => Concurrency::Bounded(cap),
            None => Concurrency::Unbounded,
        }
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Concurrency::Unbounded
    }
}

/// Partial-batch-failure report understood by the SQS and stream event
/// source mappings. Only the records listed here are redelivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_item_failures: Vec<BatchItemFailure>,
}

/// One failed record, by its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}

/// Drive every future to completion and return the outcomes in input order.
///
/// This is a settle-all join: one future's failure never cancels or
/// short-circuits the others, whatever the concurrency policy. An empty
/// input settles immediately.
pub async fn settle_all<F>(futures: Vec<F>, concurrency: Concurrency) -> Vec<F::Output>
where
    F: Future,
{
    match concurrency {
        Concurrency::Unbounded => future::join_all(futures).await,
        Concurrency::Bounded(cap) => {
            stream::iter(futures)
                .buffered(cap.get())
                .collect::<Vec<_>>()
                .await
        }
    }
}
