//! Effect-style handler adapters for AWS Lambda events.
//!
//! Business logic is written as an async computation over an event and its
//! invocation [`Context`], and the adapters in this crate turn that
//! computation into a [`Handler`] with the shape the Lambda runtime drives:
//! one event in, one result out.
//!
//! The one place with real coordination is [`sqs::process_records`], which
//! adapts a computation over a single queue record into a handler for a
//! whole batch. Records are settled independently under a configurable
//! [`Concurrency`] policy and the failed subset is reported back through the
//! partial-batch-failure contract, so a single bad record never forces
//! redelivery of the whole batch.
//!
//! ```rust,no_run
//! use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
//! use lambda_handlers::{sqs::process_records, Concurrency, Context, Handler};
//!
//! # async fn run(event: SqsEvent) {
//! let mut handler = process_records(|record: SqsMessage, _: Context| async move {
//!     match record.body.as_deref() {
//!         Some("fail") => Err("unprocessable message"),
//!         _ => Ok(()),
//!     }
//! })
//! .concurrency(Concurrency::bounded(4));
//!
//! let response = handler.call(event, Context::default()).await.unwrap();
//! # }
//! ```

pub mod batch;
pub mod context;
pub mod dynamodb;
pub mod handler;
pub mod sns;
pub mod sqs;

pub use batch::{settle_all, BatchItemFailure, BatchResponse, Concurrency};
pub use context::Context;
pub use handler::{event_handler, EventHandler, Handler};

/// Error type an invocation surfaces to the Lambda runtime when it fails.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
