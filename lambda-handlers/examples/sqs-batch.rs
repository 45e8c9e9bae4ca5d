use aws_lambda_events::event::sqs::{SqsEvent, SqsMessage};
use lambda_handlers::{sqs::process_records, Concurrency, Context, Error, Handler};

fn record(id: &str, body: &str) -> SqsMessage {
    SqsMessage {
        message_id: Some(id.to_string()),
        body: Some(body.to_string()),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut handler = process_records(|record: SqsMessage, _: Context| async move {
        match record.body.as_deref() {
            Some("fail") => Err("unprocessable message"),
            _ => Ok(()),
        }
    })
    .concurrency(Concurrency::bounded(4));

    let event = SqsEvent {
        records: vec![record("a", "ok"), record("b", "fail"), record("c", "ok")],
    };
    let response = handler.call(event, Context::default()).await?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
