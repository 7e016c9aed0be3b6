//! Fire-and-forget publish of serialized samples to the metrics queue.

use crate::broker::{Broker, QUEUE_NAME};
use lapin::options::BasicPublishOptions;
use lapin::BasicProperties;

const CONTENT_TYPE: &str = "application/json";

/// Hand one payload to the transport: default exchange, routing key =
/// queue name, neither mandatory nor immediate. Without publisher
/// confirms enabled the returned confirm resolves as soon as the frame is
/// written, so delivery is never awaited or observed. Errors are the
/// caller's to log; a failed sample is dropped, not retried.
pub async fn publish(broker: &Broker, payload: &[u8]) -> lapin::Result<()> {
    let _confirm = broker
        .channel()
        .basic_publish(
            "",
            QUEUE_NAME,
            BasicPublishOptions::default(),
            payload,
            BasicProperties::default().with_content_type(CONTENT_TYPE.into()),
        )
        .await?;
    Ok(())
}
