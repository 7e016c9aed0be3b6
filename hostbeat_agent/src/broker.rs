//! Broker link lifecycle: connect, open a channel, declare the queue.
//! All three steps are startup-fatal; there is no reconnect path.

use anyhow::{Context, Result};
use lapin::options::QueueDeclareOptions;
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties};

/// Destination queue for every sample this agent publishes.
pub const QUEUE_NAME: &str = "metrics";

/// The process's single link to the broker, established once at startup
/// and reused unmutated by every tick.
#[derive(Debug)]
pub struct Broker {
    // Held so the link outlives the channel; never touched after connect.
    _conn: Connection,
    channel: Channel,
}

impl Broker {
    /// Open the link, open one channel on it, and declare the durable
    /// `metrics` queue. Any step failing means the caller must exit; a
    /// redeclare with matching properties is a no-op on the broker side.
    pub async fn connect(uri: &str) -> Result<Self> {
        let conn = Connection::connect(uri, ConnectionProperties::default())
            .await
            .context("failed to connect to broker")?;
        let channel = conn
            .create_channel()
            .await
            .context("failed to open a channel")?;
        channel
            .queue_declare(
                QUEUE_NAME,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .context("failed to declare queue")?;
        Ok(Self {
            _conn: conn,
            channel,
        })
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}
