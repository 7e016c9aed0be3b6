//! Entry point: connect to the broker once, then sample and publish host
//! metrics on a fixed tick until the process is killed.

mod broker;
mod config;
mod publish;
mod sampler;
mod types;

use broker::Broker;
use sampler::Sampler;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Delay between the end of one publish attempt and the next sample.
const TICK_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    init_tracing();

    let url = config::broker_url();
    let broker = match Broker::connect(&url).await {
        Ok(b) => b,
        Err(e) => {
            error!("failed to initialize broker link: {e:#}");
            std::process::exit(1);
        }
    };

    run(broker).await;
}

fn init_tracing() {
    // stdout carries the per-sample `Sent:` lines; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

/// Steady-state loop. A failed serialize or publish loses that sample and
/// nothing else; ticks are strictly sequential and there is no exit path
/// short of process termination.
async fn run(broker: Broker) {
    let mut sampler = Sampler::new();
    loop {
        let sample = sampler.sample().await;
        match serde_json::to_string(&sample) {
            Ok(body) => match publish::publish(&broker, body.as_bytes()).await {
                Ok(()) => println!("Sent: {body}"),
                Err(e) => warn!("failed to send metrics: {e}"),
            },
            Err(e) => warn!("failed to serialize metrics: {e}"),
        }
        sleep(TICK_INTERVAL).await;
    }
}
