use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zulip_api_rs::{Config, Error, Narrow, RegisterOptions, Result, Zulip};

/// Registers an event queue and prints events until Ctrl-C.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The realm URL (e.g., https://chat.example.com)
    #[arg(short, long, env = "ZULIP_REALM_URL")]
    realm: String,

    /// The account email
    #[arg(short, long, env = "ZULIP_EMAIL")]
    email: String,

    /// The account API key
    #[arg(short = 'k', long, env = "ZULIP_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Event types to subscribe to
    #[arg(short = 't', long = "event-type", default_value = "message")]
    event_types: Vec<String>,

    /// Only receive events for this stream
    #[arg(short, long)]
    stream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    // Long-polls can sit idle for a couple of minutes before a heartbeat.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?;
    let zulip = Zulip::with_client(Config::new(&args.realm, args.email, args.api_key)?, http);
    let events = zulip.events();

    let narrow = match args.stream {
        Some(stream) => Narrow::empty().stream(stream),
        None => Narrow::default(),
    };
    let mut queue = events
        .register(&RegisterOptions {
            event_types: args.event_types,
            narrow,
            ..Default::default()
        })
        .await?;
    info!(queue_id = %queue.queue_id, "event queue registered");

    loop {
        tokio::select! {
            polled = events.get(&queue.queue_id, queue.last_event_id, false) => {
                match polled {
                    Ok(batch) => {
                        for event in batch.iter().filter(|e| !e.is_heartbeat()) {
                            println!("{}", event);
                        }
                        queue.advance(&batch);
                    }
                    Err(Error::Request(e)) => {
                        warn!("poll failed, retrying: {}", e);
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    Err(e) => return Err(e),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    events.delete_queue(&queue.queue_id).await?;
    info!("event queue deleted");
    Ok(())
}
