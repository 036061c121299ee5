//! Producer and consumer sharing an in-memory transport.
//!
//! Run with `RUST_LOG=sourced_enqueue=debug cargo run --example round_trip`.

use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sourced_enqueue::transport::InMemoryTransport;
use sourced_enqueue::{
    consume, CommandRouter, Delayed, DomainMessage, EnqueueConfig, EnqueueMessageProcessor,
    EnqueueMessageProducer, EnqueueSerializer, EventRouter, MessageRegistry, QueryRouter,
    TypedMessage,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize, TypedMessage)]
#[message(kind = "command", name = "greeting.set")]
struct SetGreeting {
    name: String,
    greeting: String,
}

#[derive(Debug, Serialize, Deserialize, TypedMessage)]
#[message(kind = "query", name = "greeting.get")]
struct GetGreeting {
    name: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EnqueueConfig::from_env()?;
    let transport = InMemoryTransport::new();
    let serializer = Arc::new(EnqueueSerializer::with_registry(
        MessageRegistry::new()
            .register::<SetGreeting>()
            .register::<GetGreeting>(),
    ));

    let greetings: Arc<Mutex<HashMap<String, String>>> = Arc::default();
    let writes = greetings.clone();
    let reads = greetings.clone();

    let processor = Arc::new(EnqueueMessageProcessor::new(
        CommandRouter::new().route(SetGreeting::NAME, move |msg| {
            let cmd: SetGreeting = msg.payload_as()?;
            writes.lock().unwrap_or_else(|e| e.into_inner()).insert(cmd.name, cmd.greeting);
            Ok(())
        }),
        EventRouter::new(),
        QueryRouter::new().route(GetGreeting::NAME, move |msg| {
            let query: GetGreeting = msg.payload_as()?;
            let greetings = reads.lock().unwrap_or_else(|e| e.into_inner());
            Ok(serde_json::to_value(greetings.get(&query.name))?)
        }),
        serializer.clone(),
    ));

    let consumer = consume(
        processor,
        &config.command_name,
        transport.clone(),
        Duration::from_millis(20),
    );
    let producer = EnqueueMessageProducer::from_config(transport, serializer, &config);

    let set = DomainMessage::from_typed(&SetGreeting {
        name: "world".into(),
        greeting: "hello".into(),
    })?;
    producer.send(&Delayed::new(set, 250))?;

    std::thread::sleep(Duration::from_millis(400));

    let reply = producer.request(&DomainMessage::from_typed(&GetGreeting {
        name: "world".into(),
    })?)?;
    match reply.result() {
        Some(Ok(value)) => tracing::info!(%value, "greeting"),
        Some(Err(e)) => tracing::error!(error = %e, "query failed"),
        None => tracing::error!("query left pending"),
    }

    let stats = consumer.stop();
    tracing::info!(?stats, "consumer stopped");
    Ok(())
}
