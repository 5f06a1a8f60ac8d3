//! titleseek entry point.
//!
//! Each stdin line is treated as the full current contents of the search box.
//! Suggestion events are written to stdout as JSON lines; logging goes to
//! stderr so the two streams never mix.
//!
//! The runtime is single-threaded: the debounce loop and every lookup task
//! interleave only at await points, so a lookup's currency check and the
//! dispatch of its cache write cannot be split by a newer request.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use titleseek_client::{OpenSearchClient, OpenSearchConfig};
use titleseek_core::{AppConfig, CacheDb};
use titleseek_suggest::{Coordinator, DebounceGate, SuggestEvent, spawn_expiry_sweeper};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    tracing::info!(
        db_path = %config.db_path.display(),
        endpoint = %config.endpoint,
        "Starting titleseek"
    );

    let cache = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache at {}", config.db_path.display()))?
        .with_ttl(config.cache_ttl());
    let sweeper = spawn_expiry_sweeper(cache.clone(), config.sweep_interval());

    let client = OpenSearchClient::new(OpenSearchConfig {
        endpoint: config.endpoint.clone(),
        timeout: config.timeout(),
        user_agent: config.user_agent.clone(),
        limit: config.result_limit,
        namespace: config.namespace,
    })?;

    let coordinator = Arc::new(Coordinator::new(cache, Arc::new(client)));
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let gate = DebounceGate::spawn(coordinator, config.debounce(), events_tx);
    let printer = tokio::spawn(print_events(events_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let interrupted = loop {
        tokio::select! {
            line = lines.next_line() => match line.context("reading stdin")? {
                Some(text) => gate.on_input_changed(text),
                None => break false,
            },
            _ = tokio::signal::ctrl_c() => break true,
        }
    };

    if interrupted {
        tracing::info!("interrupted, shutting down");
        gate.shutdown().await;
    } else {
        gate.close().await;
    }

    printer.await.context("event printer panicked")??;
    sweeper.abort();

    Ok(())
}

/// Write each event as one JSON line until every sender is gone.
async fn print_events(mut events: mpsc::UnboundedReceiver<SuggestEvent>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(event) = events.recv().await {
        let mut line = serde_json::to_vec(&event)?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        stdout.flush().await?;
    }
    Ok(())
}
