//! Debounce gate between raw input events and the coordinator.
//!
//! Bursts of keystrokes collapse into a single lookup once input has been
//! quiet for the configured period. Blank input clears immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use titleseek_client::CancelToken;

use crate::coordinator::{Coordinator, Resolution, SearchRequest};
use crate::event::SuggestEvent;

/// Default quiet period before a lookup fires.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Handle to a running debounce loop.
///
/// Dropping the handle (or calling [`close`](Self::close)) ends input; a
/// pending lookup still fires once its quiet period elapses.
/// [`shutdown`](Self::shutdown) abandons it instead.
#[derive(Debug)]
pub struct DebounceGate {
    inputs: mpsc::UnboundedSender<String>,
    shutdown: CancelToken,
    task: JoinHandle<()>,
}

impl DebounceGate {
    /// Start the gate on the current runtime.
    pub fn spawn(coordinator: Arc<Coordinator>, quiet: Duration, events: mpsc::UnboundedSender<SuggestEvent>) -> Self {
        let (inputs, rx) = mpsc::unbounded_channel();
        let shutdown = CancelToken::new();
        let task = tokio::spawn(run(coordinator, quiet, rx, events, shutdown.clone()));
        Self { inputs, shutdown, task }
    }

    /// Feed the full current contents of the search box.
    pub fn on_input_changed(&self, text: impl Into<String>) {
        if self.inputs.send(text.into()).is_err() {
            tracing::debug!("input dropped: debounce gate has stopped");
        }
    }

    /// Stop accepting input, let any pending lookup fire, and wait for the loop.
    pub async fn close(self) {
        drop(self.inputs);
        if let Err(e) = self.task.await {
            tracing::warn!("debounce loop ended abnormally: {}", e);
        }
    }

    /// Tear down: drop the pending timer without a lookup and retire any
    /// in-flight request.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!("debounce loop ended abnormally: {}", e);
        }
    }
}

async fn run(
    coordinator: Arc<Coordinator>, quiet: Duration, mut inputs: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<SuggestEvent>, shutdown: CancelToken,
) {
    let mut pending: Option<String> = None;
    let mut open = true;
    let timer = tokio::time::sleep(quiet);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                if pending.take().is_some() {
                    tracing::debug!("debounce teardown dropped pending input");
                }
                coordinator.retire();
                break;
            }
            input = inputs.recv(), if open => match input {
                Some(text) if text.trim().is_empty() => {
                    pending = None;
                    coordinator.retire();
                    let _ = events.send(SuggestEvent::Cleared);
                }
                Some(text) => {
                    pending = Some(text);
                    timer.as_mut().reset(Instant::now() + quiet);
                }
                None => {
                    open = false;
                    if pending.is_none() {
                        break;
                    }
                }
            },
            _ = &mut timer, if pending.is_some() => {
                if let Some(text) = pending.take() {
                    fire(&coordinator, &text, &events);
                }
                if !open {
                    break;
                }
            }
        }
    }

    tracing::debug!("debounce loop stopped");
}

/// Issue a request for `text` and resolve it on its own task so input keeps
/// flowing while the lookup is outstanding.
fn fire(coordinator: &Arc<Coordinator>, text: &str, events: &mpsc::UnboundedSender<SuggestEvent>) {
    let request = coordinator.issue(text);
    coordinator.publish(&request, || {
        let _ = events.send(SuggestEvent::Loading);
    });
    tokio::spawn(resolve_and_publish(coordinator.clone(), request, events.clone()));
}

async fn resolve_and_publish(
    coordinator: Arc<Coordinator>, request: SearchRequest, events: mpsc::UnboundedSender<SuggestEvent>,
) {
    let event = match coordinator.run(&request).await {
        Ok(Resolution::Titles { titles, .. }) => SuggestEvent::Results(titles),
        Ok(Resolution::Superseded) => return,
        Err(e) => {
            tracing::warn!(term = e.term(), "no suggestions available: {:?}", e);
            SuggestEvent::Error(e.to_string())
        }
    };

    let published = coordinator.publish(&request, || {
        let _ = events.send(event);
    });
    if !published {
        tracing::debug!(generation = request.generation(), "outcome superseded before publish");
    }
}
