//! Scripted title search for pipeline tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use titleseek_client::{CancelToken, SearchError, TitleSearch};
use tokio::sync::Notify;

pub(crate) fn titles(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Handles for a held lookup.
#[derive(Clone)]
pub(crate) struct Held {
    /// Notified once the lookup has reached the fake transport.
    pub started: Arc<Notify>,
    /// Notify to let the lookup complete.
    pub release: Arc<Notify>,
}

#[derive(Clone)]
pub(crate) enum Script {
    Titles(Vec<String>),
    Hold { held: Held, outcome: Result<Vec<String>, SearchError>, honor_cancel: bool },
}

/// In-process `TitleSearch` that answers from a per-term script.
///
/// Unscripted terms fail as if the service were unreachable.
#[derive(Default)]
pub(crate) struct FakeSearch {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, term: &str, script: Script) {
        self.scripts.lock().unwrap().insert(term.to_string(), script);
    }

    /// Script `term` to block until released, then yield `outcome`.
    pub fn hold(&self, term: &str, outcome: Result<Vec<String>, SearchError>, honor_cancel: bool) -> Held {
        let held = Held { started: Arc::new(Notify::new()), release: Arc::new(Notify::new()) };
        self.script(term, Script::Hold { held: held.clone(), outcome, honor_cancel });
        held
    }

    /// Terms that reached the transport, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TitleSearch for FakeSearch {
    async fn search(&self, term: &str, cancel: &CancelToken) -> Result<Vec<String>, SearchError> {
        self.calls.lock().unwrap().push(term.to_string());
        let script = self.scripts.lock().unwrap().get(term).cloned();

        match script {
            Some(Script::Titles(titles)) => Ok(titles),
            Some(Script::Hold { held, outcome, honor_cancel }) => {
                held.started.notify_one();
                if honor_cancel {
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                        _ = held.release.notified() => {}
                    }
                } else {
                    held.release.notified().await;
                }
                outcome
            }
            None => Err(SearchError::HttpError { status: 503 }),
        }
    }
}
