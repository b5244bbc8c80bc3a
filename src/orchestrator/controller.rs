//! Run lifecycle controller.
//!
//! Owns the single result slot and serializes runs: at most one request is
//! in flight, and a run request while one is in flight is ignored.

use crate::api::{ApiClient, ApiError};
use crate::model::{Parameters, RunEvent, RunResult};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Run(Parameters),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// `Idle → Running → Succeeded | Failed → Running → …`
#[derive(Debug)]
pub(crate) struct RunController {
    state: RunState,
    result: Option<Arc<RunResult>>,
    error: Option<String>,
}

impl Default for RunController {
    fn default() -> Self {
        Self {
            state: RunState::Idle,
            result: None,
            error: None,
        }
    }
}

impl RunController {
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn result(&self) -> Option<&Arc<RunResult>> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter `Running`, clearing the previous result and error.
    /// Returns `false` (and changes nothing) if a run is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        self.state = RunState::Running;
        self.result = None;
        self.error = None;
        true
    }

    /// Record the outcome of the in-flight run. Ignored unless `Running`.
    pub fn finish(&mut self, outcome: Result<RunResult, ApiError>) {
        if self.state != RunState::Running {
            return;
        }
        match outcome {
            Ok(r) => {
                self.result = Some(Arc::new(r));
                self.state = RunState::Succeeded;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.state = RunState::Failed;
            }
        }
    }

    /// Event describing the current terminal state, if any.
    fn completion_event(&self) -> Option<RunEvent> {
        match self.state {
            RunState::Succeeded => self.result.as_ref().map(|r| RunEvent::RunSucceeded {
                result: Arc::clone(r),
            }),
            RunState::Failed => Some(RunEvent::RunFailed {
                message: self.error.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

/// Fetch presets and probe health once, off the command path.
async fn load_startup_data(client: ApiClient, event_tx: UnboundedSender<RunEvent>) {
    let reachable = client.health().await.is_ok();
    let _ = event_tx.send(RunEvent::ServiceHealth { reachable });
    match client.list_presets().await {
        Ok(presets) => {
            let _ = event_tx.send(RunEvent::PresetsLoaded { presets });
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load presets");
            let _ = event_tx.send(RunEvent::Info(format!("Failed to load presets: {e}")));
        }
    }
}

/// Drive runs from UI commands and emit events back to presentation layers.
pub(crate) async fn run_controller(
    client: ApiClient,
    initial: Option<Parameters>,
    event_tx: UnboundedSender<RunEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let startup = tokio::spawn(load_startup_data(client.clone(), event_tx.clone()));

    let mut machine = RunController::default();
    let mut in_flight: Option<JoinHandle<Result<RunResult, ApiError>>> = None;

    let start = |machine: &mut RunController, params: Parameters| {
        if !machine.begin() {
            tracing::debug!("run request ignored: a run is already in flight");
            return None;
        }
        let _ = event_tx.send(RunEvent::RunStarted { params });
        let client = client.clone();
        Some(tokio::spawn(async move { client.request_run(&params).await }))
    };

    if let Some(params) = initial {
        in_flight = start(&mut machine, params);
    }

    let res = loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Run(params)) => {
                        if let Some(handle) = start(&mut machine, params) {
                            in_flight = Some(handle);
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        if let Some(handle) = in_flight.take() {
                            handle.abort();
                        }
                        break Ok(());
                    }
                }
            }
            // Await the handle in place so it survives when the other branch wins.
            joined = async {
                match in_flight.as_mut() {
                    Some(h) => h.await,
                    None => futures::future::pending().await,
                }
            } => {
                in_flight = None;
                let outcome = joined.unwrap_or_else(|e| {
                    Err(ApiError::Transport {
                        message: format!("run task failed: {e}"),
                    })
                });
                machine.finish(outcome);
                if let Some(ev) = machine.completion_event() {
                    let _ = event_tx.send(ev);
                }
            }
        }
    };

    startup.abort();
    res
}
