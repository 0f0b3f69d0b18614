// MCP Dashboard - Model action state machine
//
// One slot per model name. A slot holds the visible status plus the token of
// the action that currently owns it. Starting a new action on a name cancels
// the previous in-flight request for that name and bumps the generation, so a
// stale completion can never overwrite the newer status: the final status
// always belongs to the most recently triggered action.
//
// The slot map uses `std::sync::Mutex` because transitions to `pulling` /
// `deleting` must happen synchronously, before the caller gets control back.
// The lock is never held across an await.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ollama::ModelRuntimeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Pulling,
    Pulled,
    Deleting,
    Deleted,
    Error,
}

impl ActionStatus {
    /// Text shown next to the model. A failed action reads "Error" rather
    /// than leaving the label blank, so the failure stays visible.
    pub fn label(self) -> &'static str {
        match self {
            ActionStatus::Pulling => "Pulling...",
            ActionStatus::Pulled => "Pulled",
            ActionStatus::Deleting => "Deleting...",
            ActionStatus::Deleted => "Deleted",
            ActionStatus::Error => "Error",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ActionStatus::Pulling | ActionStatus::Deleting)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ActionStatus::Pulling => "pulling",
            ActionStatus::Pulled => "pulled",
            ActionStatus::Deleting => "deleting",
            ActionStatus::Deleted => "deleted",
            ActionStatus::Error => "error",
        };
        f.write_str(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelAction {
    Pull,
    Delete,
}

impl ModelAction {
    /// Status set the moment the action starts.
    pub fn in_progress(self) -> ActionStatus {
        match self {
            ModelAction::Pull => ActionStatus::Pulling,
            ModelAction::Delete => ActionStatus::Deleting,
        }
    }

    fn succeeded(self) -> ActionStatus {
        match self {
            ModelAction::Pull => ActionStatus::Pulled,
            ModelAction::Delete => ActionStatus::Deleted,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ModelAction::Pull => "pull",
            ModelAction::Delete => "delete",
        }
    }
}

/// How a spawned action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action still owned its slot and wrote this terminal status.
    Completed(ActionStatus),
    /// A newer action on the same name took over; nothing was written.
    Superseded,
}

struct ActionSlot {
    status: ActionStatus,
    generation: u64,
    cancel: CancellationToken,
}

#[derive(Clone)]
pub struct ModelActions {
    runtime: ModelRuntimeClient,
    slots: Arc<Mutex<HashMap<String, ActionSlot>>>,
}

impl ModelActions {
    pub fn new(runtime: ModelRuntimeClient) -> Self {
        Self {
            runtime,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start pulling `name`. The status is `pulling` when this returns.
    pub fn pull(&self, name: &str) -> JoinHandle<ActionOutcome> {
        self.start(name, ModelAction::Pull)
    }

    /// Start deleting `name`. The status is `deleting` when this returns.
    pub fn delete(&self, name: &str) -> JoinHandle<ActionOutcome> {
        self.start(name, ModelAction::Delete)
    }

    /// Current status of `name`; `None` if it was never acted upon.
    pub fn status(&self, name: &str) -> Option<ActionStatus> {
        self.lock().get(name).map(|slot| slot.status)
    }

    /// All statuses, ordered by model name.
    pub fn snapshot(&self) -> BTreeMap<String, ActionStatus> {
        self.lock()
            .iter()
            .map(|(name, slot)| (name.clone(), slot.status))
            .collect()
    }

    pub fn start(&self, name: &str, action: ModelAction) -> JoinHandle<ActionOutcome> {
        let cancel = CancellationToken::new();
        let generation = {
            let mut slots = self.lock();
            let next = match slots.get(name) {
                Some(prev) => {
                    if !prev.status.is_terminal() {
                        tracing::info!(
                            "actions: {} '{}' supersedes in-flight {}",
                            action.verb(),
                            name,
                            prev.status
                        );
                    }
                    prev.cancel.cancel();
                    prev.generation + 1
                }
                None => 1,
            };
            slots.insert(
                name.to_string(),
                ActionSlot {
                    status: action.in_progress(),
                    generation: next,
                    cancel: cancel.clone(),
                },
            );
            next
        };

        let runtime = self.runtime.clone();
        let slots = Arc::clone(&self.slots);
        let name = name.to_string();

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("actions: {} '{}' cancelled", action.verb(), name);
                    return ActionOutcome::Superseded;
                }
                result = async {
                    match action {
                        ModelAction::Pull => runtime.pull(&name).await,
                        ModelAction::Delete => runtime.delete(&name).await,
                    }
                } => result,
            };

            let status = match result {
                Ok(()) => {
                    tracing::info!("actions: {} '{}' succeeded", action.verb(), name);
                    action.succeeded()
                }
                Err(e) => {
                    tracing::warn!("actions: {} '{}' failed: {}", action.verb(), name, e);
                    ActionStatus::Error
                }
            };

            let mut slots = slots.lock().unwrap_or_else(|p| p.into_inner());
            match slots.get_mut(&name) {
                Some(slot) if slot.generation == generation => {
                    slot.status = status;
                    ActionOutcome::Completed(status)
                }
                _ => ActionOutcome::Superseded,
            }
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, ActionSlot>> {
        self.slots.lock().unwrap_or_else(|p| p.into_inner())
    }
}
