use log::{error, info, warn};

use super::form::{FormMode, FormState};
use super::state::{Action, DashboardState, Effect, Snapshot};
use crate::api::{ApiError, Backend};
use crate::models::timestamp;

pub(crate) const DELETE_PROMPT: &str = "Delete this transaction?";
const SAVE_FAILED: &str = "Error saving transaction";

/// Owns the backend handle and the view state; every state change goes
/// through [`DashboardState::apply`].
pub(crate) struct Dashboard {
    backend: Box<dyn Backend>,
    state: DashboardState,
}

impl Dashboard {
    pub(crate) fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            state: DashboardState::new(),
        }
    }

    pub(crate) fn state(&self) -> &DashboardState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub(crate) fn dispatch(&mut self, action: Action) -> Option<Effect> {
        self.state.apply(action)
    }

    pub(crate) fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Reload => self.reload(),
        }
    }

    pub(crate) fn reload(&mut self) {
        self.dispatch(Action::LoadStarted);
        self.load();
    }

    /// Fetch stats and transactions concurrently and replace canonical state.
    /// Either request failing resets the view to the empty baseline.
    pub(crate) fn load(&mut self) {
        // Already logged and reflected in state.
        let _ = self.try_load();
    }

    /// [`load`](Self::load) that also hands the failure back to the caller.
    pub(crate) fn try_load(&mut self) -> Result<(), ApiError> {
        match fetch_snapshot(self.backend.as_ref()) {
            Ok(snapshot) => {
                info!(
                    "Loaded {} transactions (net {})",
                    snapshot.transactions.len(),
                    snapshot.stats.net
                );
                self.dispatch(Action::LoadSucceeded(snapshot));
                Ok(())
            }
            Err(e) => {
                error!("API error: {e}");
                self.dispatch(Action::LoadFailed);
                Err(e)
            }
        }
    }

    /// Validate the open draft and send it as a create or update.
    pub(crate) fn submit(&mut self) -> Option<Effect> {
        let (mode, draft) = match &self.state.form {
            FormState::Open { mode, draft } => (mode.clone(), draft.clone()),
            _ => return None,
        };

        let input = match draft.validate() {
            Ok(input) => input,
            Err(e) => {
                return self.dispatch(Action::SubmitRejected {
                    message: e.to_string(),
                })
            }
        };

        self.dispatch(Action::SubmitStarted);
        let result = match &mode {
            FormMode::Create => self.backend.create(&input),
            FormMode::Edit { id } => self.backend.update(id, &input),
        };

        match result {
            Ok(()) => {
                info!(
                    "Saved {} {} on {}",
                    input.kind,
                    input.amount,
                    timestamp::format_minute(&input.date)
                );
                self.dispatch(Action::SubmitSucceeded)
            }
            Err(e) => {
                warn!("Saving transaction failed: {e}");
                self.dispatch(Action::SubmitFailed {
                    message: e.user_message(SAVE_FAILED),
                })
            }
        }
    }

    /// Delete after `confirm` approves the prompt. A refusal sends nothing.
    pub(crate) fn delete(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> Option<Effect> {
        if !confirm(DELETE_PROMPT) {
            return None;
        }
        match self.backend.delete(id) {
            Ok(()) => {
                info!("Deleted transaction {id}");
                self.dispatch(Action::DeleteSucceeded)
            }
            Err(e) => {
                warn!("Deleting transaction {id} failed: {e}");
                self.dispatch(Action::DeleteFailed)
            }
        }
    }
}

fn fetch_snapshot(backend: &dyn Backend) -> Result<Snapshot, ApiError> {
    std::thread::scope(|s| {
        let stats = s.spawn(|| backend.stats());
        let transactions = backend.transactions();
        let stats = stats
            .join()
            .map_err(|_| ApiError::Transport("stats request panicked".into()))?;
        Ok(Snapshot {
            stats: stats?,
            transactions: transactions?,
        })
    })
}
