use chrono::NaiveDateTime;

use super::filter::{self, FilterChange, FilterCriteria};
use super::form::{Draft, FormMode, FormState};
use crate::models::{Stats, Transaction};

/// Result of one successful load: both halves or nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) stats: Stats,
    pub(crate) transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    LoadStarted,
    LoadSucceeded(Snapshot),
    LoadFailed,
    FilterChanged(FilterChange),
    OpenCreate { now: NaiveDateTime },
    OpenEdit { id: String },
    CancelForm,
    SubmitStarted,
    SubmitSucceeded,
    /// The backend refused the write; `message` is shown to the user.
    SubmitFailed { message: String },
    /// The draft failed client-side checks; nothing was sent.
    SubmitRejected { message: String },
    DeleteSucceeded,
    DeleteFailed,
    DismissNotice,
}

/// Follow-up work the reducer asks the caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    Reload,
}

pub(crate) const DELETE_FAILED: &str = "Delete failed";

#[derive(Debug, Clone, Default)]
pub(crate) struct DashboardState {
    pub(crate) stats: Stats,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) loading: bool,
    pub(crate) filters: FilterCriteria,
    pub(crate) form: FormState,
    /// Blocking message the user must dismiss.
    pub(crate) notice: Option<String>,
}

impl DashboardState {
    pub(crate) fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub(crate) fn visible(&self) -> Vec<&Transaction> {
        filter::apply(&self.transactions, &self.filters)
    }

    pub(crate) fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::LoadStarted => {
                self.loading = true;
            }
            Action::LoadSucceeded(snapshot) => {
                self.stats = snapshot.stats;
                self.transactions = snapshot.transactions;
                self.loading = false;
            }
            Action::LoadFailed => {
                self.stats = Stats::default();
                self.transactions.clear();
                self.loading = false;
            }
            Action::FilterChanged(change) => {
                self.filters.apply_change(change);
            }
            Action::OpenCreate { now } => {
                if !self.form.is_open() {
                    self.form = FormState::Open {
                        mode: FormMode::Create,
                        draft: Draft::new(now),
                    };
                }
            }
            Action::OpenEdit { id } => {
                if self.form.is_open() {
                    return None;
                }
                if let Some(txn) = Transaction::find_by_id(&self.transactions, &id) {
                    self.form = FormState::Open {
                        mode: FormMode::Edit { id },
                        draft: Draft::from_transaction(txn),
                    };
                }
            }
            Action::CancelForm => {
                if let FormState::Open { .. } = self.form {
                    self.form = FormState::Closed;
                }
            }
            Action::SubmitStarted => {
                if let FormState::Open { mode, draft } = std::mem::take(&mut self.form) {
                    self.form = FormState::Submitting { mode, draft };
                }
            }
            Action::SubmitSucceeded => {
                if self.form.is_submitting() {
                    self.form = FormState::Closed;
                    return Some(Effect::Reload);
                }
            }
            Action::SubmitFailed { message } => {
                if let FormState::Submitting { mode, draft } = std::mem::take(&mut self.form) {
                    self.form = FormState::Open { mode, draft };
                }
                self.notice = Some(message);
            }
            Action::SubmitRejected { message } => {
                self.notice = Some(message);
            }
            Action::DeleteSucceeded => return Some(Effect::Reload),
            Action::DeleteFailed => {
                self.notice = Some(DELETE_FAILED.to_string());
            }
            Action::DismissNotice => {
                self.notice = None;
            }
        }
        None
    }
}
