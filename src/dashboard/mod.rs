mod controller;
pub(crate) mod filter;
pub(crate) mod form;
mod state;

pub(crate) use controller::{Dashboard, DELETE_PROMPT};
pub(crate) use filter::{FilterChange, Selector};
pub(crate) use form::{Draft, FormState};
pub(crate) use state::{Action, DashboardState, Effect};

#[cfg(test)]
pub(crate) use filter::FilterCriteria;
#[cfg(test)]
pub(crate) use form::FormMode;
#[cfg(test)]
pub(crate) use state::Snapshot;


#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
