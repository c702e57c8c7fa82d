mod http;
#[cfg(test)]
pub(crate) mod memory;

pub(crate) use http::HttpBackend;

use crate::models::{Stats, Transaction, TransactionInput};

/// Errors from the transaction backend.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    /// The backend answered with a non-success status.
    #[error("backend rejected the request ({status}){}", detail(.message))]
    Rejected { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend's own error message if it sent one, else `fallback`.
    pub(crate) fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// The REST collaborator that owns persistence, ids and aggregation.
pub(crate) trait Backend: Send + Sync {
    fn stats(&self) -> Result<Stats, ApiError>;
    fn transactions(&self) -> Result<Vec<Transaction>, ApiError>;
    fn create(&self, input: &TransactionInput) -> Result<(), ApiError>;
    fn update(&self, id: &str, input: &TransactionInput) -> Result<(), ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests;
