use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, Backend};
use crate::models::{Stats, Transaction, TransactionInput};

/// Error body shape used by the backend for rejected writes.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub(crate) struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBackend {
    pub(crate) fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transaction_url(&self, id: &str) -> String {
        self.url(&format!("transactions/{}", urlencoding::encode(id)))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.agent.get(&url).call()?;
        response
            .into_json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Backend for HttpBackend {
    fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json("stats")
    }

    fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json("transactions")
    }

    fn create(&self, input: &TransactionInput) -> Result<(), ApiError> {
        let url = self.url("transactions");
        debug!("POST {url}");
        self.agent.post(&url).send_json(input)?;
        Ok(())
    }

    fn update(&self, id: &str, input: &TransactionInput) -> Result<(), ApiError> {
        let url = self.transaction_url(id);
        debug!("PUT {url}");
        self.agent.put(&url).send_json(input)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.transaction_url(id);
        debug!("DELETE {url}");
        self.agent.delete(&url).call()?;
        Ok(())
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .ok()
                    .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                    .and_then(|body| body.error);
                Self::Rejected { status, message }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}
