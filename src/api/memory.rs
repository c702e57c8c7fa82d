//! In-memory backend used by tests. Computes stats the way the real backend
//! does and records every call so tests can assert on traffic.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use super::{ApiError, Backend};
use crate::models::{Stats, Transaction, TransactionInput, TxnType};

#[derive(Default)]
struct Inner {
    transactions: Vec<Transaction>,
    next_id: u64,
    calls: Vec<String>,
    offline: bool,
    fail_stats: bool,
    reject_writes: Option<(u16, Option<String>)>,
    fail_deletes: bool,
}

/// Cloning shares the same store, so a test can keep a handle after boxing
/// one copy into a `Dashboard`.
#[derive(Clone, Default)]
pub(crate) struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn seed(&self, input: TransactionInput) -> String {
        let mut inner = self.inner.lock().unwrap();
        insert(&mut inner, &input)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.inner.lock().unwrap().offline = offline;
    }

    pub(crate) fn set_fail_stats(&self, fail: bool) {
        self.inner.lock().unwrap().fail_stats = fail;
    }

    pub(crate) fn reject_writes(&self, status: u16, message: Option<&str>) {
        self.inner.lock().unwrap().reject_writes = Some((status, message.map(String::from)));
    }

    pub(crate) fn set_fail_deletes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_deletes = fail;
    }

    pub(crate) fn stored(&self) -> Vec<Transaction> {
        self.inner.lock().unwrap().transactions.clone()
    }
}

fn insert(inner: &mut Inner, input: &TransactionInput) -> String {
    inner.next_id += 1;
    let id = format!("txn-{}", inner.next_id);
    // Newest first, matching a backend that sorts by creation time.
    inner.transactions.insert(0, to_transaction(id.clone(), input));
    id
}

fn to_transaction(id: String, input: &TransactionInput) -> Transaction {
    Transaction {
        id,
        kind: input.kind,
        division: input.division,
        category: input.category,
        amount: input.amount,
        description: input.description.clone(),
        date: input.date,
    }
}

fn offline_error() -> ApiError {
    ApiError::Transport("connection refused".into())
}

impl Backend for MemoryBackend {
    fn stats(&self) -> Result<Stats, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("GET /stats".into());
        if inner.offline {
            return Err(offline_error());
        }
        if inner.fail_stats {
            return Err(ApiError::Rejected {
                status: 500,
                message: None,
            });
        }
        let total = |kind: TxnType| -> Decimal {
            inner
                .transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };
        let income = total(TxnType::Income);
        let expense = total(TxnType::Expense);
        Ok(Stats {
            income,
            expense,
            net: income - expense,
        })
    }

    fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("GET /transactions".into());
        if inner.offline {
            return Err(offline_error());
        }
        Ok(inner.transactions.clone())
    }

    fn create(&self, input: &TransactionInput) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("POST /transactions".into());
        if inner.offline {
            return Err(offline_error());
        }
        if let Some((status, message)) = inner.reject_writes.clone() {
            return Err(ApiError::Rejected { status, message });
        }
        insert(&mut inner, input);
        Ok(())
    }

    fn update(&self, id: &str, input: &TransactionInput) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("PUT /transactions/{id}"));
        if inner.offline {
            return Err(offline_error());
        }
        if let Some((status, message)) = inner.reject_writes.clone() {
            return Err(ApiError::Rejected { status, message });
        }
        match inner.transactions.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = to_transaction(id.to_string(), input);
                Ok(())
            }
            None => Err(ApiError::Rejected {
                status: 404,
                message: Some("Transaction not found".into()),
            }),
        }
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("DELETE /transactions/{id}"));
        if inner.offline || inner.fail_deletes {
            return Err(offline_error());
        }
        let before = inner.transactions.len();
        inner.transactions.retain(|t| t.id != id);
        if inner.transactions.len() == before {
            return Err(ApiError::Rejected {
                status: 404,
                message: Some("Transaction not found".into()),
            });
        }
        Ok(())
    }
}
