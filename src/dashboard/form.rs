use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{timestamp, Category, Division, Transaction, TransactionInput, TxnType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum DraftError {
    #[error("Amount is required")]
    AmountMissing,
    #[error("Amount must be a number")]
    AmountInvalid,
    #[error("Amount cannot be negative")]
    AmountNegative,
    #[error("Description is required")]
    DescriptionMissing,
    #[error("Date must look like YYYY-MM-DDTHH:MM")]
    DateInvalid,
}

/// The in-progress transaction held by the form. Amount and date stay as the
/// user typed them until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) kind: TxnType,
    pub(crate) division: Division,
    pub(crate) category: Category,
    pub(crate) amount: String,
    pub(crate) description: String,
    pub(crate) date: String,
}

impl Draft {
    pub(crate) fn new(now: NaiveDateTime) -> Self {
        Self {
            kind: TxnType::Income,
            division: Division::Office,
            category: Category::Salary,
            amount: String::new(),
            description: String::new(),
            date: timestamp::format_minute(&now),
        }
    }

    pub(crate) fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: txn.kind,
            division: txn.division,
            category: txn.category,
            amount: txn.amount.normalize().to_string(),
            description: txn.description.clone(),
            date: timestamp::format_minute(&txn.date),
        }
    }

    pub(crate) fn validate(&self) -> Result<TransactionInput, DraftError> {
        let amount_text = self.amount.trim();
        if amount_text.is_empty() {
            return Err(DraftError::AmountMissing);
        }
        let amount = Decimal::from_str(amount_text).map_err(|_| DraftError::AmountInvalid)?;
        if amount < Decimal::ZERO {
            return Err(DraftError::AmountNegative);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::DescriptionMissing);
        }

        let date = timestamp::parse(&self.date).ok_or(DraftError::DateInvalid)?;

        Ok(TransactionInput {
            kind: self.kind,
            division: self.division,
            category: self.category,
            amount,
            description: description.to_string(),
            date,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormMode {
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum FormState {
    #[default]
    Closed,
    Open {
        mode: FormMode,
        draft: Draft,
    },
    Submitting {
        mode: FormMode,
        draft: Draft,
    },
}

impl FormState {
    pub(crate) fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub(crate) fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub(crate) fn mode(&self) -> Option<&FormMode> {
        match self {
            Self::Closed => None,
            Self::Open { mode, .. } | Self::Submitting { mode, .. } => Some(mode),
        }
    }

    pub(crate) fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } | Self::Submitting { draft, .. } => Some(draft),
        }
    }

    /// Only an open form accepts edits; a submitting one is frozen.
    pub(crate) fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            Self::Open { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        matches!(self.mode(), Some(FormMode::Edit { .. }))
    }
}
