use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn all() -> &'static [TxnType] {
        &[Self::Income, Self::Expense]
    }

    /// Capitalised label used in the form toggle.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    Office,
    Personal,
}

impl Division {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Personal => "Personal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "office" => Some(Self::Office),
            "personal" => Some(Self::Personal),
            _ => None,
        }
    }

    pub fn all() -> &'static [Division] {
        &[Self::Office, Self::Personal]
    }
}

impl std::fmt::Display for Division {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Salary,
    Fuel,
    Food,
    Movie,
    Medical,
    Loan,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Fuel => "Fuel",
            Self::Food => "Food",
            Self::Movie => "Movie",
            Self::Medical => "Medical",
            Self::Loan => "Loan",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "salary" => Some(Self::Salary),
            "fuel" => Some(Self::Fuel),
            "food" => Some(Self::Food),
            "movie" => Some(Self::Movie),
            "medical" => Some(Self::Medical),
            "loan" => Some(Self::Loan),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Salary,
            Self::Fuel,
            Self::Food,
            Self::Movie,
            Self::Medical,
            Self::Loan,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as the backend reports it. The identifier is assigned by the
/// backend and is opaque to this client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTransaction")]
pub struct Transaction {
    pub id: String,
    pub kind: TxnType,
    pub division: Division,
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDateTime,
}

/// Wire shape. Some backends send `_id`, some `id`, some both.
#[derive(Deserialize)]
struct RawTransaction {
    #[serde(rename = "_id")]
    object_id: Option<String>,
    id: Option<String>,
    #[serde(rename = "type")]
    kind: TxnType,
    division: Division,
    category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    description: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    date: NaiveDateTime,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = String;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let id = raw
            .object_id
            .or(raw.id)
            .ok_or_else(|| "missing field `_id`".to_string())?;
        Ok(Self {
            id,
            kind: raw.kind,
            division: raw.division,
            category: raw.category,
            amount: raw.amount,
            description: raw.description,
            date: raw.date,
        })
    }
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TxnType::Income => self.amount,
            TxnType::Expense => -self.amount,
        }
    }

    pub fn find_by_id<'a>(transactions: &'a [Transaction], id: &str) -> Option<&'a Transaction> {
        transactions.iter().find(|t| t.id == id)
    }
}

/// Body sent to the backend on create and update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub division: Division,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub date: NaiveDateTime,
}
