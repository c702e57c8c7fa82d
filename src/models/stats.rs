use rust_decimal::Decimal;
use serde::Deserialize;

/// Aggregate totals as computed by the backend. Never derived locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
}

impl Stats {
    pub fn is_overdrawn(&self) -> bool {
        self.net < Decimal::ZERO
    }
}
