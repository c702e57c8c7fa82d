mod stats;
pub mod timestamp;
mod transaction;

pub use stats::Stats;
pub use transaction::{Category, Division, Transaction, TransactionInput, TxnType};
