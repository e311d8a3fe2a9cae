//! Defines the core data model for transactions.

use serde::{Deserialize, Serialize};

use crate::database_id::TransactionId;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Apart from JSON field presence, nothing about a transaction is validated
/// by the client. The transactions API is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    ///
    /// `0` means the transaction has not been saved yet.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    ///
    /// No currency is tracked and the value is not rounded.
    pub amount: f64,
    /// A free text label, e.g. "Groceries" or "Rent".
    pub category: String,
    /// When the transaction happened, expected to be formatted as `YYYY-MM-DD`.
    pub date: String,
}

impl Transaction {
    /// Create a transaction that has not been saved yet.
    ///
    /// The ID is set to the placeholder `0`, the transactions API assigns the
    /// real ID.
    pub fn new(amount: f64, category: &str, date: &str) -> Self {
        Self {
            id: 0,
            amount,
            category: category.to_owned(),
            date: date.to_owned(),
        }
    }

    /// Set the ID of the transaction.
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }
}
