//! Database ID type definition.

/// Alias for the integer type used for transaction IDs.
///
/// IDs are assigned by the transactions API. Transactions that have not been
/// saved yet use `0` as a placeholder.
pub type TransactionId = i64;
