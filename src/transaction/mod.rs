//! Transactions and the pages for viewing and creating them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model shared with the transactions API
//! - The in-memory list of transactions shown on the transactions page
//! - View handlers for transaction-related web pages

mod core;
mod create_endpoint;
mod form;
mod list;
mod new_transaction_page;
mod transactions_page;

pub use core::Transaction;
pub use create_endpoint::create_transaction_endpoint;
pub use list::{RefreshTicket, TransactionList};
pub use new_transaction_page::get_new_transaction_page;
pub use transactions_page::get_transactions_page;
