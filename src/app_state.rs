//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use crate::{ApiClient, TransactionList};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The client for the remote transactions API.
    pub api_client: ApiClient,

    /// The transactions most recently fetched for the transactions page.
    pub transaction_list: Arc<Mutex<TransactionList>>,
}

impl AppState {
    /// Create a new [AppState] with an empty list of transactions.
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            api_client,
            transaction_list: Arc::new(Mutex::new(TransactionList::new())),
        }
    }
}
