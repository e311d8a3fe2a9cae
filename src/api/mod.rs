//! A JSON REST API for storing transactions in SQLite.
//!
//! This is the remote endpoint the web app's [crate::ApiClient] talks to.
//! It is served by the `api_server` binary and is used as a realistic test
//! double in the client's tests.

mod db;
mod handlers;

use std::sync::{Arc, Mutex};

use axum::{Router, routing::get};
use rusqlite::Connection;

use crate::Error;

pub use db::{
    NewTransaction, create_transaction, create_transaction_table, delete_transaction,
    get_all_transactions, get_transaction, initialize, map_transaction_row,
};

/// The route for the welcome message.
pub const ROOT: &str = "/";
/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for accessing a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";

/// The maximum number of characters in a transaction category.
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// The state shared by the API's route handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl ApiState {
    /// Create the API state, adding the transaction table to the database if
    /// needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

/// Return a router with all of the API's routes.
///
/// # Errors
/// Returns an error if the database cannot be initialized.
pub fn build_api_router(db_connection: Connection) -> Result<Router, Error> {
    let state = ApiState::new(db_connection)?;

    Ok(Router::new()
        .route(ROOT, get(handlers::get_root))
        .route(
            TRANSACTIONS,
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            TRANSACTION,
            get(handlers::get_transaction).delete(handlers::delete_transaction),
        )
        .fallback(handlers::not_found)
        .with_state(state))
}
