//! Finance Manager is a small web app for keeping track of your spending.
//!
//! The app renders a list of transactions and a form for adding new ones.
//! Transactions are not stored locally, they are fetched from and submitted
//! to a remote JSON endpoint via [ApiClient]. A reference implementation of
//! that endpoint lives in [api] and is served by the `api_server` binary.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

pub mod api;
mod api_client;
mod app_state;
mod database_id;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use api_client::{ApiClient, ResponseStatusPolicy};
pub use app_state::AppState;
pub use database_id::TransactionId;
pub use logging::{LOG_BODY_LENGTH_LIMIT, add_tracing_layer, logging_middleware, setup_logging};
pub use routing::build_router;
pub use transaction::{RefreshTicket, Transaction, TransactionList};

use crate::{internal_server_error::InternalServerError, not_found::get_404_not_found_response};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The base URL for the transactions API could not be parsed or does not
    /// use HTTP(S).
    ///
    /// Callers should pass in the URL string and the reason it was rejected.
    #[error("invalid API URL \"{0}\": {1}")]
    InvalidApiUrl(String, String),

    /// The request to the transactions API failed before a response was
    /// received, e.g. DNS failure, connection refused or timeout.
    #[error("could not reach the transactions API: {0}")]
    Transport(String),

    /// A transaction could not be encoded as JSON.
    #[error("could not serialize as JSON: {0}")]
    Serialization(String),

    /// The response body was not a valid list of transactions.
    #[error("could not parse the response from the transactions API: {0}")]
    Deserialization(String),

    /// The transactions API answered with a non-2xx status code.
    ///
    /// Only produced when the client uses
    /// [ResponseStatusPolicy::RequireSuccess].
    #[error("the transactions API responded with status {0}")]
    UnexpectedStatus(u16),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// No transaction exists with the given ID.
    #[error("Transaction with ID {0} not found")]
    TransactionNotFound(TransactionId),

    /// A transaction date was not a valid `YYYY-MM-DD` calendar date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A transaction amount was not a finite number, or became infinite when
    /// rounded to cents.
    #[error("{0} is not a valid amount, expected a finite number")]
    InvalidAmount(f64),

    /// A transaction category was longer than the database column allows.
    #[error("category must be at most {max} characters, got {0}", max = api::MAX_CATEGORY_LENGTH)]
    CategoryTooLong(usize),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Could not acquire the lock on the list of transactions shown to the user.
    #[error("could not acquire the transaction list lock")]
    TransactionListLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::TransactionNotFound(_) => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into a JSON response of the form `{"detail": "..."}`.
    ///
    /// Used by the transactions API, whose clients expect JSON rather than HTML.
    pub(crate) fn into_json_response(self) -> Response {
        let (status, detail) = match &self {
            Error::NotFound | Error::TransactionNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            Error::InvalidDate(_) | Error::InvalidAmount(_) | Error::CategoryTooLong(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::SqlError(_) | Error::DatabaseLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {self}"),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: {error}"),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
