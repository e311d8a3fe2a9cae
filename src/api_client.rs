//! A client for the remote transactions API.

use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use serde::Serialize;

use crate::{Error, Transaction, TransactionId};

/// How the client treats the HTTP status code of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatusPolicy {
    /// Any response counts as a success, only transport failures are errors.
    ///
    /// A rejected transaction (e.g., 422 Unprocessable Entity) is therefore
    /// reported as created. For listing, the response body is parsed
    /// whatever the status.
    #[default]
    Ignore,
    /// A response with a non-2xx status is an [Error::UnexpectedStatus].
    RequireSuccess,
}

/// The body sent when creating a transaction.
///
/// The ID is always the placeholder `0` so the API assigns a fresh one.
#[derive(Serialize)]
struct NewTransactionBody<'a> {
    id: TransactionId,
    amount: f64,
    category: &'a str,
    date: &'a str,
}

impl<'a> From<&'a Transaction> for NewTransactionBody<'a> {
    fn from(transaction: &'a Transaction) -> Self {
        Self {
            id: 0,
            amount: transaction.amount,
            category: &transaction.category,
            date: &transaction.date,
        }
    }
}

/// Lists and creates transactions via a single remote endpoint.
///
/// Each call makes exactly one HTTP request. There are no retries and no
/// timeouts other than the defaults of the underlying HTTP client. Calls
/// are independent of each other and may run concurrently, dropping the
/// returned future cancels the request.
///
/// Cloning the client is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
    status_policy: ResponseStatusPolicy,
}

impl ApiClient {
    /// Create a client for the endpoint at `base_url`, e.g.
    /// "http://localhost:8000/transactions".
    ///
    /// # Errors
    /// Returns an [Error::InvalidApiUrl] if `base_url` cannot be parsed or
    /// does not use HTTP(S).
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let parsed = Url::parse(base_url)
            .map_err(|error| Error::InvalidApiUrl(base_url.to_owned(), error.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidApiUrl(
                base_url.to_owned(),
                format!("unsupported scheme \"{}\"", parsed.scheme()),
            ));
        }

        Ok(Self {
            base_url: parsed,
            client: Client::new(),
            status_policy: ResponseStatusPolicy::default(),
        })
    }

    /// Set how response status codes are handled.
    pub fn with_status_policy(mut self, status_policy: ResponseStatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    /// The endpoint the client sends requests to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch all transactions.
    ///
    /// The transactions are returned in the order the API sent them.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Transport] if the request could not be completed,
    /// - [Error::UnexpectedStatus] if the status policy rejects the response,
    /// - or [Error::Deserialization] if the body is not a JSON list of transactions.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("GET {}", self.base_url);

        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        self.check_status(response.status())?;

        let body = response.bytes().await.map_err(transport_error)?;

        serde_json::from_slice(&body).map_err(|error| Error::Deserialization(error.to_string()))
    }

    /// Submit a new transaction.
    ///
    /// The ID of `transaction` is ignored and sent as `0`. The response body
    /// is ignored.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Serialization] if the transaction cannot be encoded, e.g.
    ///   the amount is NaN or infinite, in which case no request is made,
    /// - [Error::Transport] if the request could not be completed,
    /// - or [Error::UnexpectedStatus] if the status policy rejects the response.
    pub async fn create_transaction(&self, transaction: &Transaction) -> Result<(), Error> {
        // JSON has no representation for NaN or infinity.
        if !transaction.amount.is_finite() {
            return Err(Error::Serialization(format!(
                "amount {} is not a finite number",
                transaction.amount
            )));
        }

        let body = serde_json::to_vec(&NewTransactionBody::from(transaction))
            .map_err(|error| Error::Serialization(error.to_string()))?;

        tracing::debug!("POST {}", self.base_url);

        let response = self
            .client
            .post(self.base_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.check_status(response.status())
    }

    fn check_status(&self, status: StatusCode) -> Result<(), Error> {
        match self.status_policy {
            ResponseStatusPolicy::RequireSuccess if !status.is_success() => {
                Err(Error::UnexpectedStatus(status.as_u16()))
            }
            _ => Ok(()),
        }
    }
}

fn transport_error(error: reqwest::Error) -> Error {
    Error::Transport(error.to_string())
}
