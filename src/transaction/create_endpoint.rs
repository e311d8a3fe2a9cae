//! Defines the endpoint for creating a new transaction.

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    ApiClient, AppState, endpoints,
    transaction::form::{TransactionForm, transaction_form_view},
};

/// The message shown in the form when the transaction could not be saved.
const SAVE_FAILED_MESSAGE: &str = "Could not save the transaction. Try again later.";

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The client for submitting transactions.
    pub api_client: ApiClient,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
///
/// On failure the form is returned with the submitted values so the user can
/// try again.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = form.to_transaction();

    if let Err(error) = state.api_client.create_transaction(&transaction).await {
        tracing::error!("Error adding transaction: {error}");

        return transaction_form_view(&form, Some(SAVE_FAILED_MESSAGE)).into_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
