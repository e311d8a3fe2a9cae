//! Route handlers for the transactions API.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error, TransactionId,
    api::{ApiState, NewTransaction, db},
};

pub(super) async fn get_root() -> Response {
    Json(json!({"message": "Welcome to the Personal Finance Manager"})).into_response()
}

pub(super) async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response()
}

pub(super) async fn list_transactions(State(state): State<ApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match db::get_all_transactions(&connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not list transactions: {error}");
            error.into_json_response()
        }
    }
}

pub(super) async fn create_transaction(
    State(state): State<ApiState>,
    body: Result<Json<NewTransaction>, JsonRejection>,
) -> Response {
    let new_transaction = match body {
        Ok(Json(new_transaction)) => new_transaction,
        Err(rejection) => {
            tracing::debug!("rejected transaction body: {rejection}");
            return (
                rejection.status(),
                Json(json!({"detail": rejection.body_text()})),
            )
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match db::create_transaction(&new_transaction, &connection) {
        Ok(transaction) => Json(json!({
            "message": "Transaction added successfully",
            "data": transaction,
        }))
        .into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_json_response()
        }
    }
}

pub(super) async fn get_transaction(
    State(state): State<ApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match db::get_transaction(transaction_id, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_json_response(),
    }
}

pub(super) async fn delete_transaction(
    State(state): State<ApiState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match db::delete_transaction(transaction_id, &connection) {
        Ok(()) => Json(json!({
            "message": format!("Transaction {transaction_id} deleted successfully")
        }))
        .into_response(),
        Err(error) => error.into_json_response(),
    }
}
