//! Defines the route handler for the page that lists transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    ApiClient, AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionList},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The client for fetching transactions.
    pub api_client: ApiClient,
    /// The transactions shown the last time the page was loaded.
    pub transaction_list: Arc<Mutex<TransactionList>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api_client: state.api_client.clone(),
            transaction_list: state.transaction_list.clone(),
        }
    }
}

/// Fetch the transactions and render them in the order received.
///
/// If the transactions cannot be fetched, the error is logged and the
/// transactions from the last successful fetch are shown instead.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let ticket = state
        .transaction_list
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire transaction list lock: {error}"))
        .map_err(|_| Error::TransactionListLockError)?
        .begin_refresh();

    let result = state.api_client.list_transactions().await;

    let transactions = {
        let mut transaction_list = state
            .transaction_list
            .lock()
            .inspect_err(|error| {
                tracing::error!("could not acquire transaction list lock: {error}")
            })
            .map_err(|_| Error::TransactionListLockError)?;

        transaction_list.finish_refresh(ticket, result);
        transaction_list.transactions().to_vec()
    };

    Ok(transactions_view(&transactions).into_response())
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let new_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let table_row = |transaction: &Transaction| {
        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                td class={(TABLE_CELL_STYLE) " text-right tabular-nums"}
                {
                    (format_currency(transaction.amount))
                }
                td class=(TABLE_CELL_STYLE) { (transaction.date) }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(new_transaction_route) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                section class="dark:bg-gray-800 w-full overflow-x-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Category"
                                }
                                th scope="col" class={(TABLE_CELL_STYLE) " text-right"}
                                {
                                    "Amount"
                                }
                                th scope="col" class=(TABLE_CELL_STYLE)
                                {
                                    "Date"
                                }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (table_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions yet. "
                                        a href=(new_transaction_route) class=(LINK_STYLE)
                                        {
                                            "Add your first transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &content)
}
