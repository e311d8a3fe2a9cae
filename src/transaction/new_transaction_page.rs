//! Defines the route handler for the page for creating a new transaction.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::form::{TransactionForm, transaction_form_view},
};

fn new_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = transaction_form_view(&TransactionForm::default(), None);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Add Transaction" }

            (form)
        }
    };

    base("Add Transaction", &content)
}

/// Renders the page for creating a transaction with an empty form.
pub async fn get_new_transaction_page() -> Response {
    new_transaction_view().into_response()
}
