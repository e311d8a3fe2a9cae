//! The form for entering a new transaction.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::Transaction,
};

/// The text entered into the new transaction form.
///
/// All fields default to the empty string, so a submission with missing
/// fields is treated the same as one with blank fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// The amount as typed by the user, e.g. "12.50".
    pub amount: String,
    /// Free text label for the transaction.
    pub category: String,
    /// The date as typed by the user, expected to be `YYYY-MM-DD`.
    pub date: String,
}

impl TransactionForm {
    /// Build an unsaved transaction from the form.
    ///
    /// An amount that is not a number is read as `0.0`.
    pub fn to_transaction(&self) -> Transaction {
        Transaction::new(parse_amount(&self.amount), &self.category, &self.date)
    }
}

/// Parse `text` as a floating-point amount, or `0.0` if it is not a number.
pub fn parse_amount(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

/// Render the new transaction form prefilled with `values`.
///
/// `error_message` is shown below the inputs when set.
pub fn transaction_form_view(values: &TransactionForm, error_message: Option<&str>) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(create_transaction_route)
            hx-swap="outerHTML"
            hx-target-error="this"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Transaction Details" }

            div
            {
                label
                    for="amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                input
                    name="amount"
                    id="amount"
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount"
                    autofocus
                    value=(values.amount)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="category"
                    class=(FORM_LABEL_STYLE)
                {
                    "Category"
                }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Category"
                    value=(values.category)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Date"
                }

                input
                    name="date"
                    id="date"
                    type="text"
                    placeholder="Date (YYYY-MM-DD)"
                    value=(values.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if let Some(error_message) = error_message {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span
                    id="indicator"
                    class="inline htmx-indicator"
                {
                    (spinner)
                }
                " Save Transaction"
            }
        }
    }
}
