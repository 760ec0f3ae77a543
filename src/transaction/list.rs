//! Transaction listing: the JSON endpoint and the income and expense tables.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::filter_by_type,
    db::lock_connection,
    endpoints,
    entry_type::EntryType,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    timestamp::display_date,
    transaction::{Transaction, get_all_transactions},
};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return every transaction with its ID, unfiltered.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    Ok(Json(transactions))
}

/// Render the table of income transactions.
pub async fn get_income_page(State(state): State<ListTransactionsState>) -> Result<Response, Error> {
    entry_type_page(&state, EntryType::Income)
}

/// Render the table of expense transactions.
pub async fn get_expense_page(
    State(state): State<ListTransactionsState>,
) -> Result<Response, Error> {
    entry_type_page(&state, EntryType::Expense)
}

fn entry_type_page(state: &ListTransactionsState, entry_type: EntryType) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;
    let transactions = filter_by_type(&transactions, entry_type);

    Ok(transactions_view(entry_type, &transactions).into_response())
}

/// The page listing transactions of `entry_type`.
pub(super) fn list_page_for(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Income => endpoints::INCOME_VIEW,
        EntryType::Expense => endpoints::EXPENSE_VIEW,
    }
}

fn transactions_view(entry_type: EntryType, transactions: &[&Transaction]) -> Markup {
    let nav_bar = NavBar::new(list_page_for(entry_type)).into_html();
    let title = entry_type.as_str();
    let total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();

    let table_row = |transaction: &Transaction| {
        let edit_url =
            endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
        let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION, &transaction.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? This cannot be undone.",
            transaction.description
        );

        html!(
            tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
            {
                td class=(TABLE_CELL_STYLE) { code class="text-xs" { (transaction.id) } }
                td class=(TABLE_CELL_STYLE) { (display_date(&transaction.date)) }
                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(&edit_url, &delete_url, &confirm_message))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-screen-xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { (title) }

                    span class="text-lg" { "Total: " (format_currency(total)) }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                div class="dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (table_row(*transaction))
                            }

                            @if transactions.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="6" class="px-6 py-4 text-center"
                                    {
                                        "No transactions yet."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}
