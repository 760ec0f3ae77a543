//! Transaction editing: the JSON update endpoint and the dashboard page and form.

use std::sync::{Arc, Mutex};

use axum::{
    Form, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryStatus, get_all_categories},
    db::{DocumentId, lock_connection},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, UNEXPECTED_ERROR_MESSAGE, base},
    navigation::NavBar,
    transaction::{
        Transaction, TransactionUpdate,
        db::{get_transaction, update_transaction},
        domain::TransactionFormData,
        form::{form_error_message, transaction_form_fields},
        list::list_page_for,
    },
};

/// The state needed for editing a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Merge the supplied fields into a transaction and return the stored result.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<EditTransactionState>,
    Json(update): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transaction = update_transaction(&transaction_id, &update, &connection)?;
    tracing::info!("Updated transaction {transaction_id}");

    Ok(Json(transaction))
}

/// Render the transaction editing page, pre-filled with the stored values.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<EditTransactionState>,
) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let edit_endpoint =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction_id);
    let update_endpoint =
        endpoints::format_endpoint(endpoints::PUT_TRANSACTION_FORM, &transaction_id);

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let (form_data, error_message) = match get_transaction(&transaction_id, &connection) {
        Ok(transaction) => (prefill_form(&transaction, &categories), ""),
        Err(Error::TransactionNotFound) => {
            (TransactionFormData::default(), "Transaction not found")
        }
        Err(error) => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            (TransactionFormData::default(), "Failed to load transaction")
        }
    };

    Ok(edit_transaction_view(
        &edit_endpoint,
        &update_endpoint,
        &form_data,
        &categories,
        error_message,
    )
    .into_response())
}

/// Handle the dashboard's transaction edit form.
///
/// The transaction takes the name and type of the selected category, as on
/// creation, and the client is sent to the list for its type.
pub async fn update_transaction_form_endpoint(
    Path(transaction_id): Path<DocumentId>,
    State(state): State<EditTransactionState>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    let update_endpoint =
        endpoints::format_endpoint(endpoints::PUT_TRANSACTION_FORM, &transaction_id);

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(_) => {
            return edit_transaction_form_view(
                &update_endpoint,
                &form_data,
                &[],
                UNEXPECTED_ERROR_MESSAGE,
            )
            .into_response();
        }
    };

    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            return edit_transaction_form_view(
                &update_endpoint,
                &form_data,
                &[],
                UNEXPECTED_ERROR_MESSAGE,
            )
            .into_response();
        }
    };

    let update = match form_data.validate(&categories) {
        Ok(transaction) => TransactionUpdate::from(transaction),
        Err(message) => {
            return edit_transaction_form_view(&update_endpoint, &form_data, &categories, message)
                .into_response();
        }
    };

    match update_transaction(&transaction_id, &update, &connection) {
        Ok(transaction) => (
            HxRedirect(list_page_for(transaction.entry_type).to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::TransactionNotFound) => edit_transaction_form_view(
            &update_endpoint,
            &form_data,
            &categories,
            "Transaction not found",
        )
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            edit_transaction_form_view(
                &update_endpoint,
                &form_data,
                &categories,
                UNEXPECTED_ERROR_MESSAGE,
            )
            .into_response()
        }
    }
}

/// Map a stored transaction back onto the form.
///
/// Transactions keep the category name, so the matching active category with
/// the same name and type is preselected when there is one.
fn prefill_form(transaction: &Transaction, categories: &[Category]) -> TransactionFormData {
    let category_id = categories
        .iter()
        .find(|category| {
            category.status == CategoryStatus::Active
                && category.name == transaction.category
                && category.entry_type == transaction.entry_type
        })
        .map(|category| category.id.clone())
        .unwrap_or_default();

    TransactionFormData {
        date: transaction.date.clone(),
        description: transaction.description.clone(),
        category: category_id,
        amount: transaction.amount.to_string(),
    }
}

fn edit_transaction_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    form_data: &TransactionFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_transaction_form_view(update_endpoint, form_data, categories, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Transaction", &[], &content)
}

fn edit_transaction_form_view(
    update_endpoint: &str,
    form_data: &TransactionFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (transaction_form_fields(form_data, categories))
            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Transaction" }
        }
    }
}
