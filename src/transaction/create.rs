//! Transaction creation: the JSON endpoint and the dashboard page and form.

use std::sync::{Arc, Mutex};

use axum::{
    Form, Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    db::{WriteResult, lock_connection},
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, UNEXPECTED_ERROR_MESSAGE, base},
    navigation::NavBar,
    transaction::{
        NewTransaction,
        db::create_transaction,
        domain::TransactionFormData,
        form::{form_error_message, transaction_form_fields},
    },
};

/// The state needed for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Store a transaction as given and return the store's write result.
///
/// Neither the amount nor the category name is checked.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(transaction): Json<NewTransaction>,
) -> Result<Json<WriteResult>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let result = create_transaction(&transaction, &connection)
        .inspect_err(|error| tracing::error!("Could not create transaction: {error}"))?;

    tracing::info!("Created transaction {}", result.id);

    Ok(Json(result))
}

/// Render the transaction creation page.
pub async fn get_new_transaction_page(
    State(state): State<CreateTransactionState>,
) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(new_transaction_view(&categories).into_response())
}

/// Handle the dashboard's transaction creation form.
pub async fn create_transaction_form_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(_) => {
            return new_transaction_form_view(&form_data, &[], UNEXPECTED_ERROR_MESSAGE)
                .into_response();
        }
    };

    let categories = match get_all_categories(&connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed to retrieve categories: {error}");
            return new_transaction_form_view(&form_data, &[], UNEXPECTED_ERROR_MESSAGE)
                .into_response();
        }
    };

    let transaction = match form_data.validate(&categories) {
        Ok(transaction) => transaction,
        Err(message) => {
            return new_transaction_form_view(&form_data, &categories, message).into_response();
        }
    };

    match create_transaction(&transaction, &connection) {
        Ok(_) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a transaction: {error}");
            new_transaction_form_view(&form_data, &categories, UNEXPECTED_ERROR_MESSAGE)
                .into_response()
        }
    }
}

fn new_transaction_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let form = new_transaction_form_view(&TransactionFormData::default(), categories, "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Transaction", &[], &content)
}

fn new_transaction_form_view(
    form_data: &TransactionFormData,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_TRANSACTION_FORM)
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (transaction_form_fields(form_data, categories))
            (form_error_message(error_message))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Transaction" }
        }
    }
}
