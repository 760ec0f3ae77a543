//! Application router configuration for the JSON API and the dashboard pages.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    category::{
        create_category_endpoint, create_category_form_endpoint, delete_category_endpoint,
        get_categories_page, get_edit_category_page, get_new_category_page,
        list_categories_endpoint, update_category_endpoint, update_category_form_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, create_transaction_form_endpoint,
        delete_transaction_endpoint, get_edit_transaction_page, get_expense_page,
        get_income_page, get_new_transaction_page, list_transactions_endpoint,
        update_transaction_endpoint, update_transaction_form_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(endpoints::CREATE_CATEGORY, post(create_category_endpoint))
        .route(endpoints::CATEGORIES, get(list_categories_endpoint))
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::CREATE_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(endpoints::TRANSACTIONS, get(list_transactions_endpoint))
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        );

    let dashboard_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::INCOME_VIEW, get(get_income_page))
        .route(endpoints::EXPENSE_VIEW, get(get_expense_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(
            endpoints::POST_CATEGORY_FORM,
            post(create_category_form_endpoint),
        )
        .route(
            endpoints::PUT_CATEGORY_FORM,
            put(update_category_form_endpoint),
        )
        .route(
            endpoints::POST_TRANSACTION_FORM,
            post(create_transaction_form_endpoint),
        )
        .route(
            endpoints::PUT_TRANSACTION_FORM,
            put(update_transaction_form_endpoint),
        );

    api_routes
        .merge(dashboard_routes)
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
