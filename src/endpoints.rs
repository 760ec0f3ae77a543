//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/categories/{category_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page with the summary cards and charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page listing income transactions.
pub const INCOME_VIEW: &str = "/income";
/// The page listing expense transactions.
pub const EXPENSE_VIEW: &str = "/expense";
/// The page listing all categories.
pub const CATEGORIES_VIEW: &str = "/category";
/// The page for creating a new category.
pub const NEW_CATEGORY_VIEW: &str = "/category/new";
/// The page for editing an existing category.
pub const EDIT_CATEGORY_VIEW: &str = "/category/{category_id}/edit";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/trans/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/trans/{transaction_id}/edit";

/// The dashboard form route for creating a category.
pub const POST_CATEGORY_FORM: &str = "/dashboard/categories";
/// The dashboard form route for updating a category.
pub const PUT_CATEGORY_FORM: &str = "/dashboard/categories/{category_id}";
/// The dashboard form route for creating a transaction.
pub const POST_TRANSACTION_FORM: &str = "/dashboard/transactions";
/// The dashboard form route for updating a transaction.
pub const PUT_TRANSACTION_FORM: &str = "/dashboard/transactions/{transaction_id}";

/// The route to create a category.
pub const CREATE_CATEGORY: &str = "/create/category";
/// The route to list all categories.
pub const CATEGORIES: &str = "/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route to create a transaction.
pub const CREATE_TRANSACTION: &str = "/create/trans";
/// The route to list all transactions.
pub const TRANSACTIONS: &str = "/trans";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/trans/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let param_start = match endpoint_path.find('{') {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
