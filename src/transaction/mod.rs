//! Transaction management: the JSON API and the dashboard pages.

mod create;
pub(crate) mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{
    create_transaction_endpoint, create_transaction_form_endpoint, get_new_transaction_page,
};
pub use db::get_all_transactions;
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, TransactionUpdate};
pub use edit::{
    get_edit_transaction_page, update_transaction_endpoint, update_transaction_form_endpoint,
};
pub use list::{get_expense_page, get_income_page, list_transactions_endpoint};
