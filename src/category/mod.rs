//! Category management: the JSON API and the dashboard pages.

mod create;
pub(crate) mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::{create_category_endpoint, create_category_form_endpoint, get_new_category_page};
pub use db::get_all_categories;
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryStatus, CategoryUpdate, NewCategory, UpdatedCategory};
pub use edit::{get_edit_category_page, update_category_endpoint, update_category_form_endpoint};
pub use list::{get_categories_page, list_categories_endpoint};
