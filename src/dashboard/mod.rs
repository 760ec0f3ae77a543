//! Dashboard module
//!
//! Provides an overview page with income, expense and revenue totals, a
//! monthly revenue chart and the split between income and expenses.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use aggregation::filter_by_type;
pub use handlers::get_dashboard_page;
