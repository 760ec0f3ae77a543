//! Dashboard HTTP handler and view rendering.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_all_categories,
    dashboard::{
        aggregation::{Totals, calculate_totals, count_active_categories, monthly_revenue},
        cards::summary_cards_view,
        charts::{
            DashboardChart, ECHARTS_SCRIPT_URL, charts_script, charts_view, income_expense_chart,
            revenue_chart,
        },
    },
    db::lock_connection,
    endpoints,
    html::{HeadElement, LINK_STYLE, base},
    navigation::NavBar,
    transaction::{Transaction, get_all_transactions},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading categories and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display a page with totals and charts over all transactions.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;
    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    let totals = calculate_totals(&transactions);
    let active_categories = count_active_categories(&categories);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(&totals, active_categories).into_response());
    }

    let charts = build_dashboard_charts(&totals, &transactions);

    Ok(dashboard_view(&totals, active_categories, &charts).into_response())
}

/// Builds the dashboard charts.
///
/// The chart options are serialized to JSON for ECharts consumption.
fn build_dashboard_charts(totals: &Totals, transactions: &[Transaction]) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "revenue-chart",
            options: revenue_chart(&monthly_revenue(transactions)).to_string(),
        },
        DashboardChart {
            id: "income-expense-chart",
            options: income_expense_chart(totals).to_string(),
        },
    ]
}

fn dashboard_no_data_view(totals: &Totals, active_categories: usize) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(totals, active_categories))

            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions. "
                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE) { "Add a transaction" }
                " to get started."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(totals: &Totals, active_categories: usize, charts: &[DashboardChart]) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(totals, active_categories))
            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
