//! Summary cards shown at the top of the dashboard.

use maud::{Markup, html};

use crate::{dashboard::aggregation::Totals, html::format_currency};

/// Renders the income, expense, revenue and active category cards.
pub(super) fn summary_cards_view(totals: &Totals, active_categories: usize) -> Markup {
    let revenue = totals.revenue();
    // Less than half a cent below zero is shown as "$0.00", so not in red.
    let revenue_style = if revenue <= -0.005 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section
            id="summary-cards"
            class="w-full mx-auto mb-8 grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4"
        {
            (card("Income", &format_currency(totals.income), "text-green-600 dark:text-green-400"))
            (card("Expense", &format_currency(totals.expense), "text-red-600 dark:text-red-400"))
            (card("Revenue", &format_currency(revenue), revenue_style))
            (card("Active Categories", &active_categories.to_string(), ""))
        }
    }
}

fn card(title: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
            data-card=(title)
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }

            p class={ "mt-2 text-2xl font-bold " (value_style) } { (value) }
        }
    }
}
