//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the dashboard:
//! - **Revenue Chart**: Net revenue per month as a line chart
//! - **Income vs Expense Chart**: The split of the combined total as a pie chart
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{MonthlyRevenue, Totals, income_expense_percentages},
    html::HeadElement,
};

/// The ECharts build loaded by the dashboard page.
pub(super) const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Each chart is initialized once the page has loaded and resized with the window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Net revenue per month, in the order the months were first seen.
pub(super) fn revenue_chart(months: &[MonthlyRevenue]) -> Chart {
    let labels: Vec<String> = months.iter().map(|month| month.label.clone()).collect();
    let values: Vec<f64> = months.iter().map(MonthlyRevenue::net).collect();

    Chart::new()
        .title(Title::new().text("Revenue").subtext("Income minus expenses per month"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Revenue").data(values))
}

/// Income and expenses as shares of the combined total.
pub(super) fn income_expense_chart(totals: &Totals) -> Chart {
    let (income_percentage, expense_percentage) = income_expense_percentages(totals);

    Chart::new()
        .title(Title::new().text("Income vs Expense").subtext("Share of all transactions"))
        .tooltip(Tooltip::new().trigger(Trigger::Item).formatter("{b}: {c}%"))
        .legend(Legend::new().bottom("3%"))
        .series(
            Pie::new()
                .name("Income vs Expense")
                .radius(vec!["40%", "70%"])
                .data(vec![
                    (round_percentage(income_percentage), "Income"),
                    (round_percentage(expense_percentage), "Expense"),
                ]),
        )
}

fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
