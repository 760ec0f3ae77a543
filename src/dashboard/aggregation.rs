//! Totals and monthly series computed from transactions for the dashboard.

use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    category::{Category, CategoryStatus},
    entry_type::EntryType,
    timestamp::parse_date_prefix,
    transaction::Transaction,
};

const MONTH_LABEL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [year]");

/// Income and expense sums over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn revenue(&self) -> f64 {
        self.income - self.expense
    }
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MonthlyRevenue {
    /// The month as a short name and year, e.g. "Jan 2025".
    pub label: String,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyRevenue {
    /// Income minus expenses for the month.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sum the income and expense amounts.
pub(super) fn calculate_totals(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut totals, transaction| {
            match transaction.entry_type {
                EntryType::Income => totals.income += transaction.amount,
                EntryType::Expense => totals.expense += transaction.amount,
            }

            totals
        })
}

/// The number of categories that can still be used for new transactions.
pub(super) fn count_active_categories(categories: &[Category]) -> usize {
    categories
        .iter()
        .filter(|category| category.status == CategoryStatus::Active)
        .count()
}

/// Group transactions into calendar months.
///
/// Months appear in the order they are first seen in `transactions`, not in
/// date order. Transactions with a date that cannot be read are left out.
pub(super) fn monthly_revenue(transactions: &[Transaction]) -> Vec<MonthlyRevenue> {
    let mut months: Vec<MonthlyRevenue> = Vec::new();

    for transaction in transactions {
        let Some(label) = month_label(&transaction.date) else {
            tracing::debug!(
                "Leaving transaction {} out of the monthly series, could not read date {:?}",
                transaction.id,
                transaction.date
            );
            continue;
        };

        let index = match months.iter().position(|month| month.label == label) {
            Some(index) => index,
            None => {
                months.push(MonthlyRevenue {
                    label,
                    income: 0.0,
                    expense: 0.0,
                });
                months.len() - 1
            }
        };

        match transaction.entry_type {
            EntryType::Income => months[index].income += transaction.amount,
            EntryType::Expense => months[index].expense += transaction.amount,
        }
    }

    months
}

/// The share of income and expenses in the combined total, as percentages.
///
/// Both are zero when there are no amounts.
pub(super) fn income_expense_percentages(totals: &Totals) -> (f64, f64) {
    let total = totals.income + totals.expense;

    if total == 0.0 {
        return (0.0, 0.0);
    }

    let income_percentage = totals.income / total * 100.0;

    (income_percentage, 100.0 - income_percentage)
}

/// The transactions of one entry type, in their original order.
pub fn filter_by_type(transactions: &[Transaction], entry_type: EntryType) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.entry_type == entry_type)
        .collect()
}

/// Parse the calendar date at the start of `date` and label its month.
///
/// Accepts "YYYY-MM-DD" as well as longer timestamps that begin with one.
fn month_label(date: &str) -> Option<String> {
    let date = parse_date_prefix(date)?;

    date.format(MONTH_LABEL_FORMAT).ok()
}

#[cfg(test)]
mod aggregation_tests {
    use crate::{
        category::{Category, CategoryStatus},
        entry_type::EntryType,
        transaction::Transaction,
    };

    use super::{
        MonthlyRevenue, Totals, calculate_totals, count_active_categories, filter_by_type,
        income_expense_percentages, month_label, monthly_revenue,
    };

    fn transaction(date: &str, entry_type: EntryType, amount: f64) -> Transaction {
        Transaction {
            id: format!("{date}-{amount}"),
            date: date.to_owned(),
            description: String::new(),
            category: String::new(),
            entry_type,
            amount,
        }
    }

    fn category(status: CategoryStatus) -> Category {
        Category {
            id: String::new(),
            name: String::new(),
            entry_type: EntryType::Expense,
            description: String::new(),
            status,
            date_created: String::new(),
            date_updated: None,
        }
    }

    #[test]
    fn totals_split_by_type() {
        let transactions = [
            transaction("2025-01-10", EntryType::Income, 100.0),
            transaction("2025-01-12", EntryType::Expense, 40.0),
        ];

        let totals = calculate_totals(&transactions);

        assert_eq!(
            totals,
            Totals {
                income: 100.0,
                expense: 40.0
            }
        );
        assert_eq!(totals.revenue(), 60.0);
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        let totals = calculate_totals(&[]);

        assert_eq!(totals, Totals::default());
        assert_eq!(totals.revenue(), 0.0);
    }

    #[test]
    fn revenue_can_be_negative() {
        let transactions = [
            transaction("2025-01-10", EntryType::Income, 10.0),
            transaction("2025-01-12", EntryType::Expense, 25.0),
        ];

        assert_eq!(calculate_totals(&transactions).revenue(), -15.0);
    }

    #[test]
    fn only_active_categories_are_counted() {
        let categories = [
            category(CategoryStatus::Active),
            category(CategoryStatus::Inactive),
            category(CategoryStatus::Active),
        ];

        assert_eq!(count_active_categories(&categories), 2);
    }

    #[test]
    fn months_follow_first_seen_order() {
        let transactions = [
            transaction("2025-03-01", EntryType::Income, 50.0),
            transaction("2025-01-05", EntryType::Income, 100.0),
            transaction("2025-03-20", EntryType::Expense, 20.0),
            transaction("2025-01-09", EntryType::Expense, 30.0),
        ];

        let months = monthly_revenue(&transactions);

        assert_eq!(
            months,
            [
                MonthlyRevenue {
                    label: "Mar 2025".to_owned(),
                    income: 50.0,
                    expense: 20.0,
                },
                MonthlyRevenue {
                    label: "Jan 2025".to_owned(),
                    income: 100.0,
                    expense: 30.0,
                },
            ]
        );
        assert_eq!(months[0].net(), 30.0);
        assert_eq!(months[1].net(), 70.0);
    }

    #[test]
    fn same_month_in_different_years_is_split() {
        let transactions = [
            transaction("2024-12-01", EntryType::Income, 1.0),
            transaction("2025-12-01", EntryType::Income, 2.0),
        ];

        let labels: Vec<_> = monthly_revenue(&transactions)
            .into_iter()
            .map(|month| month.label)
            .collect();

        assert_eq!(labels, ["Dec 2024", "Dec 2025"]);
    }

    #[test]
    fn unreadable_dates_are_left_out_of_months_but_not_totals() {
        let transactions = [
            transaction("not a date", EntryType::Income, 5.0),
            transaction("2025-02-14", EntryType::Income, 10.0),
        ];

        let months = monthly_revenue(&transactions);

        assert_eq!(months.len(), 1);
        assert_eq!(months[0].income, 10.0);
        assert_eq!(calculate_totals(&transactions).income, 15.0);
    }

    #[test]
    fn month_label_accepts_timestamps() {
        assert_eq!(
            month_label("2025-07-04T10:00:00Z").as_deref(),
            Some("Jul 2025")
        );
        assert_eq!(month_label("2025-13-01"), None);
        assert_eq!(month_label(""), None);
    }

    #[test]
    fn percentages_split_the_total() {
        let totals = Totals {
            income: 75.0,
            expense: 25.0,
        };

        assert_eq!(income_expense_percentages(&totals), (75.0, 25.0));
    }

    #[test]
    fn percentages_of_nothing_are_zero() {
        assert_eq!(income_expense_percentages(&Totals::default()), (0.0, 0.0));
    }

    #[test]
    fn filter_keeps_order_of_matching_type() {
        let transactions = [
            transaction("2025-01-01", EntryType::Expense, 1.0),
            transaction("2025-01-02", EntryType::Income, 2.0),
            transaction("2025-01-03", EntryType::Expense, 3.0),
        ];

        let amounts: Vec<_> = filter_by_type(&transactions, EntryType::Expense)
            .into_iter()
            .map(|transaction| transaction.amount)
            .collect();

        assert_eq!(amounts, [1.0, 3.0]);
    }
}
