//! Core transaction domain types.

use serde::{Deserialize, Serialize};

use crate::{
    category::{Category, CategoryStatus},
    db::DocumentId,
    entry_type::EntryType,
};

/// The store collection that holds transactions.
pub const TRANSACTION_COLLECTION: &str = "transaction";

/// An income or expense entry.
///
/// `category` holds a copy of the category's name rather than its ID, so
/// renaming a category does not change existing transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(rename = "id")]
    pub id: DocumentId,
    /// The date as supplied by the client, normally "YYYY-MM-DD".
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    pub amount: f64,
}

/// The request body for creating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTransaction {
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    pub amount: f64,
}

/// The fields that may be changed on an existing transaction.
///
/// Only the fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl From<NewTransaction> for TransactionUpdate {
    fn from(transaction: NewTransaction) -> Self {
        Self {
            date: Some(transaction.date),
            description: Some(transaction.description),
            category: Some(transaction.category),
            entry_type: Some(transaction.entry_type),
            amount: Some(transaction.amount),
        }
    }
}

/// Form data for transaction creation and editing on the dashboard.
///
/// `category` is the ID of the selected category and `amount` is kept as
/// text so that a bad value can be reported back on the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFormData {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: String,
}

/// Shown when a dashboard transaction form has an empty field or a bad amount.
pub const INVALID_FIELDS_MESSAGE: &str = "Please fill in all fields correctly.";

/// Shown when the selected category is unknown or inactive.
pub const INVALID_CATEGORY_MESSAGE: &str = "Selected category is invalid.";

impl TransactionFormData {
    /// Check the form and build the transaction it describes.
    ///
    /// The transaction takes the name and type of the selected category,
    /// which must be one of the active categories in `categories`.
    ///
    /// # Errors
    ///
    /// Returns [INVALID_FIELDS_MESSAGE] if a field is empty or the amount is
    /// not a number greater than zero, and [INVALID_CATEGORY_MESSAGE] if the
    /// category ID does not match an active category.
    pub fn validate(&self, categories: &[Category]) -> Result<NewTransaction, &'static str> {
        let date = self.date.trim();
        let description = self.description.trim();
        let category_id = self.category.trim();

        if date.is_empty() || description.is_empty() || category_id.is_empty() {
            return Err(INVALID_FIELDS_MESSAGE);
        }

        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => return Err(INVALID_FIELDS_MESSAGE),
        };

        let category = categories
            .iter()
            .find(|category| category.id == category_id && category.status == CategoryStatus::Active)
            .ok_or(INVALID_CATEGORY_MESSAGE)?;

        Ok(NewTransaction {
            date: date.to_owned(),
            description: description.to_owned(),
            category: category.name.clone(),
            entry_type: category.entry_type,
            amount,
        })
    }
}

#[cfg(test)]
mod transaction_form_tests {
    use crate::{
        category::{Category, CategoryStatus},
        entry_type::EntryType,
    };

    use super::{
        INVALID_CATEGORY_MESSAGE, INVALID_FIELDS_MESSAGE, NewTransaction, TransactionFormData,
    };

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: "salary".to_owned(),
                name: "Salary".to_owned(),
                entry_type: EntryType::Income,
                description: String::new(),
                status: CategoryStatus::Active,
                date_created: String::new(),
                date_updated: None,
            },
            Category {
                id: "old".to_owned(),
                name: "Old Job".to_owned(),
                entry_type: EntryType::Income,
                description: String::new(),
                status: CategoryStatus::Inactive,
                date_created: String::new(),
                date_updated: None,
            },
        ]
    }

    fn form(category: &str, amount: &str) -> TransactionFormData {
        TransactionFormData {
            date: "2025-01-15".to_owned(),
            description: "January pay".to_owned(),
            category: category.to_owned(),
            amount: amount.to_owned(),
        }
    }

    #[test]
    fn valid_form_copies_category_name_and_type() {
        let got = form("salary", "2500.50").validate(&categories());

        assert_eq!(
            got,
            Ok(NewTransaction {
                date: "2025-01-15".to_owned(),
                description: "January pay".to_owned(),
                category: "Salary".to_owned(),
                entry_type: EntryType::Income,
                amount: 2500.5,
            })
        );
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut missing_date = form("salary", "10");
        missing_date.date = String::new();
        let mut missing_description = form("salary", "10");
        missing_description.description = "  ".to_owned();

        assert_eq!(missing_date.validate(&categories()), Err(INVALID_FIELDS_MESSAGE));
        assert_eq!(
            missing_description.validate(&categories()),
            Err(INVALID_FIELDS_MESSAGE)
        );
        assert_eq!(form("", "10").validate(&categories()), Err(INVALID_FIELDS_MESSAGE));
    }

    #[test]
    fn amount_must_be_a_positive_number() {
        for amount in ["", "abc", "0", "-5", "NaN", "inf"] {
            assert_eq!(
                form("salary", amount).validate(&categories()),
                Err(INVALID_FIELDS_MESSAGE),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_or_inactive_category_is_rejected() {
        assert_eq!(
            form("missing", "10").validate(&categories()),
            Err(INVALID_CATEGORY_MESSAGE)
        );
        assert_eq!(
            form("old", "10").validate(&categories()),
            Err(INVALID_CATEGORY_MESSAGE)
        );
    }
}
