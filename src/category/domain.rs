//! Core category domain types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{db::DocumentId, entry_type::EntryType};

/// The store collection that holds categories.
pub const CATEGORY_COLLECTION: &str = "category";

/// Whether a category is offered when creating new transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    pub const ALL: [CategoryStatus; 2] = [CategoryStatus::Active, CategoryStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "Active",
            CategoryStatus::Inactive => "Inactive",
        }
    }
}

impl FromStr for CategoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(CategoryStatus::Active),
            "Inactive" => Ok(CategoryStatus::Inactive),
            other => Err(format!("unknown category status \"{other}\"")),
        }
    }
}

/// A category for filing transactions under (e.g., 'Salary', 'Groceries').
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    #[serde(rename = "id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: CategoryStatus,
    /// RFC 3339 timestamp of when the category was created.
    #[serde(default)]
    pub date_created: String,
    /// RFC 3339 timestamp of the last update, `None` until the first update.
    pub date_updated: Option<String>,
}

/// The request body for creating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "Type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub description: String,
}

/// The fields that may be changed on an existing category.
///
/// Only the fields that are `Some` are written. Other keys in the request
/// body, such as `id` or `DateCreated`, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CategoryStatus>,
}

/// The response to a category update: the supplied fields merged with the
/// new update time, rather than a fresh read of the stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedCategory {
    pub id: DocumentId,
    #[serde(flatten)]
    pub update: CategoryUpdate,
    #[serde(rename = "DateUpdated")]
    pub date_updated: String,
    pub message: &'static str,
}

/// Form data for category creation and editing on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryFormData {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Shown when a dashboard category form is missing a field.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

impl CategoryFormData {
    /// Check that every field was filled in and build the new category.
    ///
    /// # Errors
    ///
    /// Returns [MISSING_FIELDS_MESSAGE] if the name, description or type is
    /// empty, or the type is not one of the known entry types.
    pub fn validate(&self) -> Result<NewCategory, &'static str> {
        let name = self.name.trim();
        let description = self.description.trim();

        if name.is_empty() || description.is_empty() {
            return Err(MISSING_FIELDS_MESSAGE);
        }

        let entry_type = self
            .entry_type
            .parse::<EntryType>()
            .map_err(|_| MISSING_FIELDS_MESSAGE)?;

        Ok(NewCategory {
            name: name.to_owned(),
            entry_type,
            description: description.to_owned(),
        })
    }

    /// Validate the edit form, which also carries the category status.
    ///
    /// # Errors
    ///
    /// Returns [MISSING_FIELDS_MESSAGE] under the same conditions as
    /// [CategoryFormData::validate], or if the status is missing or unknown.
    pub fn validate_update(&self) -> Result<CategoryUpdate, &'static str> {
        let new_category = self.validate()?;
        let status = self
            .status
            .as_deref()
            .ok_or(MISSING_FIELDS_MESSAGE)?
            .parse::<CategoryStatus>()
            .map_err(|_| MISSING_FIELDS_MESSAGE)?;

        Ok(CategoryUpdate {
            name: Some(new_category.name),
            entry_type: Some(new_category.entry_type),
            description: Some(new_category.description),
            status: Some(status),
        })
    }
}
