//! Store operations for categories.

use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    category::{
        Category, CategoryStatus, CategoryUpdate, NewCategory, UpdatedCategory,
        domain::CATEGORY_COLLECTION,
    },
    db::{
        Document, WriteResult, add_document, delete_document, get_document, list_documents,
        merge_document, to_fields,
    },
    entry_type::EntryType,
};

/// The stored shape of a new category, without the store-assigned ID.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CategoryDocument<'a> {
    name: &'a str,
    #[serde(rename = "Type")]
    entry_type: EntryType,
    description: &'a str,
    status: CategoryStatus,
    date_created: &'a str,
    date_updated: Option<&'a str>,
}

/// Create an active category stamped with `created_at` and no update time.
pub fn create_category(
    new_category: &NewCategory,
    created_at: &str,
    connection: &Connection,
) -> Result<WriteResult, Error> {
    let fields = to_fields(&CategoryDocument {
        name: &new_category.name,
        entry_type: new_category.entry_type,
        description: &new_category.description,
        status: CategoryStatus::Active,
        date_created: created_at,
        date_updated: None,
    })?;

    add_document(CATEGORY_COLLECTION, &fields, connection)
}

/// Retrieve a single category by ID.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if there is no category with `category_id`.
pub fn get_category(category_id: &str, connection: &Connection) -> Result<Category, Error> {
    get_document(CATEGORY_COLLECTION, category_id, connection)?
        .ok_or(Error::CategoryNotFound)
        .and_then(into_category)
}

/// Retrieve all categories in the order they were created.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    list_documents(CATEGORY_COLLECTION, connection)?
        .into_iter()
        .map(into_category)
        .collect()
}

/// Write the supplied fields of `update` and stamp the category with `updated_at`.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] if the category does not exist, in which
/// case nothing is written.
pub fn update_category(
    category_id: &str,
    update: CategoryUpdate,
    updated_at: &str,
    connection: &Connection,
) -> Result<UpdatedCategory, Error> {
    let mut fields = to_fields(&update)?;
    fields.insert("DateUpdated".to_owned(), updated_at.into());

    merge_document(CATEGORY_COLLECTION, category_id, &fields, connection).map_err(
        |error| match error {
            Error::NotFound => Error::CategoryNotFound,
            error => error,
        },
    )?;

    Ok(UpdatedCategory {
        id: category_id.to_owned(),
        update,
        date_updated: updated_at.to_owned(),
        message: "Category updated successfully",
    })
}

/// Delete a category by ID. Deleting a missing category is not an error.
pub fn delete_category(category_id: &str, connection: &Connection) -> Result<(), Error> {
    delete_document(CATEGORY_COLLECTION, category_id, connection)
}

fn into_category(document: Document) -> Result<Category, Error> {
    let id = document.id.clone();

    serde_json::from_value(document.into_json_with_id())
        .map_err(|error| Error::InvalidDocument(format!("category {id}: {error}")))
}
