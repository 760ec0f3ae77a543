//! The document store backing the categories and transactions.
//!
//! Records are schemaless JSON objects addressed by a collection name and a
//! store-assigned identifier. They live in a single SQLite table, so a
//! collection is just a value in the `collection` column.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension, Row};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Error, timestamp::now_rfc3339};

/// The fields of a document.
pub type Fields = Map<String, Value>;

/// Store-assigned identifier for a document.
pub type DocumentId = String;

/// A document read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    /// The document's fields with its ID attached under the key "id".
    pub fn into_json_with_id(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_owned(), Value::String(self.id));

        Value::Object(fields)
    }
}

/// The acknowledgement returned after a document has been written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteResult {
    /// The ID assigned to the new document.
    pub id: DocumentId,
    /// The document's path in the form "<collection>/<id>".
    pub path: String,
    /// When the write was applied.
    #[serde(rename = "writeTime")]
    pub write_time: String,
}

/// Serialize `value` into document fields.
///
/// # Errors
///
/// Returns [Error::JSONSerializationError] if `value` does not serialize to a JSON object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, Error> {
    match serde_json::to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(Error::JSONSerializationError(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Create the document table and indexes if they do not exist yet.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS document (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data TEXT NOT NULL,
            UNIQUE(collection, id)
        );

        CREATE INDEX IF NOT EXISTS idx_document_collection ON document(collection);",
    )?;

    Ok(())
}

/// Lock the shared connection, logging and mapping a poisoned lock.
pub fn lock_connection(
    connection: &Arc<Mutex<Connection>>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Store `fields` as a new document in `collection` under a fresh ID.
pub fn add_document(
    collection: &str,
    fields: &Fields,
    connection: &Connection,
) -> Result<WriteResult, Error> {
    let id = Uuid::new_v4().simple().to_string();
    let data = serde_json::to_string(fields)?;

    connection.execute(
        "INSERT INTO document (collection, id, data) VALUES (?1, ?2, ?3);",
        (collection, &id, &data),
    )?;

    Ok(WriteResult {
        path: format!("{collection}/{id}"),
        id,
        write_time: now_rfc3339()?,
    })
}

/// Retrieve a single document, or `None` if it does not exist.
pub fn get_document(
    collection: &str,
    id: &str,
    connection: &Connection,
) -> Result<Option<Document>, Error> {
    let row = connection
        .prepare("SELECT id, data FROM document WHERE collection = ?1 AND id = ?2;")?
        .query_row((collection, id), map_row)
        .optional()?;

    row.map(into_document).transpose()
}

/// Retrieve every document in `collection` in insertion order.
pub fn list_documents(collection: &str, connection: &Connection) -> Result<Vec<Document>, Error> {
    connection
        .prepare("SELECT id, data FROM document WHERE collection = ?1 ORDER BY seq ASC;")?
        .query_map([collection], map_row)?
        .map(|maybe_row| {
            maybe_row
                .map_err(Error::from)
                .and_then(into_document)
        })
        .collect()
}

/// Overwrite the top-level `fields` of an existing document, keeping the rest.
///
/// # Errors
///
/// Returns [Error::NotFound] if the document does not exist.
pub fn merge_document(
    collection: &str,
    id: &str,
    fields: &Fields,
    connection: &Connection,
) -> Result<(), Error> {
    let mut document = get_document(collection, id, connection)?.ok_or(Error::NotFound)?;

    for (key, value) in fields {
        document.fields.insert(key.clone(), value.clone());
    }

    let data = serde_json::to_string(&document.fields)?;
    let rows_affected = connection.execute(
        "UPDATE document SET data = ?1 WHERE collection = ?2 AND id = ?3;",
        (&data, collection, id),
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete a document. Deleting a document that does not exist is not an error.
pub fn delete_document(collection: &str, id: &str, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "DELETE FROM document WHERE collection = ?1 AND id = ?2;",
        (collection, id),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<(String, String), rusqlite::Error> {
    Ok((row.get(0)?, row.get(1)?))
}

fn into_document((id, data): (String, String)) -> Result<Document, Error> {
    match serde_json::from_str::<Value>(&data) {
        Ok(Value::Object(fields)) => Ok(Document { id, fields }),
        Ok(other) => Err(Error::InvalidDocument(format!(
            "document {id} is not a JSON object: {other}"
        ))),
        Err(error) => Err(Error::InvalidDocument(format!("document {id}: {error}"))),
    }
}
