//! Store operations for transactions.

use rusqlite::Connection;

use crate::{
    Error,
    db::{
        Document, WriteResult, add_document, delete_document, get_document, list_documents,
        merge_document, to_fields,
    },
    transaction::{NewTransaction, Transaction, TransactionUpdate, domain::TRANSACTION_COLLECTION},
};

/// Store a new transaction exactly as given.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<WriteResult, Error> {
    add_document(TRANSACTION_COLLECTION, &to_fields(transaction)?, connection)
}

/// Retrieve a single transaction by ID.
///
/// # Errors
///
/// Returns [Error::TransactionNotFound] if there is no transaction with `transaction_id`.
pub fn get_transaction(transaction_id: &str, connection: &Connection) -> Result<Transaction, Error> {
    get_document(TRANSACTION_COLLECTION, transaction_id, connection)?
        .ok_or(Error::TransactionNotFound)
        .and_then(into_transaction)
}

/// Retrieve all transactions in the order they were created.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    list_documents(TRANSACTION_COLLECTION, connection)?
        .into_iter()
        .map(into_transaction)
        .collect()
}

/// Write the supplied fields of `update` and return the stored transaction.
///
/// # Errors
///
/// Returns [Error::TransactionNotFound] if the transaction does not exist, in
/// which case nothing is written.
pub fn update_transaction(
    transaction_id: &str,
    update: &TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    merge_document(
        TRANSACTION_COLLECTION,
        transaction_id,
        &to_fields(update)?,
        connection,
    )
    .map_err(|error| match error {
        Error::NotFound => Error::TransactionNotFound,
        error => error,
    })?;

    get_transaction(transaction_id, connection)
}

/// Delete a transaction by ID. Deleting a missing transaction is not an error.
pub fn delete_transaction(transaction_id: &str, connection: &Connection) -> Result<(), Error> {
    delete_document(TRANSACTION_COLLECTION, transaction_id, connection)
}

fn into_transaction(document: Document) -> Result<Transaction, Error> {
    let id = document.id.clone();

    serde_json::from_value(document.into_json_with_id())
        .map_err(|error| Error::InvalidDocument(format!("transaction {id}: {error}")))
}

#[cfg(test)]
mod transaction_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::{initialize, list_documents},
        entry_type::EntryType,
        transaction::{NewTransaction, TransactionUpdate},
    };

    use super::{
        create_transaction, delete_transaction, get_all_transactions, get_transaction,
        update_transaction,
    };

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not create document table");
        connection
    }

    fn lunch() -> NewTransaction {
        NewTransaction {
            date: "2025-01-15".to_owned(),
            description: "Lunch".to_owned(),
            category: "Food".to_owned(),
            entry_type: EntryType::Expense,
            amount: 12.5,
        }
    }

    #[test]
    fn create_stores_fields_verbatim() {
        let connection = get_test_db_connection();

        let result = create_transaction(&lunch(), &connection).expect("Could not create");

        let transaction = get_transaction(&result.id, &connection).unwrap();
        assert_eq!(transaction.id, result.id);
        assert_eq!(transaction.date, "2025-01-15");
        assert_eq!(transaction.description, "Lunch");
        assert_eq!(transaction.category, "Food");
        assert_eq!(transaction.entry_type, EntryType::Expense);
        assert_eq!(transaction.amount, 12.5);
    }

    #[test]
    fn negative_amounts_and_unknown_categories_are_stored() {
        let connection = get_test_db_connection();
        let odd = NewTransaction {
            category: "No Such Category".to_owned(),
            amount: -3.0,
            ..lunch()
        };

        let result = create_transaction(&odd, &connection).unwrap();

        let transaction = get_transaction(&result.id, &connection).unwrap();
        assert_eq!(transaction.amount, -3.0);
        assert_eq!(transaction.category, "No Such Category");
    }

    #[test]
    fn get_all_keeps_creation_order() {
        let connection = get_test_db_connection();
        for description in ["first", "second", "third"] {
            let transaction = NewTransaction {
                description: description.to_owned(),
                ..lunch()
            };
            create_transaction(&transaction, &connection).unwrap();
        }

        let transactions = get_all_transactions(&connection).unwrap();

        let descriptions: Vec<_> = transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
    }

    #[test]
    fn update_merges_supplied_subset_and_returns_stored_record() {
        let connection = get_test_db_connection();
        let result = create_transaction(&lunch(), &connection).unwrap();
        let update = TransactionUpdate {
            amount: Some(20.0),
            ..Default::default()
        };

        let updated = update_transaction(&result.id, &update, &connection)
            .expect("Could not update transaction");

        assert_eq!(updated.id, result.id);
        assert_eq!(updated.amount, 20.0);
        assert_eq!(updated.description, "Lunch");
        assert_eq!(updated.date, "2025-01-15");
        assert_eq!(get_transaction(&result.id, &connection).unwrap(), updated);
    }

    #[test]
    fn update_missing_transaction_returns_not_found_and_writes_nothing() {
        let connection = get_test_db_connection();
        let update = TransactionUpdate {
            amount: Some(1.0),
            ..Default::default()
        };

        let result = update_transaction("missing", &update, &connection);

        assert_eq!(result, Err(Error::TransactionNotFound));
        assert!(list_documents("transaction", &connection).unwrap().is_empty());
    }

    #[test]
    fn deleted_transaction_is_not_listed() {
        let connection = get_test_db_connection();
        let result = create_transaction(&lunch(), &connection).unwrap();

        delete_transaction(&result.id, &connection).expect("Could not delete");

        assert!(get_all_transactions(&connection).unwrap().is_empty());
        assert_eq!(
            get_transaction(&result.id, &connection),
            Err(Error::TransactionNotFound)
        );
    }

    #[test]
    fn delete_missing_transaction_succeeds() {
        let connection = get_test_db_connection();

        assert_eq!(delete_transaction("missing", &connection), Ok(()));
    }
}
