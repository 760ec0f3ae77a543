use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    category::db::delete_category,
    db::{DocumentId, lock_connection},
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete a category. Transactions filed under it keep their copy of its name.
pub async fn delete_category_endpoint(
    Path(category_id): Path<DocumentId>,
    State(state): State<DeleteCategoryState>,
) -> Result<Json<Value>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_category(&category_id, &connection)
        .inspect_err(|error| tracing::error!("Could not delete category {category_id}: {error}"))?;

    tracing::info!("Deleted category {category_id}");

    Ok(Json(json!({ "message": "Category deleted successfully" })))
}
