//! Category editing: the JSON update endpoint and the dashboard page and form.

use std::sync::{Arc, Mutex};

use axum::{
    Form, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryStatus, CategoryUpdate, UpdatedCategory,
        create::category_form_fields,
        db::{get_category, update_category},
        domain::CategoryFormData,
    },
    db::{DocumentId, lock_connection},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        UNEXPECTED_ERROR_MESSAGE, base,
    },
    navigation::NavBar,
    timestamp::now_rfc3339,
};

/// The state needed for editing a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Merge the supplied fields into a category and stamp its update time.
pub async fn update_category_endpoint(
    Path(category_id): Path<DocumentId>,
    State(state): State<EditCategoryState>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<UpdatedCategory>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let updated_at = now_rfc3339()?;

    let updated = update_category(&category_id, update, &updated_at, &connection)?;
    tracing::info!("Updated category {category_id}");

    Ok(Json(updated))
}

/// Render the category editing page, pre-filled with the stored values.
pub async fn get_edit_category_page(
    Path(category_id): Path<DocumentId>,
    State(state): State<EditCategoryState>,
) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, &category_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY_FORM, &category_id);

    match get_category(&category_id, &connection) {
        Ok(category) => {
            let form_data = CategoryFormData {
                name: category.name,
                entry_type: category.entry_type.as_str().to_owned(),
                description: category.description,
                status: Some(category.status.as_str().to_owned()),
            };

            Ok(edit_category_view(&edit_endpoint, &update_endpoint, &form_data, "").into_response())
        }
        Err(error) => {
            let error_message = match error {
                Error::CategoryNotFound => "Category not found",
                _ => {
                    tracing::error!("Failed to retrieve category {category_id}: {error}");
                    "Failed to load category"
                }
            };

            Ok(edit_category_view(
                &edit_endpoint,
                &update_endpoint,
                &CategoryFormData::default(),
                error_message,
            )
            .into_response())
        }
    }
}

/// Handle the dashboard's category edit form.
pub async fn update_category_form_endpoint(
    Path(category_id): Path<DocumentId>,
    State(state): State<EditCategoryState>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_CATEGORY_FORM, &category_id);

    let update = match form_data.validate_update() {
        Ok(update) => update,
        Err(message) => {
            return edit_category_form_view(&update_endpoint, &form_data, message).into_response();
        }
    };

    let result = lock_connection(&state.db_connection).and_then(|connection| {
        let updated_at = now_rfc3339()?;
        update_category(&category_id, update, &updated_at, &connection)
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::CategoryNotFound) => {
            edit_category_form_view(&update_endpoint, &form_data, "Category not found")
                .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            edit_category_form_view(&update_endpoint, &form_data, UNEXPECTED_ERROR_MESSAGE)
                .into_response()
        }
    }
}

fn edit_category_view(
    edit_endpoint: &str,
    update_endpoint: &str,
    form_data: &CategoryFormData,
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = edit_category_form_view(update_endpoint, form_data, error_message);

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Category", &[], &content)
}

fn edit_category_form_view(
    update_endpoint: &str,
    form_data: &CategoryFormData,
    error_message: &str,
) -> Markup {
    let current_status = form_data.status.as_deref().unwrap_or_default();

    html! {
        form
            hx-put=(update_endpoint)
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (category_form_fields(form_data))

            div
            {
                label for="status" class=(FORM_LABEL_STYLE) { "Status" }

                select id="status" name="status" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for status in CategoryStatus::ALL {
                        option
                            value=(status.as_str())
                            selected[current_status == status.as_str()]
                        {
                            (status.as_str())
                        }
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Category" }
        }
    }
}
