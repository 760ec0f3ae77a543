//! Category creation: the JSON endpoint and the dashboard page and form.

use std::sync::{Arc, Mutex};

use axum::{
    Form, Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{NewCategory, db::create_category, domain::CategoryFormData},
    db::{WriteResult, lock_connection},
    endpoints,
    entry_type::EntryType,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        UNEXPECTED_ERROR_MESSAGE, base,
    },
    navigation::NavBar,
    timestamp::now_rfc3339,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create an active category and return the store's write result.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Json(new_category): Json<NewCategory>,
) -> Result<Json<WriteResult>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let created_at = now_rfc3339()?;

    let result = create_category(&new_category, &created_at, &connection)
        .inspect_err(|error| tracing::error!("Could not create category: {error}"))?;

    tracing::info!("Created category {} ({})", result.id, new_category.name);

    Ok(Json(result))
}

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Handle the dashboard's category creation form.
pub async fn create_category_form_endpoint(
    State(state): State<CreateCategoryState>,
    Form(form_data): Form<CategoryFormData>,
) -> Response {
    let new_category = match form_data.validate() {
        Ok(new_category) => new_category,
        Err(message) => return new_category_form_view(&form_data, message).into_response(),
    };

    let result = lock_connection(&state.db_connection).and_then(|connection| {
        let created_at = now_rfc3339()?;
        create_category(&new_category, &created_at, &connection)
    });

    match result {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            new_category_form_view(&form_data, UNEXPECTED_ERROR_MESSAGE).into_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = new_category_form_view(&CategoryFormData::default(), "");

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &[], &content)
}

fn new_category_form_view(form_data: &CategoryFormData, error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_CATEGORY_FORM)
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            (category_form_fields(form_data))

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Category" }
        }
    }
}

/// The name, type and description inputs shared by the create and edit forms.
pub(super) fn category_form_fields(form_data: &CategoryFormData) -> Markup {
    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                id="name"
                type="text"
                name="name"
                placeholder="Category Name"
                value=(form_data.name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="type" class=(FORM_LABEL_STYLE) { "Type" }

            select id="type" name="type" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a Type" }

                @for entry_type in EntryType::ALL {
                    option
                        value=(entry_type.as_str())
                        selected[form_data.entry_type == entry_type.as_str()]
                    {
                        (entry_type.as_str())
                    }
                }
            }
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                id="description"
                type="text"
                name="description"
                placeholder="Description"
                value=(form_data.description)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod create_category_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        category::{
            CategoryStatus, NewCategory,
            create::CreateCategoryState,
            create_category_endpoint,
            create_category_form_endpoint,
            db::get_all_categories,
            domain::{CategoryFormData, MISSING_FIELDS_MESSAGE},
            get_new_category_page,
        },
        db::initialize,
        endpoints,
        entry_type::EntryType,
        test_utils::{
            assert_form_error_message, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_hx_redirect, assert_select_options, assert_valid_html,
            must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    fn get_state() -> CreateCategoryState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection).expect("Could not initialize database");

        CreateCategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn create_category_endpoint_stores_active_category() {
        let state = get_state();
        let new_category = NewCategory {
            name: "Salary".to_owned(),
            entry_type: EntryType::Income,
            description: "Monthly pay".to_owned(),
        };

        let Json(result) = create_category_endpoint(State(state.clone()), Json(new_category))
            .await
            .expect("Could not create category");

        let categories = get_all_categories(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, result.id);
        assert_eq!(categories[0].status, CategoryStatus::Active);
        assert!(!categories[0].date_created.is_empty());
        assert_eq!(categories[0].date_updated, None);
    }

    #[tokio::test]
    async fn new_category_page_has_form() {
        let response = get_new_category_page().await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_CATEGORY_FORM, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "description", "text");
        assert_select_options(&form, "type", &["", "Income", "Expense"]);
        assert_form_submit_button_with_text(&form, "Create Category");
    }

    #[tokio::test]
    async fn form_endpoint_redirects_to_categories() {
        let state = get_state();
        let form = CategoryFormData {
            name: "Rent".to_owned(),
            entry_type: "Expense".to_owned(),
            description: "Flat".to_owned(),
            status: None,
        };

        let response = create_category_form_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::CATEGORIES_VIEW);

        let categories = get_all_categories(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Rent");
        assert_eq!(categories[0].entry_type, EntryType::Expense);
    }

    #[tokio::test]
    async fn form_endpoint_with_missing_field_shows_message() {
        let state = get_state();
        let form = CategoryFormData {
            name: "Rent".to_owned(),
            entry_type: "Expense".to_owned(),
            description: "".to_owned(),
            status: None,
        };

        let response = create_category_form_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, MISSING_FIELDS_MESSAGE);

        let categories = get_all_categories(&state.db_connection.lock().unwrap()).unwrap();
        assert!(categories.is_empty());
    }
}
