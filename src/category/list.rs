//! Category listing: the JSON endpoint and the dashboard table.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryStatus, get_all_categories},
    db::lock_connection,
    endpoints,
    html::{
        BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, edit_delete_action_links,
    },
    navigation::NavBar,
    timestamp::display_date,
};

/// The state needed for listing categories.
#[derive(Debug, Clone)]
pub struct ListCategoriesState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListCategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Return every category, active or not, with its ID.
pub async fn list_categories_endpoint(
    State(state): State<ListCategoriesState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(Json(categories))
}

/// Render the categories table.
pub async fn get_categories_page(
    State(state): State<ListCategoriesState>,
) -> Result<Response, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let categories = get_all_categories(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category: &Category| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, &category.id);
        let delete_url = endpoints::format_endpoint(endpoints::CATEGORY, &category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? Transactions keep the category name.",
            category.name
        );
        let status_style = match category.status {
            CategoryStatus::Active => BADGE_STYLE,
            CategoryStatus::Inactive => "text-xs text-gray-500",
        };

        html!(
            tr class=(TABLE_ROW_STYLE) data-category-id=(category.id)
            {
                td class=(TABLE_CELL_STYLE) { (category.name) }
                td class=(TABLE_CELL_STYLE) { (category.entry_type.as_str()) }
                td class=(TABLE_CELL_STYLE) { (category.description) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(status_style) { (category.status.as_str()) }
                }
                td class=(TABLE_CELL_STYLE) { (display_date(&category.date_created)) }
                td class=(TABLE_CELL_STYLE)
                {
                    @match &category.date_updated {
                        Some(date_updated) => { (display_date(date_updated)) }
                        None => { "-" }
                    }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(&edit_url, &delete_url, &confirm_message))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "All the Categories" }

                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                    {
                        "Create Category"
                    }
                }

                div class="dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Created" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Updated" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for category in categories {
                                (table_row(category))
                            }

                            @if categories.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="7" class="px-6 py-4 text-center"
                                    {
                                        "No categories yet."
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}
