use maud::{Markup, html};

use crate::{
    category::{Category, CategoryStatus},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::domain::TransactionFormData,
};

/// The date, description, category and amount inputs shared by the create
/// and edit forms. Only active categories are offered.
pub(super) fn transaction_form_fields(
    form_data: &TransactionFormData,
    categories: &[Category],
) -> Markup {
    let active_categories = categories
        .iter()
        .filter(|category| category.status == CategoryStatus::Active);

    html! {
        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(form_data.date)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=(form_data.description)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select id="category" name="category" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a Category" }

                @for category in active_categories {
                    option
                        value=(category.id)
                        selected[form_data.category == category.id]
                    {
                        (category.name) " (" (category.entry_type.as_str()) ")"
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.00"
                value=(form_data.amount)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The form error message, if any.
pub(super) fn form_error_message(error_message: &str) -> Markup {
    html! {
        @if !error_message.is_empty() {
            p class="text-red-600 dark:text-red-400"
            {
                (error_message)
            }
        }
    }
}
