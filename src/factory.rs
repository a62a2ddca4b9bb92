//! Element factory: default-shaped elements for each element type.
//!
//! Every element in a form starts life here. The factory never fails; each
//! type gets a fresh id, its default label, `required = false`, and whatever
//! type-specific defaults it owns.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::element::{Body, ChoiceOption, ColumnElement, Columns, Element, ElementType, Field, FormElement, new_id};

pub const TEXT_PLACEHOLDER: &str = "Enter text...";
pub const NUMBER_PLACEHOLDER: &str = "Enter a number...";
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1598128558393-70ff21433be0?q=80&w=2089&auto=format&fit=crop";

/// Label used for type names outside the known enumeration.
pub const FALLBACK_LABEL: &str = "New Element";

/// Number of options a fresh choice element starts with.
const DEFAULT_OPTION_COUNT: usize = 3;

/// Default label shown for a freshly created element of `ty`.
#[must_use]
pub fn default_label(ty: ElementType) -> &'static str {
    match ty {
        ElementType::Header => "Section Header",
        ElementType::TextInput => "Text Input",
        ElementType::NumberInput => "Number Input",
        ElementType::DateInput => "Date",
        ElementType::MultipleChoice => "Multiple Choice Question",
        ElementType::CheckboxGroup => "Checkbox Group",
        ElementType::ImageInput => "Image Upload",
        ElementType::ImageDisplay => "Image",
        ElementType::Columns2 => "Two Columns",
        ElementType::Columns3 => "Three Columns",
        ElementType::Columns4 => "Four Columns",
    }
}

/// Default label for a raw type name, falling back to [`FALLBACK_LABEL`].
#[must_use]
pub fn default_label_for_name(name: &str) -> &'static str {
    name.parse::<ElementType>().map_or(FALLBACK_LABEL, default_label)
}

/// Build a new top-level element of `ty`. Containers start with no columns.
#[must_use]
pub fn create_element(ty: ElementType) -> FormElement {
    let body = match Columns::empty(ty) {
        Some(columns) => Body::Columns(columns),
        None => Body::Field(default_field(ty)),
    };
    Element { id: new_id(), label: default_label(ty).to_owned(), required: false, body }
}

/// Build a new column element of `ty`, for placing inside a container.
/// Returns `None` for container types, which cannot be nested.
#[must_use]
pub fn create_column_element(ty: ElementType) -> Option<ColumnElement> {
    if ty.is_container() {
        return None;
    }
    Some(Element { id: new_id(), label: default_label(ty).to_owned(), required: false, body: default_field(ty) })
}

fn default_field(ty: ElementType) -> Field {
    match ty {
        ElementType::TextInput => Field::TextInput { placeholder: Some(TEXT_PLACEHOLDER.to_owned()) },
        ElementType::NumberInput => Field::NumberInput { placeholder: Some(NUMBER_PLACEHOLDER.to_owned()) },
        ElementType::DateInput => Field::DateInput,
        // Single answer: only the first option is correct.
        ElementType::MultipleChoice => Field::MultipleChoice { options: default_options(1) },
        // Multi answer: the first two options are correct.
        ElementType::CheckboxGroup => Field::CheckboxGroup { options: default_options(2) },
        ElementType::ImageInput => Field::ImageInput,
        ElementType::ImageDisplay => Field::ImageDisplay { image_url: Some(DEFAULT_IMAGE_URL.to_owned()) },
        // Containers never reach here; callers branch on `Columns::empty` first.
        ElementType::Header | ElementType::Columns2 | ElementType::Columns3 | ElementType::Columns4 => Field::Header,
    }
}

/// `DEFAULT_OPTION_COUNT` options, the first `correct` of them marked correct.
fn default_options(correct: usize) -> Vec<ChoiceOption> {
    (1..=DEFAULT_OPTION_COUNT)
        .map(|n| ChoiceOption {
            id: new_id(),
            label: format!("Option {n}"),
            value: format!("option_{n}"),
            is_correct: n <= correct,
        })
        .collect()
}
