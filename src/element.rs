//! Form element model: element types, their bodies, and sparse patches.
//!
//! A form is an ordered list of [`FormElement`]s. Container elements
//! (`columns-2`, `columns-3`, `columns-4`) own a row of [`ColumnElement`]s,
//! and a column element can never be a container itself: the nested body type
//! ([`Field`]) has no columns variants, so nesting stops at one level.
//!
//! On the wire every element is a flat JSON object discriminated by its
//! `type` key, e.g. `{"id": "...", "label": "Date", "required": false,
//! "type": "date-input"}`.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FormError;

/// Opaque unique identifier shared by elements, columns and choice options.
pub type ElementId = String;

/// Mint a fresh identifier.
#[must_use]
pub fn new_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// Suffix appended to the label of a duplicated element.
pub const COPY_SUFFIX: &str = " (Copy)";

/// The closed set of element types a form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "text-input")]
    TextInput,
    #[serde(rename = "number-input")]
    NumberInput,
    #[serde(rename = "date-input")]
    DateInput,
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "checkbox-group")]
    CheckboxGroup,
    #[serde(rename = "image-input")]
    ImageInput,
    #[serde(rename = "image-display")]
    ImageDisplay,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "columns-2")]
    Columns2,
    #[serde(rename = "columns-3")]
    Columns3,
    #[serde(rename = "columns-4")]
    Columns4,
}

impl ElementType {
    /// Every element type, in palette order.
    pub const ALL: [ElementType; 11] = [
        Self::TextInput,
        Self::NumberInput,
        Self::DateInput,
        Self::MultipleChoice,
        Self::CheckboxGroup,
        Self::ImageInput,
        Self::ImageDisplay,
        Self::Header,
        Self::Columns2,
        Self::Columns3,
        Self::Columns4,
    ];

    /// Wire name of the type (`"text-input"`, `"columns-2"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextInput => "text-input",
            Self::NumberInput => "number-input",
            Self::DateInput => "date-input",
            Self::MultipleChoice => "multiple-choice",
            Self::CheckboxGroup => "checkbox-group",
            Self::ImageInput => "image-input",
            Self::ImageDisplay => "image-display",
            Self::Header => "header",
            Self::Columns2 => "columns-2",
            Self::Columns3 => "columns-3",
            Self::Columns4 => "columns-4",
        }
    }

    /// Number of columns in the row for container types, `None` otherwise.
    #[must_use]
    pub fn column_count(self) -> Option<usize> {
        match self {
            Self::Columns2 => Some(2),
            Self::Columns3 => Some(3),
            Self::Columns4 => Some(4),
            _ => None,
        }
    }

    /// Returns `true` for the `columns-*` container types.
    #[must_use]
    pub fn is_container(self) -> bool {
        self.column_count().is_some()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| FormError::UnknownElementType(s.to_owned()))
    }
}

/// One selectable answer of a multiple-choice or checkbox-group element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: ElementId,
    pub label: String,
    pub value: String,
    /// Marks the option as a correct answer for answer validation.
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
}

/// Body of a non-container element. This is also the only body a column
/// element may have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Field {
    #[serde(rename = "text-input")]
    TextInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    #[serde(rename = "number-input")]
    NumberInput {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    #[serde(rename = "date-input")]
    DateInput,
    #[serde(rename = "multiple-choice")]
    MultipleChoice {
        #[serde(default)]
        options: Vec<ChoiceOption>,
    },
    #[serde(rename = "checkbox-group")]
    CheckboxGroup {
        #[serde(default)]
        options: Vec<ChoiceOption>,
    },
    #[serde(rename = "image-input")]
    ImageInput,
    #[serde(rename = "image-display")]
    ImageDisplay {
        #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
    },
    #[serde(rename = "header")]
    Header,
}

/// Body of a container element: a row of column elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Columns {
    #[serde(rename = "columns-2")]
    Two {
        #[serde(default)]
        columns: Vec<ColumnElement>,
    },
    #[serde(rename = "columns-3")]
    Three {
        #[serde(default)]
        columns: Vec<ColumnElement>,
    },
    #[serde(rename = "columns-4")]
    Four {
        #[serde(default)]
        columns: Vec<ColumnElement>,
    },
}

impl Columns {
    /// An empty container of the given width. `None` for non-container types.
    #[must_use]
    pub fn empty(ty: ElementType) -> Option<Self> {
        match ty {
            ElementType::Columns2 => Some(Self::Two { columns: Vec::new() }),
            ElementType::Columns3 => Some(Self::Three { columns: Vec::new() }),
            ElementType::Columns4 => Some(Self::Four { columns: Vec::new() }),
            _ => None,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnElement] {
        match self {
            Self::Two { columns } | Self::Three { columns } | Self::Four { columns } => columns.as_slice(),
        }
    }

    pub fn columns_mut(&mut self) -> &mut Vec<ColumnElement> {
        match self {
            Self::Two { columns } | Self::Three { columns } | Self::Four { columns } => columns,
        }
    }
}

/// Body of a top-level element: either a plain field or a column container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Columns(Columns),
    Field(Field),
}

/// Type-specific access shared by [`Field`] and [`Body`].
pub trait ElementBody {
    /// The element type this body encodes.
    fn element_type(&self) -> ElementType;

    /// Choice options, for multiple-choice and checkbox-group bodies.
    fn options(&self) -> Option<&[ChoiceOption]>;

    fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>>;

    /// Placeholder slot, for text and number inputs.
    fn placeholder_mut(&mut self) -> Option<&mut Option<String>>;

    /// Image URL slot, for image-display bodies.
    fn image_url_mut(&mut self) -> Option<&mut Option<String>>;

    /// Nested column elements, for container bodies.
    fn columns(&self) -> Option<&[ColumnElement]> {
        None
    }

    fn columns_mut(&mut self) -> Option<&mut Vec<ColumnElement>> {
        None
    }

    /// Give every option, column, and column option a fresh id.
    fn rekey(&mut self) {
        if let Some(options) = self.options_mut() {
            rekey_options(options);
        }
        if let Some(columns) = self.columns_mut() {
            for column in columns {
                column.id = new_id();
                column.body.rekey();
            }
        }
    }
}

fn rekey_options(options: &mut [ChoiceOption]) {
    for option in options {
        option.id = new_id();
    }
}

impl ElementBody for Field {
    fn element_type(&self) -> ElementType {
        match self {
            Self::TextInput { .. } => ElementType::TextInput,
            Self::NumberInput { .. } => ElementType::NumberInput,
            Self::DateInput => ElementType::DateInput,
            Self::MultipleChoice { .. } => ElementType::MultipleChoice,
            Self::CheckboxGroup { .. } => ElementType::CheckboxGroup,
            Self::ImageInput => ElementType::ImageInput,
            Self::ImageDisplay { .. } => ElementType::ImageDisplay,
            Self::Header => ElementType::Header,
        }
    }

    fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Self::MultipleChoice { options } | Self::CheckboxGroup { options } => Some(options.as_slice()),
            _ => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match self {
            Self::MultipleChoice { options } | Self::CheckboxGroup { options } => Some(options),
            _ => None,
        }
    }

    fn placeholder_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::TextInput { placeholder } | Self::NumberInput { placeholder } => Some(placeholder),
            _ => None,
        }
    }

    fn image_url_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::ImageDisplay { image_url } => Some(image_url),
            _ => None,
        }
    }
}

impl ElementBody for Body {
    fn element_type(&self) -> ElementType {
        match self {
            Self::Columns(Columns::Two { .. }) => ElementType::Columns2,
            Self::Columns(Columns::Three { .. }) => ElementType::Columns3,
            Self::Columns(Columns::Four { .. }) => ElementType::Columns4,
            Self::Field(field) => field.element_type(),
        }
    }

    fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            Self::Field(field) => field.options(),
            Self::Columns(_) => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<ChoiceOption>> {
        match self {
            Self::Field(field) => field.options_mut(),
            Self::Columns(_) => None,
        }
    }

    fn placeholder_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Field(field) => field.placeholder_mut(),
            Self::Columns(_) => None,
        }
    }

    fn image_url_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Field(field) => field.image_url_mut(),
            Self::Columns(_) => None,
        }
    }

    fn columns(&self) -> Option<&[ColumnElement]> {
        match self {
            Self::Columns(columns) => Some(columns.columns()),
            Self::Field(_) => None,
        }
    }

    fn columns_mut(&mut self) -> Option<&mut Vec<ColumnElement>> {
        match self {
            Self::Columns(columns) => Some(columns.columns_mut()),
            Self::Field(_) => None,
        }
    }
}

/// An element with its common fields; `body` carries the type tag and the
/// type-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element<B> {
    pub id: ElementId,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub body: B,
}

/// A node of the top-level element list.
pub type FormElement = Element<Body>;

/// A node inside a container's column row. Never a container itself.
pub type ColumnElement = Element<Field>;

impl<B: ElementBody> Element<B> {
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.body.element_type()
    }

    #[must_use]
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        self.body.options()
    }

    #[must_use]
    pub fn columns(&self) -> Option<&[ColumnElement]> {
        self.body.columns()
    }

    /// Merge a sparse patch into this element. Fields the element's type does
    /// not own are ignored. Returns `true` if any field was written.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let mut touched = false;
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
            touched = true;
        }
        if let Some(required) = patch.required {
            self.required = required;
            touched = true;
        }
        if let (Some(placeholder), Some(slot)) = (&patch.placeholder, self.body.placeholder_mut()) {
            *slot = Some(placeholder.clone());
            touched = true;
        }
        if let (Some(options), Some(slot)) = (&patch.options, self.body.options_mut()) {
            slot.clone_from(options);
            touched = true;
        }
        if let (Some(image_url), Some(slot)) = (&patch.image_url, self.body.image_url_mut()) {
            *slot = Some(image_url.clone());
            touched = true;
        }
        if let (Some(columns), Some(slot)) = (&patch.columns, self.body.columns_mut()) {
            slot.clone_from(columns);
            touched = true;
        }
        touched
    }

    /// Every identifier reachable from this element: its own id, its option
    /// ids, and each column's id and option ids.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = vec![self.id.as_str()];
        if let Some(options) = self.body.options() {
            keys.extend(options.iter().map(|option| option.id.as_str()));
        }
        if let Some(columns) = self.body.columns() {
            for column in columns {
                keys.extend(column.keys());
            }
        }
        keys
    }
}

impl<B: ElementBody + Clone> Element<B> {
    /// Deep copy with a fresh id, a `" (Copy)"` label suffix, and fresh ids on
    /// every option, column, and column option. Column labels are kept as-is.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = new_id();
        copy.label.push_str(COPY_SUFFIX);
        copy.body.rekey();
        copy
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    /// New label, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New required flag, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// New placeholder (text and number inputs only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Replacement option list (choice elements only). Options are only ever
    /// changed wholesale through this field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    /// New image URL (image-display only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Replacement column row (top-level containers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnElement>>,
}
