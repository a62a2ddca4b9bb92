//! Tree mutator: the ordered element list and its one level of columns.
//!
//! DESIGN
//! ======
//! The tree is a plain `Vec<FormElement>`; container elements own their column
//! row directly, so there is no parent pointer to keep in sync. Lookups walk
//! the top level first and then each container's row, which is all the depth
//! the model allows. Every operation is total: an id that matches nothing
//! leaves the tree untouched and reports it through the return value.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use tracing::debug;

use crate::element::{ColumnElement, ElementBody, ElementId, ElementPatch, ElementType, FormElement};
use crate::factory;

/// Where an element lives in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Index in the top-level list.
    TopLevel(usize),
    /// Index `index` in the column row of the top-level container at `parent`.
    Column { parent: usize, index: usize },
}

/// Borrowed view of an element found by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementRef<'a> {
    TopLevel(&'a FormElement),
    Column(&'a ColumnElement),
}

impl ElementRef<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::TopLevel(element) => &element.id,
            Self::Column(column) => &column.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::TopLevel(element) => &element.label,
            Self::Column(column) => &column.label,
        }
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::TopLevel(element) => element.element_type(),
            Self::Column(column) => column.element_type(),
        }
    }

    /// Ids owned by the element, including the columns of a container.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::TopLevel(element) => element.keys(),
            Self::Column(column) => column.keys(),
        }
    }
}

/// Ordered list of top-level form elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormTree {
    elements: Vec<FormElement>,
}

impl FormTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The top-level elements in display order.
    #[must_use]
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<FormElement> {
        self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replace the whole list, e.g. when hydrating a saved form. No id
    /// validation is performed.
    pub fn setup(&mut self, elements: Vec<FormElement>) {
        debug!(count = elements.len(), "form tree replaced");
        self.elements = elements;
    }

    /// Find where `id` lives, searching the top level before any column row.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<Location> {
        if let Some(index) = self.elements.iter().position(|element| element.id == id) {
            return Some(Location::TopLevel(index));
        }
        self.elements.iter().enumerate().find_map(|(parent, element)| {
            let index = element.columns()?.iter().position(|column| column.id == id)?;
            Some(Location::Column { parent, index })
        })
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<ElementRef<'_>> {
        match self.locate(id)? {
            Location::TopLevel(index) => self.elements.get(index).map(ElementRef::TopLevel),
            Location::Column { parent, index } => {
                self.elements.get(parent)?.columns()?.get(index).map(ElementRef::Column)
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Ids of every element and column in the tree, in display order.
    #[must_use]
    pub fn element_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for element in &self.elements {
            ids.push(element.id.as_str());
            if let Some(columns) = element.columns() {
                ids.extend(columns.iter().map(|column| column.id.as_str()));
            }
        }
        ids
    }

    /// Append a factory-built element of `ty` and return its id.
    pub fn add(&mut self, ty: ElementType) -> ElementId {
        let element = factory::create_element(ty);
        let id = element.id.clone();
        debug!(%id, kind = %ty, "element added");
        self.elements.push(element);
        id
    }

    /// Append a factory-built column element of `ty` to the container
    /// `parent_id`. Returns `None` if the parent is not a top-level container
    /// or `ty` is itself a container.
    ///
    /// The container's width (`ElementType::column_count`) is a layout hint
    /// for renderers. Rows are not capped at it: extra columns wrap.
    pub fn add_column(&mut self, parent_id: &str, ty: ElementType) -> Option<ElementId> {
        let parent = self.elements.iter_mut().find(|element| element.id == parent_id)?;
        let row = parent.body.columns_mut()?;
        let column = factory::create_column_element(ty)?;
        let id = column.id.clone();
        debug!(%id, parent = parent_id, kind = %ty, "column element added");
        row.push(column);
        Some(id)
    }

    /// Merge `patch` into the element or column with `id`. Returns `false`
    /// when nothing matched.
    pub fn update(&mut self, id: &str, patch: &ElementPatch) -> bool {
        match self.locate(id) {
            Some(Location::TopLevel(index)) => {
                self.elements[index].apply_patch(patch);
            }
            Some(Location::Column { parent, index }) => {
                let Some(column) = self.column_mut(parent, index) else {
                    return false;
                };
                column.apply_patch(patch);
            }
            None => {
                debug!(%id, "update skipped: no such element");
                return false;
            }
        }
        true
    }

    /// Remove the element or column with `id`. A column is removed only from
    /// the row that owns it. Returns `false` when nothing matched.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.locate(id) {
            Some(Location::TopLevel(index)) => {
                self.elements.remove(index);
            }
            Some(Location::Column { parent, index }) => {
                let Some(row) = self.row_mut(parent) else {
                    return false;
                };
                row.remove(index);
            }
            None => {
                debug!(%id, "remove skipped: no such element");
                return false;
            }
        }
        debug!(%id, "element removed");
        true
    }

    /// Move the top-level element at `from` to `to`, shifting the elements in
    /// between. A `to` past the end moves the element to the end. Returns
    /// `false` if `from` is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.elements.len() {
            debug!(from, len = self.elements.len(), "reorder skipped: index out of range");
            return false;
        }
        let element = self.elements.remove(from);
        let to = to.min(self.elements.len());
        self.elements.insert(to, element);
        debug!(from, to, "element reordered");
        true
    }

    /// Insert a re-keyed deep copy of `id` right after the original, in the
    /// same list. Returns the copy's id.
    pub fn duplicate(&mut self, id: &str) -> Option<ElementId> {
        let copy_id = match self.locate(id)? {
            Location::TopLevel(index) => {
                let copy = self.elements[index].duplicate();
                let copy_id = copy.id.clone();
                self.elements.insert(index + 1, copy);
                copy_id
            }
            Location::Column { parent, index } => {
                let row = self.row_mut(parent)?;
                let copy = row[index].duplicate();
                let copy_id = copy.id.clone();
                row.insert(index + 1, copy);
                copy_id
            }
        };
        debug!(%id, copy = %copy_id, "element duplicated");
        Some(copy_id)
    }

    fn row_mut(&mut self, parent: usize) -> Option<&mut Vec<ColumnElement>> {
        self.elements.get_mut(parent)?.body.columns_mut()
    }

    fn column_mut(&mut self, parent: usize, index: usize) -> Option<&mut ColumnElement> {
        self.row_mut(parent)?.get_mut(index)
    }
}

impl From<Vec<FormElement>> for FormTree {
    fn from(elements: Vec<FormElement>) -> Self {
        Self { elements }
    }
}
