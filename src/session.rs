//! Form-builder session: the editing screen's state and its controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! A `FormSession` is created when a form editor opens and dropped when it
//! closes. Hosts hold it by value and lend it to whichever widgets need it;
//! there is no global instance. It owns the element tree, the selection, the
//! Editing/Previewing mode, and the preview-time response store.
//!
//! User-facing acknowledgments (the "toasts" of a UI) go to a [`Notifier`]
//! supplied at construction. Exports go to a [`Downloader`] supplied per call.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::{Map, Value};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use crate::element::{ElementId, ElementPatch, ElementType, FormElement};
use crate::error::FormError;
use crate::export::{self, Downloader, ExportDocument};
use crate::responses::ResponseStore;
use crate::tree::{ElementRef, FormTree};

pub const MOVED_UP: &str = "Element moved up";
pub const MOVED_DOWN: &str = "Element moved down";
pub const PREVIEW_ENTERED: &str = "Entered preview mode. Fill the form to test it.";
pub const PREVIEW_EXITED: &str = "Exited preview mode";
pub const SUBMIT_DOWNLOADED: &str = "Form data downloaded successfully";

/// Fire-and-forget sink for short user-facing messages.
pub trait Notifier {
    fn notify(&self, description: &str);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, description: &str) {
        info!(target: "formbuilder::toast", "{description}");
    }
}

/// Whether the form is being edited or filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Editing,
    Previewing,
}

/// State of one form-editing screen.
#[derive(Debug)]
pub struct FormSession<N = TracingNotifier> {
    form_id: Option<String>,
    tree: FormTree,
    selected: Option<ElementId>,
    mode: Mode,
    answer_validation: bool,
    responses: ResponseStore,
    notifier: N,
}

impl FormSession<TracingNotifier> {
    /// Open a session for `form_id` (if the editor was routed to a saved
    /// form) that reports through `tracing`.
    #[must_use]
    pub fn new(form_id: Option<String>) -> Self {
        Self::with_notifier(form_id, TracingNotifier)
    }
}

impl<N: Notifier> FormSession<N> {
    #[must_use]
    pub fn with_notifier(form_id: Option<String>, notifier: N) -> Self {
        Self {
            form_id,
            tree: FormTree::new(),
            selected: None,
            mode: Mode::Editing,
            answer_validation: false,
            responses: ResponseStore::new(),
            notifier,
        }
    }

    // --- Queries ---

    /// Identifier of the saved form this session was opened for, if any.
    #[must_use]
    pub fn form_id(&self) -> Option<&str> {
        self.form_id.as_deref()
    }

    #[must_use]
    pub fn elements(&self) -> &[FormElement] {
        self.tree.elements()
    }

    #[must_use]
    pub fn tree(&self) -> &FormTree {
        &self.tree
    }

    #[must_use]
    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected element, looked up in the current tree.
    #[must_use]
    pub fn selected_element(&self) -> Option<ElementRef<'_>> {
        self.tree.find(self.selected.as_deref()?)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_preview_mode(&self) -> bool {
        self.mode == Mode::Previewing
    }

    #[must_use]
    pub fn is_answer_validation(&self) -> bool {
        self.answer_validation
    }

    #[must_use]
    pub fn responses(&self) -> &ResponseStore {
        &self.responses
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<FormElement> {
        self.tree.into_elements()
    }

    // --- Tree edits ---

    /// Append a new element of `ty` and select it.
    pub fn add_element(&mut self, ty: ElementType) -> ElementId {
        let id = self.tree.add(ty);
        self.selected = Some(id.clone());
        id
    }

    /// Append a new column element of `ty` to the container `parent_id` and
    /// select it.
    pub fn add_column_element(&mut self, parent_id: &str, ty: ElementType) -> Option<ElementId> {
        let id = self.tree.add_column(parent_id, ty)?;
        self.selected = Some(id.clone());
        Some(id)
    }

    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        self.tree.update(id, patch)
    }

    /// Remove an element or column. Clears the selection if it pointed at `id`
    /// or at one of the columns removed with it. Responses recorded for the
    /// removed element are left in place.
    pub fn remove_element(&mut self, id: &str) -> bool {
        let drops_selection = self.selected.as_deref().is_some_and(|selected| {
            selected == id || self.tree.find(id).is_some_and(|found| found.keys().contains(&selected))
        });
        let removed = self.tree.remove(id);
        if drops_selection {
            debug!(%id, "selection cleared by remove");
            self.selected = None;
        }
        removed
    }

    /// Replace the element list wholesale, e.g. with a form loaded from the
    /// backend.
    pub fn setup_elements(&mut self, elements: Vec<FormElement>) {
        self.tree.setup(elements);
    }

    pub fn reorder_elements(&mut self, from: usize, to: usize) -> bool {
        self.tree.reorder(from, to)
    }

    /// Swap the top-level element at `index` with the one above it.
    /// Refused at the top of the list.
    pub fn move_element_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.tree.len() {
            debug!(index, "move up refused at boundary");
            return false;
        }
        self.tree.reorder(index, index - 1);
        self.notifier.notify(MOVED_UP);
        true
    }

    /// Swap the top-level element at `index` with the one below it.
    /// Refused at the bottom of the list.
    pub fn move_element_down(&mut self, index: usize) -> bool {
        if index >= self.tree.len().saturating_sub(1) {
            debug!(index, "move down refused at boundary");
            return false;
        }
        self.tree.reorder(index, index + 1);
        self.notifier.notify(MOVED_DOWN);
        true
    }

    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    /// Insert a re-keyed copy right after `id` and select the copy.
    pub fn duplicate_element(&mut self, id: &str) -> Option<ElementId> {
        let copy_id = self.tree.duplicate(id)?;
        self.selected = Some(copy_id.clone());
        Some(copy_id)
    }

    // --- Preview ---

    /// Toggle between Editing and Previewing. Entering preview always starts
    /// from an empty response map; `validate_answers` turns on answer
    /// validation when entering. Both directions clear the selection.
    pub fn toggle_preview(&mut self, validate_answers: bool) -> Mode {
        self.selected = None;
        self.mode = match self.mode {
            Mode::Editing => {
                self.responses.clear();
                if validate_answers {
                    self.answer_validation = true;
                }
                self.notifier.notify(PREVIEW_ENTERED);
                Mode::Previewing
            }
            Mode::Previewing => {
                self.notifier.notify(PREVIEW_EXITED);
                Mode::Editing
            }
        };
        debug!(mode = ?self.mode, answer_validation = self.answer_validation, "preview toggled");
        self.mode
    }

    /// Answer validation is never switched off by the session itself.
    pub fn set_answer_validation(&mut self, enabled: bool) {
        self.answer_validation = enabled;
    }

    /// Record an answer for `id`. The value is stored as given.
    pub fn update_response(&mut self, id: impl Into<String>, value: Value) {
        self.responses.set(id, value);
    }

    /// Record a batch of answers keyed by element id, e.g. a filled-in form
    /// read from a file. Existing answers for the same ids are replaced.
    pub fn record_responses(&mut self, answers: Map<String, Value>) {
        debug!(count = answers.len(), "responses recorded");
        self.responses.extend(answers);
    }

    // --- Export ---

    /// Render the elements and responses with today's (UTC) date and hand the
    /// document to `downloader`. Does not change the mode.
    ///
    /// # Errors
    ///
    /// Propagates rendering and delivery failures.
    pub fn submit(&self, downloader: &dyn Downloader) -> Result<ExportDocument, FormError> {
        self.submit_dated(OffsetDateTime::now_utc().date(), downloader)
    }

    /// [`submit`](Self::submit) with an explicit export date.
    ///
    /// # Errors
    ///
    /// Propagates rendering and delivery failures.
    pub fn submit_dated(&self, date: Date, downloader: &dyn Downloader) -> Result<ExportDocument, FormError> {
        let document = export::render_submission(self.tree.elements(), &self.responses, date)?;
        downloader.download(&document)?;
        self.notifier.notify(SUBMIT_DOWNLOADED);
        Ok(document)
    }
}
