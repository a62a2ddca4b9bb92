//! Draft files: the element list persisted between edits.
//!
//! A draft is a pretty-printed JSON array of top-level elements, the same
//! shape as the `elements` key of an export.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::element::FormElement;
use crate::error::FormError;

/// Load the element list stored at `path`. A missing file is an empty form.
///
/// # Errors
///
/// Returns `Io` if the file exists but cannot be read, `Json` if it is not an
/// element array.
pub fn load_draft(path: &Path) -> Result<Vec<FormElement>, FormError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no draft yet; starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(FormError::io(path, e)),
    };
    let elements: Vec<FormElement> = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), count = elements.len(), "draft loaded");
    Ok(elements)
}

/// Write `elements` to `path`, replacing any previous draft.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written.
pub fn save_draft(path: &Path, elements: &[FormElement]) -> Result<(), FormError> {
    let contents = serde_json::to_string_pretty(elements)?;
    fs::write(path, contents).map_err(|e| FormError::io(path, e))?;
    debug!(path = %path.display(), count = elements.len(), "draft saved");
    Ok(())
}
