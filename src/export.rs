//! Submission export: the `{elements, responses}` document and where it goes.
//!
//! The document is pretty-printed JSON named
//! `form-submission-<YYYY-MM-DD>.json`. Delivering it is delegated to a
//! [`Downloader`], so hosts decide whether it lands on disk, in a browser
//! download, or in memory.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::info;

use crate::element::FormElement;
use crate::error::FormError;
use crate::responses::ResponseStore;

/// File name prefix of exported submissions.
pub const FILE_PREFIX: &str = "form-submission-";

/// Owned form of the exported document, for reading exports back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub elements: Vec<FormElement>,
    pub responses: ResponseStore,
}

#[derive(Serialize)]
struct SubmissionRef<'a> {
    elements: &'a [FormElement],
    responses: &'a ResponseStore,
}

/// A rendered export ready to hand to a [`Downloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

/// `form-submission-2024-05-01.json` for 2024-05-01.
#[must_use]
pub fn submission_file_name(date: Date) -> String {
    format!("{FILE_PREFIX}{date}.json")
}

/// Render the current elements and responses as an export document.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn render_submission(
    elements: &[FormElement],
    responses: &ResponseStore,
    date: Date,
) -> Result<ExportDocument, FormError> {
    let contents = serde_json::to_string_pretty(&SubmissionRef { elements, responses })?;
    Ok(ExportDocument { file_name: submission_file_name(date), contents })
}

/// Parse a previously exported document.
///
/// # Errors
///
/// Returns `Json` if `contents` is not a submission document.
pub fn parse_submission(contents: &str) -> Result<Submission, FormError> {
    Ok(serde_json::from_str(contents)?)
}

/// Sink that delivers an export document to the user.
pub trait Downloader {
    /// Deliver `document`.
    ///
    /// # Errors
    ///
    /// Implementation-specific delivery failures.
    fn download(&self, document: &ExportDocument) -> Result<(), FormError>;
}

/// Writes export documents into a directory, creating it if needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path a document with `file_name` will be written to.
    #[must_use]
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl Downloader for DirectoryDownloader {
    fn download(&self, document: &ExportDocument) -> Result<(), FormError> {
        fs::create_dir_all(&self.dir).map_err(|e| FormError::io(&self.dir, e))?;
        let path = self.path_for(&document.file_name);
        fs::write(&path, &document.contents).map_err(|e| FormError::io(&path, e))?;
        info!(path = %path.display(), bytes = document.contents.len(), "submission exported");
        Ok(())
    }
}
