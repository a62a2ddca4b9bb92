//! Error taxonomy for the fallible edges of the crate.
//!
//! Tree and session operations never fail: an id that matches nothing is a
//! no-op. Errors only come from parsing, files, configuration and HTTP.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A type name did not match any known element type.
    #[error("unknown element type: {0}")]
    UnknownElementType(String),

    /// A draft or export file could not be read or written.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the backend failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success HTTP status.
    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    /// A header value (bearer token) contained invalid characters.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A list index supplied by a caller is outside the element list.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
}

impl FormError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
