//! Form-builder core for the alumni platform.
//!
//! Holds the editable form model (an ordered list of elements, where column
//! containers hold exactly one level of child elements), the operations that
//! mutate it, the preview-time answer store, and the JSON submission export.
//! A small REST client loads saved forms and answers from the backend.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`element`] | Element types, bodies, choice options and sparse patches |
//! | [`factory`] | Default elements for each element type |
//! | [`tree`] | The element list and its id-based mutations |
//! | [`responses`] | Preview answers keyed by element id |
//! | [`session`] | Editing/Previewing session: selection, toasts, submit |
//! | [`export`] | Submission document, file naming and download sinks |
//! | [`draft`] | Draft files holding the element list between edits |
//! | [`api`] | REST client for saved forms and answers |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Crate error type |

pub mod api;
pub mod config;
pub mod draft;
pub mod element;
pub mod error;
pub mod export;
pub mod factory;
pub mod responses;
pub mod session;
pub mod tree;

pub use element::{ElementType, FormElement};
pub use error::FormError;
pub use session::FormSession;
