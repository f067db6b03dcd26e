//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the service:
//! - [`AppState`]: Shared state handed to every HTTP handler
//! - [`ImageTask`]: One file of a batch plus its operation
//! - [`OperationSpec`]: Convert, resize or compress parameters
//! - [`UploadedFile`] / [`TransformResult`]: Per-file input and output

mod state;
mod task;
mod types;

pub use state::AppState;
pub use task::ImageTask;
pub use types::{OperationKind, OperationSpec, TransformResult, UploadedFile};
