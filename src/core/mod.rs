//! Core types and error handling for mass-requests.
//!
//! - [`error`] - the crate error type [`MassError`] and user-facing [`ErrorContext`]
//! - [`file_error`] - file operations that carry their own context
//! - [`ProfileKind`] - the three profile kinds a request refers to

pub mod error;
pub mod file_error;
mod profile;

pub use error::{ErrorContext, MassError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileOps, FileResultExt};
pub use profile::ProfileKind;
