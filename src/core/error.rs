//! Error handling for mass-requests
//!
//! This module provides the crate error type and user-friendly error reporting
//! for the command-line tool. The error system follows two principles:
//! 1. **Strongly-typed errors** so every fatal condition can be matched on
//! 2. **User-friendly messages** that name the offending identifier and say
//!    what to change
//!
//! # Architecture
//!
//! - [`MassError`] - every fatal condition the pipeline can hit
//! - [`ErrorContext`] - wraps an error with details and a suggestion for display
//!
//! # Error Categories
//!
//! - **Run parameters**: [`MassError::InvalidSuiteId`], [`MassError::InvalidYearRange`]
//! - **Input files**: [`MassError::InputFileNotFound`], [`MassError::CatalogParseError`],
//!   [`MassError::RequestParseError`]
//! - **Catalog consistency**: [`MassError::MissingCatalogSection`],
//!   [`MassError::DuplicateProfile`], [`MassError::DuplicateStream`],
//!   [`MassError::StreamNotFound`], [`MassError::TemplateMismatch`]
//! - **Resolution**: [`MassError::ProfileNotFound`], [`MassError::UnmappedTimeProfile`],
//!   [`MassError::UnsupportedLevelType`], [`MassError::UnsupportedLevelSelection`],
//!   [`MassError::MissingProfileAttribute`], [`MassError::InvalidStashCode`]
//!
//! A variable whose stash record is missing is *not* an error; the resolver
//! reports it as an [`UnresolvedVariable`](crate::resolver::UnresolvedVariable)
//! and carries on. [`MassError::UnresolvedVariables`] exists only for strict mode.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mass_requests::core::{MassError, user_friendly_error};
//!
//! let error = MassError::UnmappedTimeProfile { name: "T2HR".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // coloured message on stderr
//! ```

use crate::core::ProfileKind;
use crate::core::file_error::FileOperationError;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for mass-requests operations.
///
/// Every variant is fatal: it stops the run before any script is written.
#[derive(Error, Debug)]
pub enum MassError {
    /// Suite id does not look like `u-xxxxx`
    #[error("Invalid suite id '{value}'; format is u-xxxxx")]
    InvalidSuiteId {
        /// The rejected value
        value: String,
    },

    /// Year range is malformed or runs backwards
    #[error("Invalid years argument '{value}': {reason}")]
    InvalidYearRange {
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// An input document does not exist
    #[error("Cannot find file '{path}'")]
    InputFileNotFound {
        /// Path that was given on the command line
        path: String,
    },

    /// Catalog document is not valid JSON or has the wrong shape
    #[error("Invalid catalog document {file}")]
    CatalogParseError {
        /// Catalog path (or `<inline>` for in-memory documents)
        file: String,
        /// Parser message
        reason: String,
    },

    /// One of the five required catalog sections is absent
    #[error("Catalog is missing the required section '{section}'")]
    MissingCatalogSection {
        /// Name of the missing top-level key
        section: String,
    },

    /// Two profiles of the same kind share a name
    #[error("Duplicate {kind} '{name}' in catalog")]
    DuplicateProfile {
        /// Kind of the duplicated profile
        kind: ProfileKind,
        /// Shared name
        name: String,
    },

    /// Two streams share a `file_id`
    #[error("Duplicate stream file_id '{file_id}' in catalog")]
    DuplicateStream {
        /// Shared file id
        file_id: String,
    },

    /// Request document is not valid JSON once comments are stripped
    #[error("Invalid request document {file}")]
    RequestParseError {
        /// Request path (or `<inline>` for in-memory documents)
        file: String,
        /// Parser message
        reason: String,
    },

    /// A request names a profile the catalog does not define
    #[error("Cannot find {kind} '{name}' (requested by variable '{variable}')")]
    ProfileNotFound {
        /// Kind of profile that was looked up
        kind: ProfileKind,
        /// Name that was looked up
        name: String,
        /// Variable whose request referenced it
        variable: String,
        /// Closest name present in the catalog, if any is close enough
        closest: Option<String>,
    },

    /// A usage profile points at a `file_id` that no stream has
    #[error("Cannot find stream corresponding to usage profile '{usage}'")]
    StreamNotFound {
        /// Usage profile name
        usage: String,
        /// The usage profile's `file_id`, if it has one
        file_id: Option<String>,
    },

    /// A stream's `filename_base` does not follow the model's naming template
    #[error("Stream '{file_id}' has an unrecognised filename template '{template}'")]
    TemplateMismatch {
        /// Stream file id
        file_id: String,
        /// The offending template
        template: String,
    },

    /// Time profile has no entry in the lbtim/lbproc tables
    #[error("No lbtim/lbproc mapping for time profile '{name}'")]
    UnmappedTimeProfile {
        /// Time profile name
        name: String,
    },

    /// Domain profile uses a level type the archive query cannot express
    #[error("Unsupported level type {code} in domain profile '{domain}'")]
    UnsupportedLevelType {
        /// Domain profile name
        domain: String,
        /// Its `iopl` code
        code: i64,
    },

    /// Domain profile uses an `ilevs` flag other than range or list
    #[error("Unsupported level selection {ilevs} in domain profile '{domain}'")]
    UnsupportedLevelSelection {
        /// Domain profile name
        domain: String,
        /// Its `ilevs` code
        ilevs: i64,
    },

    /// A profile lacks an attribute the encoding needs
    #[error("{kind} '{profile}' has no usable '{attribute}' attribute")]
    MissingProfileAttribute {
        /// Kind of profile
        kind: ProfileKind,
        /// Profile name
        profile: String,
        /// Missing or malformed attribute
        attribute: String,
    },

    /// Section code outside 0-99 or item code outside 0-999
    #[error("Invalid stash code '{value}'")]
    InvalidStashCode {
        /// The rejected value
        value: String,
    },

    /// Strict mode: some variables could not be found in the stash inventory
    #[error("{count} variable(s) could not be resolved: {names}")]
    UnresolvedVariables {
        /// Number of unresolved variables
        count: usize,
        /// Comma-separated variable names
        names: String,
    },

    /// Generic error for other cases
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Pairs a [`MassError`] with optional details (what happened) and an optional
/// suggestion (what to do about it).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MassError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: MassError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Walks the error chain looking for a [`MassError`] or a
/// [`FileOperationError`]; anything else is shown with its full chain as
/// details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let mut current: &dyn std::error::Error = error.as_ref();
    loop {
        if let Some(mass_error) = current.downcast_ref::<MassError>() {
            return create_error_context(mass_error);
        }

        if let Some(file_error) = current.downcast_ref::<FileOperationError>() {
            let path = file_error.file_path.display().to_string();
            return match file_error.source.kind() {
                std::io::ErrorKind::NotFound => {
                    ErrorContext::new(MassError::InputFileNotFound {
                        path,
                    })
                    .with_suggestion("Check that the path is spelled correctly and the file exists")
                    .with_details(file_error.user_message())
                }
                _ => ErrorContext::new(MassError::Other {
                    message: format!("Failed {} '{}'", file_error.operation, path),
                })
                .with_details(file_error.user_message()),
            };
        }

        match current.source() {
            Some(source) => current = source,
            None => break,
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let ctx = ErrorContext::new(MassError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() { ctx } else { ctx.with_details(chain.join(": ")) }
}

fn create_error_context(error: &MassError) -> ErrorContext {
    match error {
        MassError::InvalidSuiteId { value } => ErrorContext::new(MassError::InvalidSuiteId {
            value: value.clone(),
        })
        .with_suggestion("Pass the suite id as 'u-' followed by five lowercase letters or digits, e.g. u-ab123"),
        MassError::InvalidYearRange { value, reason } => {
            ErrorContext::new(MassError::InvalidYearRange {
                value: value.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Pass the years as an inclusive range yyyy:yyyy, e.g. 1950:1952")
        }
        MassError::InputFileNotFound { path } => ErrorContext::new(MassError::InputFileNotFound {
            path: path.clone(),
        })
        .with_suggestion("Check that the path is spelled correctly and the file exists"),
        MassError::CatalogParseError { file, reason } => {
            ErrorContext::new(MassError::CatalogParseError {
                file: file.clone(),
                reason: reason.clone(),
            })
            .with_details(reason.clone())
            .with_suggestion("The catalog must be strict JSON; comments are only allowed in the request document")
        }
        MassError::MissingCatalogSection { section } => {
            ErrorContext::new(MassError::MissingCatalogSection {
                section: section.clone(),
            })
            .with_details(
                "A catalog needs domain_profiles, usage_profiles, time_profiles, streams and stash_records",
            )
            .with_suggestion(format!("Add a '{section}' array to the catalog document"))
        }
        MassError::DuplicateProfile { kind, name } => {
            ErrorContext::new(MassError::DuplicateProfile {
                kind: *kind,
                name: name.clone(),
            })
            .with_suggestion(format!(
                "Rename or remove one of the '{name}' entries in {}",
                kind.section()
            ))
        }
        MassError::DuplicateStream { file_id } => ErrorContext::new(MassError::DuplicateStream {
            file_id: file_id.clone(),
        })
        .with_suggestion("Each stream in the catalog needs a distinct file_id"),
        MassError::RequestParseError { file, reason } => {
            ErrorContext::new(MassError::RequestParseError {
                file: file.clone(),
                reason: reason.clone(),
            })
            .with_details(reason.clone())
            .with_suggestion(
                "Check the request list for missing commas or brackets; '#' and '//' comments are allowed at line ends",
            )
        }
        MassError::ProfileNotFound {
            kind,
            name,
            variable,
            closest,
        } => {
            let ctx = ErrorContext::new(MassError::ProfileNotFound {
                kind: *kind,
                name: name.clone(),
                variable: variable.clone(),
                closest: closest.clone(),
            })
            .with_details(format!(
                "The request's '{}' field must match a {} in the catalog's {} section",
                kind.request_field(),
                kind.name_field(),
                kind.section()
            ));
            match closest {
                Some(candidate) => ctx.with_suggestion(format!("Did you mean '{candidate}'?")),
                None => ctx.with_suggestion(format!(
                    "Add a {kind} named '{name}' to the catalog or fix the request"
                )),
            }
        }
        MassError::StreamNotFound { usage, file_id } => {
            let ctx = ErrorContext::new(MassError::StreamNotFound {
                usage: usage.clone(),
                file_id: file_id.clone(),
            });
            match file_id {
                Some(id) => ctx
                    .with_details(format!("No stream in the catalog has file_id '{id}'"))
                    .with_suggestion("Add the stream to the catalog or fix the usage profile's file_id"),
                None => ctx
                    .with_details("The usage profile has no file_id attribute")
                    .with_suggestion("Give the usage profile a file_id naming one of the catalog's streams"),
            }
        }
        MassError::TemplateMismatch { file_id, template } => {
            ErrorContext::new(MassError::TemplateMismatch {
                file_id: file_id.clone(),
                template: template.clone(),
            })
            .with_details("Expected a filename_base like '$DATAM/${RUNID}a.pd%C'")
        }
        MassError::UnmappedTimeProfile { name } => {
            ErrorContext::new(MassError::UnmappedTimeProfile {
                name: name.clone(),
            })
            .with_details("Known time profiles: TDAYM, TMONMN (meaned); T1HR, T3HR, T6H, T30DAY (instantaneous)")
        }
        MassError::UnsupportedLevelType { domain, code } => {
            ErrorContext::new(MassError::UnsupportedLevelType {
                domain: domain.clone(),
                code: *code,
            })
            .with_details(
                "Supported iopl codes: 1 (rho), 2 (theta), 3 (pressure), 5 (single), 6 (deep soil)",
            )
        }
        MassError::UnsupportedLevelSelection { domain, ilevs } => {
            ErrorContext::new(MassError::UnsupportedLevelSelection {
                domain: domain.clone(),
                ilevs: *ilevs,
            })
            .with_details("ilevs must be 1 (contiguous range) or 2 (explicit list)")
        }
        MassError::MissingProfileAttribute {
            kind,
            profile,
            attribute,
        } => ErrorContext::new(MassError::MissingProfileAttribute {
            kind: *kind,
            profile: profile.clone(),
            attribute: attribute.clone(),
        })
        .with_suggestion(format!("Add '{attribute}' to {kind} '{profile}' in the catalog")),
        MassError::InvalidStashCode { value } => ErrorContext::new(MassError::InvalidStashCode {
            value: value.clone(),
        })
        .with_details("Sections run from 0 to 99 and items from 0 to 999, given as numbers or numeric strings"),
        MassError::UnresolvedVariables { count, names } => {
            ErrorContext::new(MassError::UnresolvedVariables {
                count: *count,
                names: names.clone(),
            })
            .with_suggestion("Drop --strict to skip them, or add the missing stash records to the catalog")
        }
        MassError::Other { message } => ErrorContext::new(MassError::Other {
            message: message.clone(),
        }),
    }
}
