//! mass-requests - MASS retrieval script generator
//!
//! Turns a site catalog of model output profiles and an analyst's variable
//! request list into a shell script of `moo select` retrievals, one per
//! output stream and year.
//!
//! # Architecture Overview
//!
//! Data flows strictly downward:
//!
//! ```text
//! request document ──► requests::strip_comments ──► requests::parse_requests
//!                                                          │
//! catalog document ──► catalog::Catalog ──► resolver::VariableResolver
//!                                                          │
//!                                           streams::group_by_stream
//!                                                          │
//!                                           emitter::ScriptEmitter ──► script
//! ```
//!
//! [`pipeline::generate`] runs the whole chain over loaded documents and is
//! what the CLI calls.
//!
//! # Core Modules
//!
//! - [`catalog`] - Profiles, streams and stash records, with lookups
//! - [`requests`] - Comment-tolerant request list parsing
//! - [`resolver`] - Profile resolution and `stash`/`lbtim`/`lblev`/`lbproc` encoding
//! - [`streams`] - Stream names from filename templates, grouping by stream
//! - [`emitter`] - Script text for every year and stream
//! - [`pipeline`] - Resolve, group and emit in one call
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and file helpers
//! - [`params`] - Suite id and year range parsing
//! - [`constants`] - Archive command and encoding constants
//!
//! # Example
//!
//! ```rust,no_run
//! use mass_requests::catalog::Catalog;
//! use mass_requests::pipeline::{GenerateOptions, generate};
//! use mass_requests::requests::parse_requests;
//!
//! # fn main() -> anyhow::Result<()> {
//! let catalog = Catalog::parse(&std::fs::read_to_string("conf/stash.json")?, "conf/stash.json")?;
//! let requests = parse_requests(&std::fs::read_to_string("requests.json")?, "requests.json")?;
//! let options = GenerateOptions {
//!     suite: "u-ab123".parse()?,
//!     years: "1950:1952".parse()?,
//!     strict: false,
//! };
//!
//! let script = generate(&catalog, &requests, &options)?;
//! print!("{}", script.render());
//! for variable in &script.unresolved {
//!     eprintln!("warning: {variable}");
//! }
//! # Ok(())
//! # }
//! ```

// Core functionality
pub mod catalog;
pub mod cli;
pub mod core;
pub mod resolver;

// Script generation
pub mod emitter;
pub mod pipeline;
pub mod requests;
pub mod streams;

// Supporting modules
pub mod constants;
pub mod params;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
