//! End-to-end script generation.
//!
//! [`generate`] runs the whole pipeline over an already-loaded catalog and
//! request list: resolve every request, group the resolved variables by
//! stream, then emit the script. Any fatal error stops the run before a
//! single line is produced; unresolved variables are collected and returned
//! beside the script.

use crate::catalog::Catalog;
use crate::core::MassError;
use crate::emitter::{ScriptEmitter, render_lines};
use crate::params::{SuiteId, YearRange};
use crate::requests::VariableRequest;
use crate::resolver::{Resolution, UnresolvedVariable, VariableResolver};
use crate::streams::group_by_stream;
use tracing::info;

/// Run parameters for [`generate`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Suite whose archive is queried
    pub suite: SuiteId,
    /// Years to retrieve
    pub years: YearRange,
    /// Fail when any variable is unresolved
    pub strict: bool,
}

/// A generated retrieval script and the variables left out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Script lines, without trailing newlines
    pub lines: Vec<String>,
    /// Requests with no stash record, in request order
    pub unresolved: Vec<UnresolvedVariable>,
}

impl GeneratedScript {
    /// The script as one newline-terminated string.
    #[must_use]
    pub fn render(&self) -> String {
        render_lines(&self.lines)
    }
}

/// Generate the retrieval script for `requests`.
///
/// # Errors
///
/// Any fatal resolution error (see [`VariableResolver::resolve`]), and
/// [`MassError::UnresolvedVariables`] in strict mode.
pub fn generate(
    catalog: &Catalog,
    requests: &[VariableRequest],
    options: &GenerateOptions,
) -> Result<GeneratedScript, MassError> {
    let resolver = VariableResolver::new(catalog);
    let mut resolved = Vec::with_capacity(requests.len());
    let mut unresolved = Vec::new();

    for request in requests {
        match resolver.resolve(request)? {
            Resolution::Resolved(variable) => resolved.push(variable),
            Resolution::Unresolved(variable) => unresolved.push(variable),
        }
    }

    if options.strict && !unresolved.is_empty() {
        return Err(MassError::UnresolvedVariables {
            count: unresolved.len(),
            names: unresolved.iter().map(|v| v.name.as_str()).collect::<Vec<_>>().join(", "),
        });
    }

    let groups = group_by_stream(resolved);
    let lines = ScriptEmitter::new(&options.suite, options.years).emit(&groups);

    info!(
        "Generated {} stream block(s) for {} variable(s) over {} year(s); {} unresolved",
        groups.len() * options.years.len(),
        groups.variable_count(),
        options.years.len(),
        unresolved.len()
    );
    Ok(GeneratedScript {
        lines,
        unresolved,
    })
}
