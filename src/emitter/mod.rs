//! Retrieval script emission.
//!
//! For every year, for every stream, the emitter writes a `moo select` query
//! file through a here-document and the command that uses it:
//!
//! ```text
//! cat > tmp_query << EOF
//! # tas
//! begin
//!   yr = 1999
//!   stash = 03236
//!   lbtim = 122
//!   lbproc = 128
//! end
//! EOF
//! moo select -C tmp_query :/crum/u-ab123/apd.pp/ u-ab123.apd.1999.pp
//!
//! ```
//!
//! Years are the outer loop and streams the inner one, so the script walks
//! the archive one year at a time. Output depends only on the grouped
//! variables, the years and the suite id.

use crate::constants::{ARCHIVE_COMMAND, ARCHIVE_ROOT, HEREDOC_DELIMITER, QUERY_FILE};
use crate::params::{SuiteId, YearRange};
use crate::resolver::ResolvedVariable;
use crate::streams::{StreamGroups, StreamName};

/// Writes retrieval scripts for one suite and year range.
#[derive(Debug, Clone)]
pub struct ScriptEmitter<'a> {
    suite: &'a SuiteId,
    years: YearRange,
}

impl<'a> ScriptEmitter<'a> {
    /// Create an emitter for `suite` over `years`.
    #[must_use]
    pub const fn new(suite: &'a SuiteId, years: YearRange) -> Self {
        Self {
            suite,
            years,
        }
    }

    /// Emit the script as individual lines, without trailing newlines.
    #[must_use]
    pub fn emit(&self, groups: &StreamGroups) -> Vec<String> {
        let mut lines = Vec::new();
        for year in self.years.iter() {
            for (stream, variables) in groups.iter() {
                self.emit_block(&mut lines, year, stream, variables);
            }
        }
        lines
    }

    /// Emit the script as one newline-terminated string.
    #[must_use]
    pub fn render(&self, groups: &StreamGroups) -> String {
        render_lines(&self.emit(groups))
    }

    fn emit_block(&self, lines: &mut Vec<String>, year: u16, stream: &StreamName, variables: &[ResolvedVariable]) {
        lines.push(format!("cat > {QUERY_FILE} << {HEREDOC_DELIMITER}"));
        for variable in variables {
            lines.push(format!("# {}", variable.name));
            lines.push("begin".to_string());
            lines.push(format!("  yr = {year}"));
            for (attribute, value) in variable.encoding.attributes() {
                lines.push(format!("  {attribute} = {value}"));
            }
            lines.push("end".to_string());
        }
        lines.push(HEREDOC_DELIMITER.to_string());
        lines.push(self.select_command(year, stream));
        lines.push(String::new());
    }

    /// `moo select` for one stream and year.
    fn select_command(&self, year: u16, stream: &StreamName) -> String {
        let suite = self.suite.as_str();
        let key = stream.key();
        let ext = stream.extension();
        format!(
            "{ARCHIVE_COMMAND} select -C {QUERY_FILE} :{ARCHIVE_ROOT}/{suite}/{key}.{ext}/ {suite}.{key}.{year}.{ext}"
        )
    }
}

/// Join script lines into a newline-terminated document.
#[must_use]
pub fn render_lines(lines: &[String]) -> String {
    let mut script = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        script.push_str(line);
        script.push('\n');
    }
    script
}
