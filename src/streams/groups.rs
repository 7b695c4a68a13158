//! Grouping of resolved variables by output stream.

use super::StreamName;
use crate::resolver::ResolvedVariable;
use indexmap::IndexMap;

/// Resolved variables keyed by stream, in first-seen stream order.
///
/// Within a stream, variables keep their request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamGroups {
    groups: IndexMap<StreamName, Vec<ResolvedVariable>>,
}

impl StreamGroups {
    /// Iterate over streams and their variables in grouping order.
    pub fn iter(&self) -> impl Iterator<Item = (&StreamName, &[ResolvedVariable])> {
        self.groups.iter().map(|(name, variables)| (name, variables.as_slice()))
    }

    /// Streams in grouping order.
    pub fn streams(&self) -> impl Iterator<Item = &StreamName> {
        self.groups.keys()
    }

    /// Number of distinct streams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when no variable was grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of variables across all streams.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Group resolved variables by their stream name.
pub fn group_by_stream(variables: impl IntoIterator<Item = ResolvedVariable>) -> StreamGroups {
    let mut groups: IndexMap<StreamName, Vec<ResolvedVariable>> = IndexMap::new();
    for variable in variables {
        groups.entry(variable.stream.clone()).or_default().push(variable);
    }
    StreamGroups {
        groups,
    }
}
