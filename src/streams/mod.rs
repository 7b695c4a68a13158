//! Output streams: canonical names and grouping.
//!
//! Every stream in the catalog carries a filename template such as
//! `$DATAM/${RUNID}a.pd%C`. The class letter and id after the run-id
//! placeholder give the stream its archive name (`apd.pp`), and resolved
//! variables are grouped under that name so each stream is retrieved with a
//! single `moo select` per year.

mod groups;
mod name;

pub use groups::{StreamGroups, group_by_stream};
pub use name::StreamName;
