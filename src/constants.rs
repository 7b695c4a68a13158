//! Global constants used throughout the mass-requests codebase.
//!
//! This module holds the archive-facing strings and the fixed codes that
//! the emitted scripts depend on. Defining them centrally keeps the
//! script layout in one place and makes the magic numbers discoverable.

/// Command used to talk to the MASS archive.
pub const ARCHIVE_COMMAND: &str = "moo";

/// Root of the climate-run collection inside MASS.
///
/// Retrieval paths take the form `:/crum/<suite>/<stream>.<ext>/`.
pub const ARCHIVE_ROOT: &str = "/crum";

/// Name of the temporary query file written by each here-document block.
pub const QUERY_FILE: &str = "tmp_query";

/// Here-document delimiter used around each query block.
pub const HEREDOC_DELIMITER: &str = "EOF";

/// Extension of the archived stream files.
///
/// Every stream the model writes to MASS is stored as PP fields.
pub const STREAM_EXTENSION: &str = "pp";

/// Largest stash section code; sections are written with two digits.
pub const MAX_STASH_SECTION: u16 = 99;

/// Largest stash item code; items are written with three digits.
pub const MAX_STASH_ITEM: u16 = 999;

/// `lbtim` value for daily and monthly means.
pub const LBTIM_MEANED: u32 = 122;

/// `lbtim` value for sub-daily and instantaneous output.
pub const LBTIM_INSTANTANEOUS: u32 = 12;

/// `lbproc` value for meaned fields.
pub const LBPROC_MEANED: u32 = 128;

/// `lbproc` value for unprocessed (instantaneous) fields.
pub const LBPROC_INSTANTANEOUS: u32 = 0;

/// Top-level sections every catalog document must provide, in load order.
pub const CATALOG_SECTIONS: [&str; 5] =
    ["domain_profiles", "usage_profiles", "time_profiles", "streams", "stash_records"];

/// Maximum Levenshtein distance, as a percentage of the requested name,
/// for a catalog name to be offered as a suggestion.
pub const SIMILARITY_THRESHOLD_PERCENT: usize = 50;
