//! Catalog record types.
//!
//! Each record types the fields the resolver reads and keeps every other
//! attribute in `attributes`, so nothing from the site catalog is lost.

use super::codes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Temporal processing profile, keyed by `tim_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeProfile {
    /// Profile name, e.g. `TDAYM`
    pub tim_name: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Spatial/level selection profile, keyed by `dom_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    /// Profile name, e.g. `DIAG`
    pub dom_name: String,
    /// Level type code
    #[serde(default, deserialize_with = "codes::opt_int", skip_serializing_if = "Option::is_none")]
    pub iopl: Option<i64>,
    /// Level selection flag: 1 = contiguous range, 2 = explicit list
    #[serde(default, deserialize_with = "codes::opt_int", skip_serializing_if = "Option::is_none")]
    pub ilevs: Option<i64>,
    /// Comma-separated model level list
    #[serde(default, deserialize_with = "codes::opt_text", skip_serializing_if = "Option::is_none")]
    pub ilevlst: Option<String>,
    /// Comma-separated pressure level list
    #[serde(default, deserialize_with = "codes::opt_text", skip_serializing_if = "Option::is_none")]
    pub rlevlst: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Output usage profile, keyed by `use_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    /// Profile name, e.g. `UPD`
    pub use_name: String,
    /// Stream this usage writes to
    #[serde(default, deserialize_with = "codes::opt_text", skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Remaining attributes
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Output stream, keyed by `file_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Stream identifier referenced by usage profiles, e.g. `pp9`
    pub file_id: String,
    /// Filename template, e.g. `$DATAM/${RUNID}a.pd%C`
    pub filename_base: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// One archived (variable, profile) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StashRecord {
    /// Section code
    #[serde(deserialize_with = "codes::section_code")]
    pub isec: u16,
    /// Item code
    #[serde(deserialize_with = "codes::item_code")]
    pub item: u16,
    /// Usage profile name
    pub use_name: String,
    /// Time profile name
    pub tim_name: String,
    /// Domain profile name
    pub dom_name: String,
    /// Remaining attributes
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

/// Composite key identifying a stash record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StashKey<'a> {
    /// Section code
    pub section: u16,
    /// Item code
    pub item: u16,
    /// Usage profile name
    pub usage: &'a str,
    /// Time profile name
    pub time: &'a str,
    /// Domain profile name
    pub domain: &'a str,
}

impl StashRecord {
    /// Whether this record matches all five parts of `key`.
    #[must_use]
    pub fn matches(&self, key: &StashKey<'_>) -> bool {
        self.isec == key.section
            && self.item == key.item
            && self.use_name == key.usage
            && self.tim_name == key.time
            && self.dom_name == key.domain
    }
}
