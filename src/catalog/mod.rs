//! Site catalog of profiles, streams, and archived stash records.
//!
//! The catalog is a JSON document with five required top-level arrays:
//!
//! ```json
//! {
//!   "domain_profiles": [{ "dom_name": "DIAG", "iopl": "5" }],
//!   "usage_profiles":  [{ "use_name": "UPD", "file_id": "pp9" }],
//!   "time_profiles":   [{ "tim_name": "TDAYM" }],
//!   "streams":         [{ "file_id": "pp9", "filename_base": "$DATAM/${RUNID}a.pd%C" }],
//!   "stash_records":   [{ "isec": "3", "item": "236",
//!                         "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DIAG" }]
//! }
//! ```
//!
//! Entries keep their document order. Profile names are unique within a kind
//! and stream `file_id`s are unique; both are checked at load time. The
//! catalog is read-only once loaded.

mod codes;
mod profiles;

#[cfg(test)]
mod catalog_tests;

pub(crate) use codes::parse_stash_code;
pub use profiles::{DomainProfile, StashKey, StashRecord, Stream, TimeProfile, UsageProfile};

use crate::constants::{CATALOG_SECTIONS, SIMILARITY_THRESHOLD_PERCENT};
use crate::core::{MassError, ProfileKind};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use strsim::levenshtein;
use tracing::debug;

/// In-memory catalog loaded from one document.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    domain_profiles: Vec<DomainProfile>,
    usage_profiles: Vec<UsageProfile>,
    time_profiles: Vec<TimeProfile>,
    streams: Vec<Stream>,
    stash_records: Vec<StashRecord>,
}

impl Catalog {
    /// Parse a catalog document.
    ///
    /// `origin` names the document in error messages (usually its path).
    ///
    /// # Errors
    ///
    /// - [`MassError::CatalogParseError`] for invalid JSON or malformed entries
    /// - [`MassError::MissingCatalogSection`] if any of the five sections is absent
    /// - [`MassError::DuplicateProfile`] / [`MassError::DuplicateStream`] for
    ///   repeated names
    pub fn parse(text: &str, origin: &str) -> Result<Self, MassError> {
        let parse_error = |reason: String| MassError::CatalogParseError {
            file: origin.to_string(),
            reason,
        };

        let document: Value = serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
        let Value::Object(mut sections) = document else {
            return Err(parse_error("top level must be a JSON object".to_string()));
        };

        if let Some(missing) = CATALOG_SECTIONS.iter().find(|s| !sections.contains_key(**s)) {
            return Err(MassError::MissingCatalogSection {
                section: (*missing).to_string(),
            });
        }

        let mut take = |section: &str| sections.remove(section).unwrap_or(Value::Null);
        let catalog = Self {
            domain_profiles: section_entries(take("domain_profiles"), "domain_profiles", origin)?,
            usage_profiles: section_entries(take("usage_profiles"), "usage_profiles", origin)?,
            time_profiles: section_entries(take("time_profiles"), "time_profiles", origin)?,
            streams: section_entries(take("streams"), "streams", origin)?,
            stash_records: section_entries(take("stash_records"), "stash_records", origin)?,
        };
        catalog.check_unique()?;

        debug!(
            "Loaded catalog {}: {} domain, {} usage, {} time profiles, {} streams, {} stash records",
            origin,
            catalog.domain_profiles.len(),
            catalog.usage_profiles.len(),
            catalog.time_profiles.len(),
            catalog.streams.len(),
            catalog.stash_records.len()
        );
        Ok(catalog)
    }

    fn check_unique(&self) -> Result<(), MassError> {
        check_unique_names(ProfileKind::Domain, self.domain_profiles.iter().map(|p| p.dom_name.as_str()))?;
        check_unique_names(ProfileKind::Usage, self.usage_profiles.iter().map(|p| p.use_name.as_str()))?;
        check_unique_names(ProfileKind::Time, self.time_profiles.iter().map(|p| p.tim_name.as_str()))?;

        let mut seen = HashSet::new();
        for stream in &self.streams {
            if !seen.insert(stream.file_id.as_str()) {
                return Err(MassError::DuplicateStream {
                    file_id: stream.file_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Time profile named `name`.
    #[must_use]
    pub fn find_time_profile(&self, name: &str) -> Option<&TimeProfile> {
        self.time_profiles.iter().find(|p| p.tim_name == name)
    }

    /// Domain profile named `name`.
    #[must_use]
    pub fn find_domain_profile(&self, name: &str) -> Option<&DomainProfile> {
        self.domain_profiles.iter().find(|p| p.dom_name == name)
    }

    /// Usage profile named `name`.
    #[must_use]
    pub fn find_usage_profile(&self, name: &str) -> Option<&UsageProfile> {
        self.usage_profiles.iter().find(|p| p.use_name == name)
    }

    /// Stream whose `file_id` is `file_id`.
    #[must_use]
    pub fn find_stream(&self, file_id: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.file_id == file_id)
    }

    /// First stash record matching every part of `key`.
    #[must_use]
    pub fn find_stash_record(&self, key: &StashKey<'_>) -> Option<&StashRecord> {
        self.stash_records.iter().find(|r| r.matches(key))
    }

    /// Names of all profiles of one kind, in document order.
    pub fn profile_names(&self, kind: ProfileKind) -> Vec<&str> {
        match kind {
            ProfileKind::Time => self.time_profiles.iter().map(|p| p.tim_name.as_str()).collect(),
            ProfileKind::Domain => self.domain_profiles.iter().map(|p| p.dom_name.as_str()).collect(),
            ProfileKind::Usage => self.usage_profiles.iter().map(|p| p.use_name.as_str()).collect(),
        }
    }

    /// Closest profile name to `name`, for "did you mean" suggestions.
    ///
    /// Only names within [`SIMILARITY_THRESHOLD_PERCENT`] of the requested
    /// name's length are offered.
    #[must_use]
    pub fn closest_profile_name(&self, kind: ProfileKind, name: &str) -> Option<String> {
        let limit = name.len() * SIMILARITY_THRESHOLD_PERCENT / 100;
        self.profile_names(kind)
            .into_iter()
            .map(|candidate| (candidate, levenshtein(name, candidate)))
            .filter(|(_, distance)| *distance <= limit)
            .min_by_key(|(_, distance)| *distance)
            .map(|(candidate, _)| candidate.to_string())
    }
}

fn section_entries<T: DeserializeOwned>(
    value: Value,
    section: &str,
    origin: &str,
) -> Result<Vec<T>, MassError> {
    serde_json::from_value(value).map_err(|e| MassError::CatalogParseError {
        file: origin.to_string(),
        reason: format!("{section}: {e}"),
    })
}

fn check_unique_names<'a>(
    kind: ProfileKind,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), MassError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(MassError::DuplicateProfile {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
