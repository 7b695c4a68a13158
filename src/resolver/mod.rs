//! Variable resolution against the site catalog.
//!
//! For each [`VariableRequest`] the resolver looks up the three named
//! profiles, follows the usage profile to its output stream, checks that the
//! stash record exists, and computes the MASS query attributes.
//!
//! # Resolution order
//!
//! 1. Time, usage and domain profiles (missing profile is fatal)
//! 2. Stream from the usage profile's `file_id` (missing stream is fatal)
//! 3. Stash code parse (non-numeric code is fatal)
//! 4. Stash record lookup (missing record is *not* fatal)
//! 5. `lbtim`, `lbproc` and `lblev` encoding (unmapped values are fatal)
//! 6. Stream name from the stream's filename template
//!
//! A missing stash record means the variable was never archived under that
//! profile combination. That is a property of the request, not a broken
//! catalog, so it comes back as [`Resolution::Unresolved`] and the caller
//! decides whether to carry on.

pub mod encoding;


pub use encoding::{Encoding, LevelSelector, StashCode, TimeMeaning};

use crate::catalog::{Catalog, StashKey, Stream};
use crate::core::{MassError, ProfileKind};
use crate::requests::VariableRequest;
use crate::streams::StreamName;
use std::fmt;
use tracing::debug;

/// A variable with everything needed to emit its query block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    /// Variable name from the request
    pub name: String,
    /// `file_id` of the stream the variable is archived in
    pub file_id: String,
    /// Canonical stream name
    pub stream: StreamName,
    /// Query attributes
    pub encoding: Encoding,
}

/// A variable with no matching stash record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedVariable {
    /// Variable name from the request
    pub name: String,
}

impl fmt::Display for UnresolvedVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unable to find variable '{}'", self.name)
    }
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The variable is archived and fully encoded
    Resolved(ResolvedVariable),
    /// The variable has no stash record for its profile combination
    Unresolved(UnresolvedVariable),
}

/// Resolves requests against a loaded [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub struct VariableResolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> VariableResolver<'a> {
    /// Create a resolver over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
        }
    }

    /// Resolve one request.
    ///
    /// # Errors
    ///
    /// - [`MassError::ProfileNotFound`] for an unknown time, usage or domain profile
    /// - [`MassError::StreamNotFound`] when the usage profile has no stream
    /// - [`MassError::InvalidStashCode`] for a non-numeric section or item
    /// - [`MassError::UnmappedTimeProfile`], [`MassError::UnsupportedLevelType`],
    ///   [`MassError::UnsupportedLevelSelection`] and
    ///   [`MassError::MissingProfileAttribute`] from encoding
    /// - [`MassError::TemplateMismatch`] for an unrecognised stream template
    pub fn resolve(&self, request: &VariableRequest) -> Result<Resolution, MassError> {
        let time = self
            .catalog
            .find_time_profile(&request.time)
            .ok_or_else(|| self.profile_not_found(ProfileKind::Time, &request.time, request))?;
        let usage = self
            .catalog
            .find_usage_profile(&request.usage)
            .ok_or_else(|| self.profile_not_found(ProfileKind::Usage, &request.usage, request))?;
        let domain = self
            .catalog
            .find_domain_profile(&request.domain)
            .ok_or_else(|| self.profile_not_found(ProfileKind::Domain, &request.domain, request))?;

        let stream = self.stream_for(&usage.use_name, usage.file_id.as_deref())?;
        let stash = StashCode::parse(&request.section, &request.item)?;

        let key = StashKey {
            section: stash.section,
            item: stash.item,
            usage: &usage.use_name,
            time: &time.tim_name,
            domain: &domain.dom_name,
        };
        if self.catalog.find_stash_record(&key).is_none() {
            debug!(
                "No stash record for '{}' ({} with {}/{}/{})",
                request.name, stash, usage.use_name, time.tim_name, domain.dom_name
            );
            return Ok(Resolution::Unresolved(UnresolvedVariable {
                name: request.name.clone(),
            }));
        }

        let encoding = Encoding {
            stash,
            lbtim: encoding::lbtim(time)?,
            lblev: encoding::lblev(domain)?,
            lbproc: encoding::lbproc(time)?,
        };
        let name = StreamName::from_template(&stream.file_id, &stream.filename_base)?;

        debug!("Resolved '{}' to stream {} (stash {})", request.name, name, stash);
        Ok(Resolution::Resolved(ResolvedVariable {
            name: request.name.clone(),
            file_id: stream.file_id.clone(),
            stream: name,
            encoding,
        }))
    }

    fn stream_for(&self, usage: &str, file_id: Option<&str>) -> Result<&'a Stream, MassError> {
        file_id.and_then(|id| self.catalog.find_stream(id)).ok_or_else(|| {
            MassError::StreamNotFound {
                usage: usage.to_string(),
                file_id: file_id.map(str::to_string),
            }
        })
    }

    fn profile_not_found(&self, kind: ProfileKind, name: &str, request: &VariableRequest) -> MassError {
        MassError::ProfileNotFound {
            kind,
            name: name.to_string(),
            variable: request.name.clone(),
            closest: self.catalog.closest_profile_name(kind, name),
        }
    }
}
