//! Profile kinds shared by the catalog, the resolver, and error reporting.

/// The three kinds of named profile a variable request refers to.
///
/// Each kind is stored in its own catalog section and is keyed by its own
/// name field (`tim_name`, `dom_name`, `use_name`).
///
/// # Examples
///
/// ```rust
/// use mass_requests::core::ProfileKind;
///
/// assert_eq!(ProfileKind::Time.name_field(), "tim_name");
/// assert_eq!(ProfileKind::Domain.to_string(), "domain profile");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// Temporal processing (sampling and meaning period)
    Time,
    /// Spatial and level selection
    Domain,
    /// Output usage, which ties a variable to a stream
    Usage,
}

impl ProfileKind {
    /// All profile kinds in catalog order.
    pub const ALL: [ProfileKind; 3] = [ProfileKind::Domain, ProfileKind::Usage, ProfileKind::Time];

    /// Attribute holding the profile's name.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            ProfileKind::Time => "tim_name",
            ProfileKind::Domain => "dom_name",
            ProfileKind::Usage => "use_name",
        }
    }

    /// Catalog section the profiles of this kind are loaded from.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            ProfileKind::Time => "time_profiles",
            ProfileKind::Domain => "domain_profiles",
            ProfileKind::Usage => "usage_profiles",
        }
    }

    /// Field of a variable request that names a profile of this kind.
    #[must_use]
    pub const fn request_field(self) -> &'static str {
        match self {
            ProfileKind::Time => "time",
            ProfileKind::Domain => "domain",
            ProfileKind::Usage => "usage",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileKind::Time => write!(f, "time profile"),
            ProfileKind::Domain => write!(f, "domain profile"),
            ProfileKind::Usage => write!(f, "usage profile"),
        }
    }
}
