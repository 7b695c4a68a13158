//! MASS query attribute encoding.
//!
//! Turns catalog profiles into the PP-header attributes a `moo select` query
//! filters on:
//!
//! - `stash`: section and item code
//! - `lbtim`: time meaning, from the time profile
//! - `lbproc`: processing code, from the time profile
//! - `lblev`: level selection, from the domain profile (absent = all levels)
//!
//! Every table is an explicit function returning a `Result`, so an unmapped
//! name or code is reported instead of silently producing a wrong query.

use crate::catalog::{DomainProfile, TimeProfile, parse_stash_code};
use crate::constants::{
    LBPROC_INSTANTANEOUS, LBPROC_MEANED, LBTIM_INSTANTANEOUS, LBTIM_MEANED, MAX_STASH_ITEM, MAX_STASH_SECTION,
};
use crate::core::{MassError, ProfileKind};
use std::fmt;

/// A stash code written the way MASS expects it: two-digit section followed
/// by three-digit item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StashCode {
    /// Section code
    pub section: u16,
    /// Item code
    pub item: u16,
}

impl StashCode {
    /// Parse section and item codes as written in a request.
    ///
    /// # Errors
    ///
    /// [`MassError::InvalidStashCode`] when either code is not numeric, or
    /// the section is above 99 or the item above 999.
    pub fn parse(section: &str, item: &str) -> Result<Self, MassError> {
        let code = |text: &str, max: u16| {
            parse_stash_code(text, max).ok_or_else(|| MassError::InvalidStashCode {
                value: text.to_string(),
            })
        };
        Ok(Self {
            section: code(section, MAX_STASH_SECTION)?,
            item: code(item, MAX_STASH_ITEM)?,
        })
    }
}

impl fmt::Display for StashCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:03}", self.section, self.item)
    }
}

/// Whether a time profile produces meaned or instantaneous fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMeaning {
    /// Daily and monthly means
    Meaned,
    /// Sub-daily samples and other instantaneous output
    Instantaneous,
}

impl TimeMeaning {
    /// Look up the time meaning of a time profile by name.
    ///
    /// # Errors
    ///
    /// [`MassError::UnmappedTimeProfile`] for any profile not in the table.
    pub fn for_profile(name: &str) -> Result<Self, MassError> {
        match name {
            "TDAYM" | "TMONMN" => Ok(TimeMeaning::Meaned),
            "T1HR" | "T3HR" | "T6H" | "T30DAY" => Ok(TimeMeaning::Instantaneous),
            _ => Err(MassError::UnmappedTimeProfile {
                name: name.to_string(),
            }),
        }
    }

    /// `lbtim` code for this meaning.
    #[must_use]
    pub const fn lbtim(self) -> u32 {
        match self {
            TimeMeaning::Meaned => LBTIM_MEANED,
            TimeMeaning::Instantaneous => LBTIM_INSTANTANEOUS,
        }
    }

    /// `lbproc` code for this meaning.
    #[must_use]
    pub const fn lbproc(self) -> u32 {
        match self {
            TimeMeaning::Meaned => LBPROC_MEANED,
            TimeMeaning::Instantaneous => LBPROC_INSTANTANEOUS,
        }
    }
}

/// `lbtim` for a time profile.
pub fn lbtim(profile: &TimeProfile) -> Result<u32, MassError> {
    TimeMeaning::for_profile(&profile.tim_name).map(TimeMeaning::lbtim)
}

/// `lbproc` for a time profile.
pub fn lbproc(profile: &TimeProfile) -> Result<u32, MassError> {
    TimeMeaning::for_profile(&profile.tim_name).map(TimeMeaning::lbproc)
}

/// Vertical level type of a domain profile (its `iopl` code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelType {
    /// Model rho levels
    Rho,
    /// Model theta levels
    Theta,
    /// Pressure levels
    Pressure,
    /// Geometric height levels
    GeometricHeight,
    /// Single level
    Single,
    /// Deep soil levels
    DeepSoil,
    /// Potential temperature levels
    PotentialTemperature,
    /// Potential vorticity levels
    PotentialVorticity,
    /// Cloud threshold levels
    CloudThreshold,
}

impl LevelType {
    /// Map an `iopl` code to its level type.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(LevelType::Rho),
            2 => Some(LevelType::Theta),
            3 => Some(LevelType::Pressure),
            4 => Some(LevelType::GeometricHeight),
            5 => Some(LevelType::Single),
            6 => Some(LevelType::DeepSoil),
            7 => Some(LevelType::PotentialTemperature),
            8 => Some(LevelType::PotentialVorticity),
            9 => Some(LevelType::CloudThreshold),
            _ => None,
        }
    }
}

/// How a domain profile selects model levels (its `ilevs` code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelection {
    /// A contiguous range of levels
    Range,
    /// An explicit level list in `ilevlst`
    List,
}

impl LevelSelection {
    /// Map an `ilevs` code to its selection kind.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(LevelSelection::Range),
            2 => Some(LevelSelection::List),
            _ => None,
        }
    }
}

/// Value of the `lblev` query attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSelector {
    /// One level, written bare: `5`
    Single(String),
    /// Several levels, written as a tuple: `(5,10,15)`
    List(Vec<String>),
}

impl fmt::Display for LevelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSelector::Single(level) => f.write_str(level),
            LevelSelector::List(levels) => write!(f, "({})", levels.join(",")),
        }
    }
}

/// `lblev` for a domain profile; `None` means "no level filter".
///
/// # Errors
///
/// - [`MassError::UnsupportedLevelType`] for level types other than rho,
///   theta, pressure, single and deep soil
/// - [`MassError::UnsupportedLevelSelection`] for an `ilevs` other than 1 or 2
/// - [`MassError::MissingProfileAttribute`] when `iopl`, `ilevs` or
///   `ilevlst` is needed but absent
pub fn lblev(domain: &DomainProfile) -> Result<Option<LevelSelector>, MassError> {
    let code = domain.iopl.ok_or_else(|| missing_attribute(domain, "iopl"))?;
    let unsupported = || MassError::UnsupportedLevelType {
        domain: domain.dom_name.clone(),
        code,
    };

    match LevelType::from_code(code).ok_or_else(unsupported)? {
        LevelType::Single => Ok(None),
        LevelType::Rho | LevelType::Theta | LevelType::DeepSoil => model_levels(domain),
        // moo select cannot filter on float level lists; fetch every pressure level
        LevelType::Pressure => Ok(None),
        LevelType::GeometricHeight
        | LevelType::PotentialTemperature
        | LevelType::PotentialVorticity
        | LevelType::CloudThreshold => Err(unsupported()),
    }
}

fn model_levels(domain: &DomainProfile) -> Result<Option<LevelSelector>, MassError> {
    let ilevs = domain.ilevs.ok_or_else(|| missing_attribute(domain, "ilevs"))?;
    let selection = LevelSelection::from_code(ilevs).ok_or_else(|| {
        MassError::UnsupportedLevelSelection {
            domain: domain.dom_name.clone(),
            ilevs,
        }
    })?;

    match selection {
        // Whether MASS wants a sentinel for a level range is unconfirmed;
        // leave the query unfiltered until it is.
        LevelSelection::Range => Ok(None),
        LevelSelection::List => {
            let list = domain.ilevlst.as_deref().ok_or_else(|| missing_attribute(domain, "ilevlst"))?;
            let mut levels: Vec<String> = list.split(',').map(|l| l.trim().to_string()).collect();
            if levels.iter().any(String::is_empty) {
                return Err(missing_attribute(domain, "ilevlst"));
            }
            if levels.len() == 1 {
                Ok(levels.pop().map(LevelSelector::Single))
            } else {
                Ok(Some(LevelSelector::List(levels)))
            }
        }
    }
}

fn missing_attribute(domain: &DomainProfile, attribute: &str) -> MassError {
    MassError::MissingProfileAttribute {
        kind: ProfileKind::Domain,
        profile: domain.dom_name.clone(),
        attribute: attribute.to_string(),
    }
}

/// The full set of query attributes for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Stash code
    pub stash: StashCode,
    /// Time meaning code
    pub lbtim: u32,
    /// Level selector, absent for "all levels"
    pub lblev: Option<LevelSelector>,
    /// Processing code
    pub lbproc: u32,
}

impl Encoding {
    /// Attributes to emit, in the fixed order stash, lbtim, lblev, lbproc,
    /// skipping an absent `lblev`.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![("stash", self.stash.to_string()), ("lbtim", self.lbtim.to_string())];
        if let Some(lblev) = &self.lblev {
            attributes.push(("lblev", lblev.to_string()));
        }
        attributes.push(("lbproc", self.lbproc.to_string()));
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn domain(value: serde_json::Value) -> DomainProfile {
        serde_json::from_value(value).unwrap()
    }

    fn time(name: &str) -> TimeProfile {
        serde_json::from_value(json!({ "tim_name": name })).unwrap()
    }

    #[test]
    fn test_stash_code_is_zero_padded() {
        assert_eq!(StashCode::parse("3", "236").unwrap().to_string(), "03236");
        assert_eq!(StashCode::parse("0", "2").unwrap().to_string(), "00002");
        assert_eq!(StashCode::parse("30", "204").unwrap().to_string(), "30204");
        assert_eq!(StashCode::parse("03", "024").unwrap().to_string(), "03024");
    }

    #[test]
    fn test_stash_code_rejects_non_numeric() {
        let err = StashCode::parse("3", "abc").unwrap_err();
        assert!(matches!(err, MassError::InvalidStashCode { value } if value == "abc"));
        assert!(StashCode::parse("", "236").is_err());
    }

    #[test]
    fn test_stash_code_rejects_codes_wider_than_the_format() {
        let err = StashCode::parse("3", "1236").unwrap_err();
        assert!(matches!(err, MassError::InvalidStashCode { value } if value == "1236"));
        let err = StashCode::parse("123", "4").unwrap_err();
        assert!(matches!(err, MassError::InvalidStashCode { value } if value == "123"));

        assert_eq!(StashCode::parse("99", "999").unwrap().to_string(), "99999");
    }

    #[test]
    fn test_meaned_time_profiles() {
        for name in ["TDAYM", "TMONMN"] {
            assert_eq!(lbtim(&time(name)).unwrap(), 122);
            assert_eq!(lbproc(&time(name)).unwrap(), 128);
        }
    }

    #[test]
    fn test_instantaneous_time_profiles() {
        for name in ["T1HR", "T3HR", "T6H", "T30DAY"] {
            assert_eq!(lbtim(&time(name)).unwrap(), 12);
            assert_eq!(lbproc(&time(name)).unwrap(), 0);
        }
    }

    #[test]
    fn test_unmapped_time_profile() {
        let err = lbtim(&time("T2HR")).unwrap_err();
        assert!(matches!(err, MassError::UnmappedTimeProfile { name } if name == "T2HR"));
        assert!(lbproc(&time("tdaym")).is_err());
    }

    #[test]
    fn test_single_level_has_no_selector() {
        assert_eq!(lblev(&domain(json!({"dom_name": "DIAG", "iopl": "5"}))).unwrap(), None);
    }

    #[test]
    fn test_pressure_levels_are_never_filtered() {
        let profile = domain(json!({
            "dom_name": "DP6", "iopl": 3, "ilevs": 2, "ilevlst": "1,2", "rlevlst": "850,500"
        }));
        assert_eq!(lblev(&profile).unwrap(), None);
    }

    #[test]
    fn test_level_list() {
        let profile = domain(json!({"dom_name": "DLEV3", "iopl": 1, "ilevs": 2, "ilevlst": "5,10,15"}));
        let selector = lblev(&profile).unwrap().unwrap();
        assert_eq!(selector.to_string(), "(5,10,15)");
    }

    #[test]
    fn test_single_entry_level_list_is_bare() {
        let profile = domain(json!({"dom_name": "DSOIL", "iopl": "6", "ilevs": "2", "ilevlst": "1"}));
        assert_eq!(lblev(&profile).unwrap(), Some(LevelSelector::Single("1".to_string())));

        let profile = domain(json!({"dom_name": "DTH", "iopl": "2", "ilevs": "2", "ilevlst": " 4 , 8 "}));
        assert_eq!(lblev(&profile).unwrap().unwrap().to_string(), "(4,8)");
    }

    #[test]
    fn test_level_range_has_no_selector() {
        for iopl in [1, 2, 6] {
            let profile = domain(json!({"dom_name": "DALL", "iopl": iopl, "ilevs": 1}));
            assert_eq!(lblev(&profile).unwrap(), None);
        }
    }

    #[test]
    fn test_unsupported_level_types() {
        for iopl in [0, 4, 7, 8, 9, 10] {
            let profile = domain(json!({"dom_name": "DX", "iopl": iopl}));
            match lblev(&profile).unwrap_err() {
                MassError::UnsupportedLevelType {
                    domain,
                    code,
                } => {
                    assert_eq!(domain, "DX");
                    assert_eq!(code, iopl);
                }
                other => panic!("unexpected error for iopl {iopl}: {other}"),
            }
        }
    }

    #[test]
    fn test_unsupported_level_selection() {
        let profile = domain(json!({"dom_name": "DX", "iopl": 2, "ilevs": 3}));
        let err = lblev(&profile).unwrap_err();
        assert!(matches!(err, MassError::UnsupportedLevelSelection { ilevs: 3, .. }));
    }

    #[test]
    fn test_missing_level_attributes() {
        let cases = [
            (json!({"dom_name": "DX"}), "iopl"),
            (json!({"dom_name": "DX", "iopl": 1}), "ilevs"),
            (json!({"dom_name": "DX", "iopl": 1, "ilevs": 2}), "ilevlst"),
            (json!({"dom_name": "DX", "iopl": 1, "ilevs": 2, "ilevlst": "1,,3"}), "ilevlst"),
        ];
        for (value, expected) in cases {
            match lblev(&domain(value)).unwrap_err() {
                MassError::MissingProfileAttribute {
                    attribute, ..
                } => assert_eq!(attribute, expected),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_attribute_order_is_fixed() {
        let encoding = Encoding {
            stash: StashCode {
                section: 0,
                item: 2,
            },
            lbtim: 12,
            lblev: Some(LevelSelector::List(vec!["5".into(), "10".into()])),
            lbproc: 0,
        };
        let names: Vec<_> = encoding.attributes().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["stash", "lbtim", "lblev", "lbproc"]);

        let encoding = Encoding {
            lblev: None,
            ..encoding
        };
        assert_eq!(
            encoding.attributes(),
            vec![
                ("stash", "00002".to_string()),
                ("lbtim", "12".to_string()),
                ("lbproc", "0".to_string())
            ]
        );
    }
}
