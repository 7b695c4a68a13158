//! Run parameters: the suite identifier and the requested year range.
//!
//! Both are parsed through [`FromStr`] so clap rejects malformed values before
//! any document is read.

use crate::core::MassError;
use regex::Regex;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;

static SUITE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^u-[a-z0-9]{5}$").expect("suite id pattern is valid"));

static YEAR_RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}):([0-9]{4})$").expect("year range pattern is valid"));

/// A Rose suite identifier such as `u-ab123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuiteId(String);

impl SuiteId {
    /// The identifier as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SuiteId {
    type Err = MassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if SUITE_ID_PATTERN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(MassError::InvalidSuiteId {
                value: s.to_string(),
            })
        }
    }
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An inclusive range of model years, written `yyyy:yyyy`.
///
/// # Examples
///
/// ```rust
/// use mass_requests::params::YearRange;
///
/// let years: YearRange = "2000:2002".parse().unwrap();
/// assert_eq!(years.iter().collect::<Vec<_>>(), vec![2000, 2001, 2002]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    start: u16,
    end: u16,
}

impl YearRange {
    /// Create a range; `start` must not be after `end`.
    pub fn new(start: u16, end: u16) -> Result<Self, MassError> {
        if start > end {
            return Err(MassError::InvalidYearRange {
                value: format!("{start:04}:{end:04}"),
                reason: format!("start year {start} is after end year {end}"),
            });
        }
        Ok(Self {
            start,
            end,
        })
    }

    /// First year of the range.
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Last year of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> u16 {
        self.end
    }

    /// Years in ascending order.
    #[must_use]
    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    /// Number of years covered.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    /// Always false; a range holds at least one year.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for YearRange {
    type Err = MassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = YEAR_RANGE_PATTERN.captures(s).ok_or_else(|| MassError::InvalidYearRange {
            value: s.to_string(),
            reason: "format is yyyy:yyyy".to_string(),
        })?;

        // four ASCII digits always fit in a u16
        let parse = |i: usize| captures[i].parse::<u16>().unwrap_or_default();
        Self::new(parse(1), parse(2)).map_err(|e| match e {
            MassError::InvalidYearRange {
                reason, ..
            } => MassError::InvalidYearRange {
                value: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}:{:04}", self.start, self.end)
    }
}
