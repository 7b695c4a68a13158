//! Canonical stream names derived from filename templates.

use crate::constants::STREAM_EXTENSION;
use crate::core::MassError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `$DATAM/${RUNID}<class>.<id>...`: one class letter, then an id of at least
/// two lowercase alphanumerics, then anything (`%C` date placeholders, `.pp`).
static TEMPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$DATAM/\$\{RUNID\}([a-z])\.([a-z0-9]{2,})").expect("template pattern is valid")
});

/// Canonical name of an archived output stream, e.g. `apd.pp`.
///
/// # Examples
///
/// ```rust
/// use mass_requests::streams::StreamName;
///
/// let name = StreamName::from_template("pp9", "$DATAM/${RUNID}a.pd%C").unwrap();
/// assert_eq!(name.key(), "apd");
/// assert_eq!(name.extension(), "pp");
/// assert_eq!(name.to_string(), "apd.pp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamName {
    class: char,
    id: String,
}

impl StreamName {
    /// Derive the stream name from a stream's `filename_base` template.
    ///
    /// # Errors
    ///
    /// [`MassError::TemplateMismatch`] when the template does not start with
    /// `$DATAM/${RUNID}<class>.<id>`.
    pub fn from_template(file_id: &str, template: &str) -> Result<Self, MassError> {
        let captures = TEMPLATE_PATTERN.captures(template).ok_or_else(|| MassError::TemplateMismatch {
            file_id: file_id.to_string(),
            template: template.to_string(),
        })?;

        let class = captures[1].chars().next().ok_or_else(|| MassError::TemplateMismatch {
            file_id: file_id.to_string(),
            template: template.to_string(),
        })?;
        Ok(Self {
            class,
            id: captures[2].to_string(),
        })
    }

    /// Grouping key and archive collection name, e.g. `apd`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.class, self.id)
    }

    /// Archive file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        STREAM_EXTENSION
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}", self.class, self.id, self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_with_suffix() {
        let name = StreamName::from_template("pp9", "$DATAM/${RUNID}a.pd9.pp").unwrap();
        assert_eq!(name.class, 'a');
        assert_eq!(name.id, "pd9");
        assert_eq!(name.key(), "apd9");
        assert_eq!(name.extension(), "pp");
        assert_eq!(name.to_string(), "apd9.pp");
    }

    #[test]
    fn test_template_with_date_placeholder() {
        let name = StreamName::from_template("pp1", "$DATAM/${RUNID}a.p1%C").unwrap();
        assert_eq!(name.to_string(), "ap1.pp");

        let name = StreamName::from_template("pp5", "$DATAM/${RUNID}o.pa_$YYYY").unwrap();
        assert_eq!(name.key(), "opa");
    }

    #[test]
    fn test_template_mismatch() {
        for template in [
            "$DATAM/a.pd%C",
            "$DATAM/${RUNID}.pd%C",
            "$DATAM/${RUNID}A.pd%C",
            "$DATAM/${RUNID}a.p%C",
            "$DATAW/${RUNID}a.pd%C",
            "",
        ] {
            match StreamName::from_template("pp9", template) {
                Err(MassError::TemplateMismatch {
                    file_id,
                    template: reported,
                }) => {
                    assert_eq!(file_id, "pp9");
                    assert_eq!(reported, template);
                }
                other => panic!("{template:?} should not match, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_equal_templates_give_equal_names() {
        let a = StreamName::from_template("pp9", "$DATAM/${RUNID}a.pd%C").unwrap();
        let b = StreamName::from_template("pp8", "$DATAM/${RUNID}a.pd.pp").unwrap();
        assert_eq!(a, b);
    }
}
