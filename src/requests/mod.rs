//! Variable request lists.
//!
//! A request list is a JSON array of variables, each naming its stash code
//! and the time, domain, and usage profiles it should be archived under:
//!
//! ```text
//! [
//!   {
//!     "name": "tas",       # 1.5m temperature
//!     "section": "3",
//!     "item": "236",
//!     "usage": "UPD",
//!     "domain": "DIAG",
//!     "time": "TDAYM"      // daily mean
//!   }
//! ]
//! ```
//!
//! Unlike the catalog, the request list may carry trailing `#` or `//`
//! comments; they are removed by [`strip_comments`] before parsing.

mod comments;

pub use comments::strip_comments;

use crate::core::MassError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One analyst request: a variable and the profiles it is wanted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRequest {
    /// Variable name used in the script comments and diagnostics
    pub name: String,
    /// Stash section code, as written
    #[serde(deserialize_with = "code_text")]
    pub section: String,
    /// Stash item code, as written
    #[serde(deserialize_with = "code_text")]
    pub item: String,
    /// Usage profile name
    pub usage: String,
    /// Domain profile name
    pub domain: String,
    /// Time profile name
    pub time: String,
}

/// Parse a (possibly commented) request list.
///
/// `origin` names the document in error messages.
///
/// # Errors
///
/// [`MassError::RequestParseError`] when the document is not a JSON array of
/// complete variable objects once comments are removed.
pub fn parse_requests(text: &str, origin: &str) -> Result<Vec<VariableRequest>, MassError> {
    let stripped = strip_comments(text);
    let requests: Vec<VariableRequest> =
        serde_json::from_str(&stripped).map_err(|e| MassError::RequestParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Parsed {} variable request(s) from {}", requests.len(), origin);
    Ok(requests)
}

fn code_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected a numeric code, found {other}"))),
    }
}
