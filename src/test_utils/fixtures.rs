//! Test fixtures for sample catalog and request documents
//!
//! The sample catalog covers every supported level type, both time-meaning
//! codes, and three streams. The sample request list exercises trailing
//! comments in both styles and includes one variable (`pr`) that has no
//! stash record.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Test fixture for catalog documents
#[derive(Clone, Debug)]
pub struct CatalogFixture {
    pub content: String,
    pub name: String,
}

impl CatalogFixture {
    /// Catalog with three streams and five archived variables
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
{
  "domain_profiles": [
    { "dom_name": "DIAG", "iopl": "5", "imsk": "1" },
    { "dom_name": "DALLTH", "iopl": "2", "ilevs": "1", "levb": "1", "levt": "85" },
    { "dom_name": "DLEV3", "iopl": "1", "ilevs": "2", "ilevlst": "5,10,15" },
    { "dom_name": "DSOIL", "iopl": "6", "ilevs": "2", "ilevlst": "1" },
    { "dom_name": "DP6", "iopl": "3", "rlevlst": "850,500,250" },
    { "dom_name": "DHGT", "iopl": "4" }
  ],
  "usage_profiles": [
    { "use_name": "UPD", "file_id": "pp9", "locn": "3" },
    { "use_name": "UPA", "file_id": "pp5", "locn": "3" },
    { "use_name": "UPH", "file_id": "pp1", "locn": "3" },
    { "use_name": "UPX", "file_id": "pp0", "locn": "3" }
  ],
  "time_profiles": [
    { "tim_name": "TDAYM", "ityp": "3", "intv": "1", "unt1": "DA" },
    { "tim_name": "TMONMN", "ityp": "3", "intv": "1", "unt1": "DA" },
    { "tim_name": "T1HR", "ityp": "1", "unt3": "H" },
    { "tim_name": "T6H", "ityp": "1", "unt3": "H" },
    { "tim_name": "T2HR", "ityp": "1", "unt3": "H" }
  ],
  "streams": [
    { "file_id": "pp9", "filename_base": "$DATAM/${RUNID}a.pd%C" },
    { "file_id": "pp5", "filename_base": "$DATAM/${RUNID}a.pa%C" },
    { "file_id": "pp1", "filename_base": "$DATAM/${RUNID}a.p1%C" }
  ],
  "stash_records": [
    { "isec": "3", "item": "236", "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DIAG" },
    { "isec": "0", "item": "24", "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DIAG" },
    { "isec": "30", "item": "204", "use_name": "UPA", "tim_name": "TMONMN", "dom_name": "DP6" },
    { "isec": "0", "item": "2", "use_name": "UPH", "tim_name": "T1HR", "dom_name": "DLEV3" },
    { "isec": "8", "item": "223", "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DSOIL" },
    { "isec": "0", "item": "3", "use_name": "UPH", "tim_name": "T2HR", "dom_name": "DIAG" },
    { "isec": "0", "item": "4", "use_name": "UPH", "tim_name": "T1HR", "dom_name": "DHGT" },
    { "isec": "0", "item": "10", "use_name": "UPX", "tim_name": "T1HR", "dom_name": "DIAG" }
  ]
}
"#
            .trim()
            .to_string(),
        }
    }

    /// Catalog without the `stash_records` section
    pub fn missing_stash_records() -> Self {
        Self {
            name: "missing_stash_records".to_string(),
            content: r#"
{
  "domain_profiles": [],
  "usage_profiles": [],
  "time_profiles": [],
  "streams": []
}
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture to `dir/<name>.json`, returning the path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write catalog fixture {}", path.display()))?;
        Ok(path)
    }
}

/// Test fixture for request documents
#[derive(Clone, Debug)]
pub struct RequestFixture {
    pub content: String,
    pub name: String,
}

impl RequestFixture {
    /// Six variables over three streams; `pr` has no stash record
    pub fn basic() -> Self {
        Self {
            name: "requests".to_string(),
            content: r#"
[
  // daily means on the apd stream
  {
    "name": "tas",          # 1.5m air temperature
    "section": "3",
    "item": "236",
    "usage": "UPD",
    "domain": "DIAG",
    "time": "TDAYM"         // daily mean
  },
  {
    "name": "ta",
    "section": "30",
    "item": "204",
    "usage": "UPA",
    "domain": "DP6",        # pressure levels are never level-filtered
    "time": "TMONMN"
  },
  { "name": "ua", "section": "0", "item": "2", "usage": "UPH", "domain": "DLEV3", "time": "T1HR" },  // hourly
  { "name": "ts", "section": "0", "item": "24", "usage": "UPD", "domain": "DIAG", "time": "TDAYM" },
  { "name": "mrso", "section": "8", "item": "223", "usage": "UPD", "domain": "DSOIL", "time": "TDAYM" },
  { "name": "pr", "section": "5", "item": "216", "usage": "UPD", "domain": "DIAG", "time": "TDAYM" }  # not archived
]
"#
            .trim()
            .to_string(),
        }
    }

    /// A single variable, `tas`
    pub fn single() -> Self {
        Self {
            name: "single".to_string(),
            content: r#"
[
  { "name": "tas", "section": "3", "item": "236", "usage": "UPD", "domain": "DIAG", "time": "TDAYM" }
]
"#
            .trim()
            .to_string(),
        }
    }

    /// Build a one-variable request list
    pub fn variable(name: &str, section: &str, item: &str, usage: &str, domain: &str, time: &str) -> Self {
        Self {
            name: format!("request_{name}"),
            content: format!(
                r#"[{{ "name": "{name}", "section": "{section}", "item": "{item}", "usage": "{usage}", "domain": "{domain}", "time": "{time}" }}]"#
            ),
        }
    }

    /// Write the fixture to `dir/<name>.json`, returning the path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.name));
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write request fixture {}", path.display()))?;
        Ok(path)
    }
}
