//! Common test utilities for mass-requests integration tests
//!
//! Every test gets its own temporary directory holding a catalog and a
//! request list, and runs the real binary against them.

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use mass_requests::test_utils::{CatalogFixture, RequestFixture};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary working directory with input documents
pub struct TestEnvironment {
    temp_dir: TempDir,
    catalog: PathBuf,
    requests: PathBuf,
}

impl TestEnvironment {
    /// Environment with the basic catalog and request fixtures
    pub fn basic() -> Result<Self> {
        Self::with_fixtures(&CatalogFixture::basic(), &RequestFixture::basic())
    }

    /// Environment with the given fixtures
    pub fn with_fixtures(catalog: &CatalogFixture, requests: &RequestFixture) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let catalog = catalog.write_to(temp_dir.path())?;
        let requests = requests.write_to(temp_dir.path())?;
        Ok(Self {
            temp_dir,
            catalog,
            requests,
        })
    }

    /// Root of the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the catalog document
    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Path of the request document
    pub fn requests(&self) -> &Path {
        &self.requests
    }

    /// Write an arbitrary file into the environment
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// The binary with suite, years and both documents filled in
    pub fn command(&self, years: &str) -> Command {
        let mut cmd = Self::bare_command();
        cmd.current_dir(self.path())
            .arg("--suite")
            .arg("u-ab123")
            .arg("--years")
            .arg(years)
            .arg("--conf")
            .arg(&self.catalog)
            .arg("--requests")
            .arg(&self.requests);
        cmd
    }

    /// The binary with no arguments and no `MASS_*` variables inherited
    pub fn bare_command() -> Command {
        let mut cmd = Command::cargo_bin("mass-requests").expect("binary is built");
        for var in ["MASS_SUITE", "MASS_YEARS", "MASS_CATALOG", "MASS_REQUESTS", "RUST_LOG"] {
            cmd.env_remove(var);
        }
        cmd
    }
}
