//! Command-line interface for mass-requests.
//!
//! One command, no subcommands: load the catalog and the request list,
//! resolve, and write the retrieval script.
//!
//! ```bash
//! # Script to stdout
//! mass-requests -s u-ab123 -y 1950:1952 -c conf/stash.json -r requests.json > get_data.sh
//!
//! # Script to a file, failing if any variable is unresolved
//! mass-requests -s u-ab123 -y 1950:1952 -c conf/stash.json -r requests.json \
//!     --strict -o get_data.sh
//!
//! # Parameters from the environment
//! MASS_SUITE=u-ab123 MASS_YEARS=2000:2000 MASS_CATALOG=conf/stash.json \
//!     MASS_REQUESTS=requests.json mass-requests
//! ```
//!
//! # Output channels
//!
//! - stdout: the script (unless `--output` is given)
//! - stderr: one `warning:` line per unresolved variable, log messages, and
//!   the error report when the run fails


use crate::catalog::Catalog;
use crate::core::{FileOps, MassError};
use crate::params::{SuiteId, YearRange};
use crate::pipeline::{GenerateOptions, GeneratedScript, generate};
use crate::requests::parse_requests;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags so tests can inspect the logging choice
/// without installing a subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter to install; `None` means no logging at all.
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a new CLI configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Does nothing when `log_level` is `None` or a subscriber is already
    /// installed.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Generate MASS retrieval scripts for a suite's archived model output.
#[derive(Parser, Debug)]
#[command(
    name = "mass-requests",
    about = "Generate MASS retrieval scripts from a stash catalog and a variable request list",
    version,
    long_about = "Resolves each requested variable against the site stash catalog, groups the \
                  variables by output stream, and writes one moo select query per stream and year."
)]
pub struct Cli {
    /// Suite id, e.g. u-ab123.
    #[arg(short, long, env = "MASS_SUITE", value_name = "SUITE-ID")]
    suite: SuiteId,

    /// Inclusive year range, e.g. 1950:1952.
    #[arg(short, long, env = "MASS_YEARS", value_name = "YYYY:YYYY")]
    years: YearRange,

    /// Catalog of profiles, streams and stash records (JSON).
    #[arg(short, long, env = "MASS_CATALOG", value_name = "FILE")]
    conf: PathBuf,

    /// Variable request list (JSON with `#` or `//` line comments).
    #[arg(short, long, env = "MASS_REQUESTS", value_name = "FILE")]
    requests: PathBuf,

    /// Write the script to FILE instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Fail if any requested variable has no stash record.
    #[arg(long)]
    strict: bool,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging; warnings and errors are still printed.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Execute the CLI with the configuration built from its flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed arguments.
    ///
    /// `--verbose` selects `debug`, `--quiet` disables logging, otherwise
    /// `RUST_LOG` is honoured and falls back to `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        };

        CliConfig {
            log_level,
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let catalog_text = read_input(&self.conf, "loading catalog document").await?;
        let requests_text = read_input(&self.requests, "loading variable requests").await?;

        let catalog = Catalog::parse(&catalog_text, &self.conf.display().to_string())?;
        let requests = parse_requests(&requests_text, &self.requests.display().to_string())?;
        info!(
            "Generating {} for {} variable(s), years {}",
            self.suite,
            requests.len(),
            self.years
        );

        let options = GenerateOptions {
            suite: self.suite,
            years: self.years,
            strict: self.strict,
        };
        let script = generate(&catalog, &requests, &options)?;

        report_unresolved(&script);
        write_script(&script, self.output.as_deref()).await
    }
}

async fn read_input(path: &Path, purpose: &str) -> Result<String> {
    if !FileOps::exists_with_context(path, purpose, "cli").await? {
        return Err(MassError::InputFileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = FileOps::read_with_context(path, purpose, "cli").await?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

fn report_unresolved(script: &GeneratedScript) {
    for variable in &script.unresolved {
        eprintln!("{}: {}", "warning".yellow().bold(), variable);
    }
}

async fn write_script(script: &GeneratedScript, output: Option<&Path>) -> Result<()> {
    let text = script.render();
    match output {
        Some(path) => {
            FileOps::write_with_context(path, &text, "writing retrieval script", "cli").await?;
            info!("Wrote {} line(s) to {}", script.lines.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("Failed to write script to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
