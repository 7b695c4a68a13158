//! mass-requests CLI entry point
//!
//! Parses the run parameters, generates the retrieval script, and turns any
//! failure into a coloured report on stderr with exit status 1.

use anyhow::Result;
use clap::Parser;
use mass_requests::cli;
use mass_requests::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
