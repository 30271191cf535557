//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Validate configuration before any side effect
//! - Build the GitHub tracker and hand off to the [`crate::engine`]

pub mod args;

pub use args::Cli;

use crate::core::config::Config;
use crate::engine;
use crate::tracker::GitHubTracker;
use crate::ui::{logging, output};
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let ctx = cli.context();
    let verbosity = ctx.verbosity();

    logging::init_tracing(verbosity);

    let config = Config::from_raw(cli.raw_config())?;
    output::print(format!("Arguments: {}", config.summary()), verbosity);
    tracing::debug!(?config, "configuration accepted");

    let tracker = GitHubTracker::with_api_base(
        config.token(),
        config.repo().clone(),
        config.api_base(),
    );

    let report = engine::generate(&ctx, &config, &tracker)?;
    output::print(
        format!(
            "Wrote {} entr{} to {}",
            report.document.len(),
            if report.document.len() == 1 { "y" } else { "ies" },
            report.output.display()
        ),
        verbosity,
    );

    Ok(())
}
