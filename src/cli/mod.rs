//! Command-line interface for wikirender
//!
//! # Commands
//!
//! - `section` - print one section of a page exactly as stored
//! - `sections` - list the sections of a page
//! - `render` - render pages, evaluating plugin markup
//!
//! # Global Options
//!
//! - `--verbose` - debug logging
//! - `--quiet` - errors only
//! - `--config <PATH>` - configuration file (see [`crate::config`])
//!
//! Logging goes to stderr through `tracing`; `RUST_LOG` overrides the level
//! chosen by the flags.
//!
//! # Examples
//!
//! ```bash
//! wikirender section Main.txt 2
//! wikirender sections --json Main.txt
//! wikirender render --var author=Alice --format html pages/
//! ```

mod common;
mod render;
mod section;
mod sections;

pub use render::RenderCommand;
pub use section::SectionCommand;
pub use sections::SectionsCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level filter; `RUST_LOG` takes precedence when set
    pub log_level: String,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("wikirender={}", self.log_level)));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser)]
#[command(
    name = "wikirender",
    about = "Render wiki pages with lazily evaluated plugins and split them into sections",
    version,
    author,
    long_about = "wikirender renders wiki text containing [{Plugin}] markup and extracts numbered sections separated by ---- lines."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print one section of a page
    Section(SectionCommand),
    /// List the sections of a page
    Sections(SectionsCommand),
    /// Render pages, evaluating plugin markup
    Render(RenderCommand),
}

impl Cli {
    /// Run the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            config_path: self.config.clone(),
        }
    }

    /// Run the command with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Section(cmd) => cmd.execute().await,
            Commands::Sections(cmd) => cmd.execute().await,
            Commands::Render(cmd) => cmd.execute(config.config_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_and_quiet_levels() {
        let cli = Cli::parse_from(["wikirender", "--verbose", "section", "a.txt", "1"]);
        assert_eq!(cli.build_config().log_level, "debug");

        let cli = Cli::parse_from(["wikirender", "-q", "section", "a.txt", "1"]);
        assert_eq!(cli.build_config().log_level, "error");

        let cli = Cli::parse_from(["wikirender", "section", "a.txt", "1"]);
        assert_eq!(cli.build_config().log_level, "warn");
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["wikirender", "-v", "-q", "section", "a.txt", "1"]).is_err());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::parse_from(["wikirender", "render", "page.txt", "--config", "/tmp/c.toml"]);
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_negative_section_numbers_parse() {
        assert!(Cli::try_parse_from(["wikirender", "section", "a.txt", "-1"]).is_ok());
    }
}
