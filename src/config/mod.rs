//! Configuration for wikirender
//!
//! Configuration is a single optional TOML file. It seeds page variables,
//! disables plugins, and picks the default output format.
//!
//! # Location
//!
//! Resolved in this order:
//!
//! 1. `--config <PATH>` on the command line
//! 2. the `WIKIRENDER_CONFIG` environment variable
//! 3. `<config dir>/wikirender/config.toml` (`~/.config` on Linux)
//!
//! `~` in explicit paths is expanded. A missing file at the default location
//! means defaults; a missing file given explicitly is an error.
//!
//! # File Format
//!
//! ```toml
//! [variables]
//! applicationname = "MyWiki"
//! dateformat = "%d.%m.%Y"
//!
//! [plugins]
//! disabled = ["Counter"]
//!
//! [render]
//! format = "html"
//! ```

mod wiki_config;

pub use wiki_config::{CONFIG_ENV_VAR, OutputFormat, PluginSettings, RenderSettings, WikiConfig};
