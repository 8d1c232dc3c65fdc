//! Integration test suite for wikirender
//!
//! These tests drive the `wikirender` binary end to end against pages in a
//! temporary directory.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **section**: exact section extraction and index errors
//! - **sections**: section listing in text and JSON
//! - **render**: plugin evaluation, variables, HTML output, directories
//! - **config**: configuration file handling

#[path = "../common/mod.rs"]
mod common;

mod config;
mod render;
mod section;
mod sections;
