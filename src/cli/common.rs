//! Helpers shared by the subcommands.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Read a page file as UTF-8.
pub(super) async fn read_page(path: &Path) -> Result<String> {
    fs::read_to_string(path).await.with_context(|| format!("Failed to read page {}", path.display()))
}

/// Page name for a file: its stem, or the whole path if it has none.
pub(super) fn page_name(path: &Path) -> String {
    path.file_stem().map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}
