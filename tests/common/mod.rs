//! Shared helpers for the integration tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A scratch wiki directory with an isolated configuration path.
pub struct TestWiki {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    pages_dir: PathBuf,
    config_path: PathBuf,
}

impl TestWiki {
    /// Create an empty wiki. No configuration file exists until one is written.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let pages_dir = temp_dir.path().join("pages");
        let config_path = temp_dir.path().join("config").join("config.toml");
        fs::create_dir_all(&pages_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            pages_dir,
            config_path,
        })
    }

    /// Directory holding the pages
    pub fn pages_path(&self) -> &Path {
        &self.pages_dir
    }

    /// Write a page relative to the pages directory and return its path.
    pub fn write_page(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.pages_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write page {:?}", path))?;
        Ok(path)
    }

    /// Write the configuration file picked up through `WIKIRENDER_CONFIG`.
    pub fn write_config(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// A `wikirender` command running in the pages directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("wikirender").unwrap();
        cmd.current_dir(&self.pages_dir)
            .env("WIKIRENDER_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run `wikirender` and capture its output.
    pub fn run_wikirender(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_wikirender"))
            .args(args)
            .current_dir(&self.pages_dir)
            .env("WIKIRENDER_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run wikirender")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}
