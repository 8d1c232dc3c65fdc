//! `wikirender section` - print one section of a page.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use super::common::read_page;
use crate::text::get_section;

/// Print section `N` of a page, byte for byte.
///
/// Nothing is appended, so `wikirender section page.txt 2 > part.txt` writes
/// exactly the text between the first and second `----` markers.
#[derive(Args, Debug)]
pub struct SectionCommand {
    /// Page file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Section number, starting at 1
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub section: i64,
}

impl SectionCommand {
    /// Run the command.
    pub async fn execute(self) -> Result<()> {
        let text = read_page(&self.file).await?;
        let section = get_section(&text, self.section).with_context(|| {
            format!("Failed to extract section {} of {}", self.section, self.file.display())
        })?;

        tracing::debug!(
            "Section {} of {} is {} bytes",
            self.section,
            self.file.display(),
            section.len()
        );

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(section.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
