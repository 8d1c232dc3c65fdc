//! `wikirender sections` - list the sections of a page.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::common::read_page;
use crate::text::sections;

/// Longest preview shown per section, in characters.
const PREVIEW_CHARS: usize = 40;

/// List every section of a page with its size and a short preview.
#[derive(Args, Debug)]
pub struct SectionsCommand {
    /// Page file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SectionSummary {
    index: usize,
    bytes: usize,
    lines: usize,
    preview: String,
}

#[derive(Debug, Serialize)]
struct SectionsReport {
    count: usize,
    sections: Vec<SectionSummary>,
}

impl SectionsCommand {
    /// Run the command.
    pub async fn execute(self) -> Result<()> {
        let text = read_page(&self.file).await?;
        let report = summarize(&text);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{} section(s) in {}", report.count.to_string().bold(), self.file.display());
        for section in &report.sections {
            let preview =
                if section.preview.is_empty() { "(empty)".dimmed().to_string() } else { section.preview.clone() };
            println!("  {:>3}  {:>6} bytes  {}", section.index, section.bytes, preview);
        }
        Ok(())
    }
}

fn summarize(text: &str) -> SectionsReport {
    let sections: Vec<SectionSummary> = sections(text)
        .enumerate()
        .map(|(position, body)| SectionSummary {
            index: position + 1,
            bytes: body.len(),
            lines: body.lines().count(),
            preview: preview(body),
        })
        .collect();

    SectionsReport {
        count: sections.len(),
        sections,
    }
}

/// First non-blank line, trimmed and shortened.
fn preview(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|line| !line.is_empty()).unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
