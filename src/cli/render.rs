//! `wikirender render` - render pages, evaluating plugin markup.
//!
//! Every page gets its own [`RenderContext`] named after the file stem, seeded
//! with the configured variables and then the `--var` overrides. Pages are
//! rendered concurrently on the blocking pool and printed in argument order.
//! A failing plugin never fails the command; it shows up in the output as
//! `Plugin insertion failed: ...`.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::common::{page_name, read_page};
use crate::config::{OutputFormat, WikiConfig};
use crate::context::WikiEngine;
use crate::core::WikiError;
use crate::document::WikiDocument;
use crate::text::get_section;

/// File extensions picked up when a directory is given.
const PAGE_EXTENSIONS: &[&str] = &["txt", "wiki"];

/// Render wiki pages to text or HTML.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Page files or directories to render
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Set a page variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format html
    #[arg(long, conflicts_with = "format")]
    pub html: bool,

    /// Render only this section of each page
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub section: Option<i64>,
}

/// A page after rendering.
#[derive(Debug)]
struct RenderedPage {
    path: PathBuf,
    output: String,
}

impl RenderCommand {
    /// Run the command using the configuration at `config_path` (or the default).
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        let config = WikiConfig::load_with_optional(config_path).await?;
        let overrides = parse_assignments(&self.vars)?;
        let format = if self.html { OutputFormat::Html } else { self.format.unwrap_or(config.render.format) };
        let pages = collect_pages(&self.paths)?;

        tracing::debug!("Rendering {} page(s) as {:?}", pages.len(), format);

        let engine = Arc::new(config.build_engine());
        let config = Arc::new(config);
        let overrides = Arc::new(overrides);

        let tasks = pages.into_iter().map(|path| {
            let engine = Arc::clone(&engine);
            let config = Arc::clone(&config);
            let overrides = Arc::clone(&overrides);
            let section = self.section;
            async move {
                let mut source = read_page(&path).await?;
                if let Some(n) = section {
                    source = get_section(&source, n)
                        .with_context(|| format!("Failed to extract section {n} of {}", path.display()))?
                        .to_string();
                }

                let name = page_name(&path);
                let output = tokio::task::spawn_blocking(move || {
                    render_page(&source, name, engine, &config, &overrides, format)
                })
                .await
                .with_context(|| format!("Rendering task for {} panicked", path.display()))??;

                Ok::<_, anyhow::Error>(RenderedPage { path, output })
            }
        });

        let results = join_all(tasks).await;
        let multiple = results.len() > 1;

        for result in results {
            let page = result?;
            if multiple {
                println!("{}", format!("==> {} <==", page.path.display()).bold());
            }
            print!("{}", page.output);
            if multiple || !page.output.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}

/// Render one page in a fresh context.
fn render_page(
    source: &str,
    name: String,
    engine: Arc<WikiEngine>,
    config: &WikiConfig,
    overrides: &[(String, String)],
    format: OutputFormat,
) -> Result<String, WikiError> {
    let context = Arc::new(config.new_context(engine, name).with_variables(overrides.iter().cloned()));
    let document = WikiDocument::from_markup(source, &context);

    match format {
        OutputFormat::Text => document.to_text(),
        OutputFormat::Html => document.to_html(),
    }
}

/// Parse `NAME=VALUE` arguments. The value may be empty or contain `=`.
fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, WikiError> {
    raw.iter()
        .map(|assignment| match assignment.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => Err(WikiError::InvalidVariableAssignment {
                assignment: assignment.clone(),
            }),
        })
        .collect()
}

/// Expand directories into their page files, sorted by path.
fn collect_pages(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();

    for path in paths {
        if !path.is_dir() {
            pages.push(path.clone());
            continue;
        }

        let before = pages.len();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
            if entry.file_type().is_file() && is_page_file(entry.path()) {
                pages.push(entry.into_path());
            }
        }

        if pages.len() == before {
            return Err(WikiError::NoPagesFound {
                path: path.display().to_string(),
            }
            .into());
        }
    }

    Ok(pages)
}

fn is_page_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PAGE_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}
