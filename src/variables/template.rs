//! Tera-backed variable expansion.

use regex::Regex;
use std::error::Error as _;
use std::sync::LazyLock;
use tera::{Context as TeraContext, Tera};

use super::{VariableError, VariableExpander};
use crate::context::RenderContext;
use crate::core::find_similar;

/// Name under which the current page name is exposed to templates.
pub const PAGE_NAME_VARIABLE: &str = "pagename";

static UNKNOWN_VARIABLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Variable `([^`]+)` not found").ok());

/// Expands `{{ name }}` references with Tera.
///
/// The template context holds every variable of the [`RenderContext`] plus
/// `pagename`. Strings without template syntax skip Tera entirely, so plain
/// parameter values cost nothing and never fail. Autoescaping is off: plugin
/// parameters are raw text, not HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateVariableExpander;

impl TemplateVariableExpander {
    /// Create a new expander.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn build_context(ctx: &RenderContext) -> TeraContext {
        let mut tera_ctx = TeraContext::new();
        for (name, value) in ctx.variables() {
            tera_ctx.insert(name, &value);
        }
        tera_ctx.insert(PAGE_NAME_VARIABLE, ctx.page_name());
        tera_ctx
    }

    /// Turn a Tera error into a [`VariableError`].
    ///
    /// Tera reports missing variables as plain messages somewhere in the error
    /// chain, so the chain is walked looking for that message first.
    fn classify_error(error: &tera::Error, ctx: &RenderContext) -> VariableError {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(cause) = current {
            messages.push(cause.to_string());
            current = cause.source();
        }

        if let Some(pattern) = UNKNOWN_VARIABLE.as_ref() {
            for message in &messages {
                if let Some(caps) = pattern.captures(message) {
                    let name = caps[1].to_string();
                    let mut available: Vec<String> = ctx.variables().into_keys().collect();
                    available.push(PAGE_NAME_VARIABLE.to_string());
                    let suggestions = find_similar(&name, available.iter().map(String::as_str));
                    return VariableError::UnknownVariable {
                        name,
                        suggestions,
                    };
                }
            }
        }

        let cleaned: Vec<String> = messages
            .iter()
            .map(|msg| {
                msg.replace("while rendering '__tera_one_off'", "")
                    .replace("Failed to render '__tera_one_off'", "")
                    .replace("Failed to parse '__tera_one_off'", "")
                    .replace("'__tera_one_off'", "template")
                    .trim()
                    .to_string()
            })
            .filter(|msg| !msg.is_empty())
            .collect();

        VariableError::Syntax {
            message: if cleaned.is_empty() {
                "invalid template".to_string()
            } else {
                cleaned.join(": ")
            },
        }
    }
}

impl VariableExpander for TemplateVariableExpander {
    fn expand_variables(&self, ctx: &RenderContext, raw: &str) -> Result<String, VariableError> {
        if !raw.contains("{{") && !raw.contains("{%") {
            return Ok(raw.to_string());
        }

        let tera_ctx = Self::build_context(ctx);
        Tera::one_off(raw, &tera_ctx, false).map_err(|error| {
            let classified = Self::classify_error(&error, ctx);
            tracing::debug!("Variable expansion of {:?} failed: {}", raw, classified);
            classified
        })
    }
}
