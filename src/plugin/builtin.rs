//! Built-in plugins.

use chrono::Local;
use chrono::format::{Item, StrftimeItems};

use super::{ParamValue, PluginError, PluginParams, WikiPlugin};
use crate::context::RenderContext;
use crate::text::is_positive;

/// Default `CurrentTime` format.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Context variable used by an unnamed `Counter`.
pub const COUNTER_VARIABLE: &str = "counter";

/// Read a parameter that must be text if present.
fn text_param<'a>(
    plugin: &str,
    params: &'a PluginParams,
    name: &str,
) -> Result<Option<&'a str>, PluginError> {
    match params.get(name) {
        None => Ok(None),
        Some(ParamValue::Text(text)) => Ok(Some(text)),
        Some(ParamValue::Opaque(_)) => {
            Err(PluginError::invalid_parameter(plugin, name, "expected a text value"))
        }
    }
}

/// Inserts the current local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentTimePlugin;

impl WikiPlugin for CurrentTimePlugin {
    fn name(&self) -> &str {
        "CurrentTime"
    }

    fn execute(&self, _ctx: &RenderContext, params: &PluginParams) -> Result<String, PluginError> {
        let format = text_param(self.name(), params, "format")?.unwrap_or(DEFAULT_TIME_FORMAT);

        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(PluginError::invalid_parameter(
                self.name(),
                "format",
                format!("'{format}' is not a valid time format"),
            ));
        }

        Ok(Local::now().format_with_items(items.into_iter()).to_string())
    }
}

/// Increments a page counter each time it is evaluated.
///
/// The count lives in the context variable `counter`, or `counter-<name>` when
/// a `name` is given, so several counters can run on one page. Because plugin
/// nodes are re-evaluated on every render, rendering a page twice with the
/// same context counts twice.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterPlugin;

impl WikiPlugin for CounterPlugin {
    fn name(&self) -> &str {
        "Counter"
    }

    fn execute(&self, ctx: &RenderContext, params: &PluginParams) -> Result<String, PluginError> {
        let variable = match text_param(self.name(), params, "name")? {
            Some(name) if !name.trim().is_empty() => format!("{COUNTER_VARIABLE}-{}", name.trim()),
            _ => COUNTER_VARIABLE.to_string(),
        };

        let increment = match params.get("increment") {
            None => 1,
            Some(value) => value.as_i64().ok_or_else(|| {
                PluginError::invalid_parameter(self.name(), "increment", "expected an integer")
            })?,
        };

        let current = match ctx.variable(&variable) {
            None => 0,
            Some(value) => value.trim().parse::<i64>().map_err(|_| {
                PluginError::failed(format!(
                    "Counter variable '{variable}' holds a non-numeric value '{value}'"
                ))
            })?,
        };

        let next = current
            .checked_add(increment)
            .ok_or_else(|| PluginError::failed(format!("Counter '{variable}' overflowed")))?;
        ctx.set_variable(variable, next.to_string());

        let show = text_param(self.name(), params, "showResult")?.is_none_or(is_positive);
        Ok(if show { next.to_string() } else { String::new() })
    }
}

/// Inserts the value of a context variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct VariablePlugin;

impl WikiPlugin for VariablePlugin {
    fn name(&self) -> &str {
        "Variable"
    }

    fn execute(&self, ctx: &RenderContext, params: &PluginParams) -> Result<String, PluginError> {
        let name = text_param(self.name(), params, "var")?
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PluginError::invalid_parameter(self.name(), "var", "is required"))?;

        if name.eq_ignore_ascii_case("pagename") {
            return Ok(ctx.page_name().to_string());
        }

        ctx.variable(name).ok_or_else(|| PluginError::failed(format!("No such variable: {name}")))
    }
}
