//! Deferred plugin content.
//!
//! [`PluginContent`] is the node the markup builder emits for plugin markup.
//! It stores the plugin name and the raw parameters and nothing else; the text
//! is produced by running the plugin every time it is asked for. Nothing is
//! cached, so variable changes between renders show up in the output.
//!
//! Evaluation never fails from the caller's point of view. Any failure from
//! variable expansion or from the plugin becomes the text
//! `Plugin insertion failed: <message>`, so one broken plugin cannot stop the
//! rest of the page from rendering.

use thiserror::Error;

use crate::context::RenderContext;
use crate::plugin::{ParamValue, PluginError, PluginParams};
use crate::variables::VariableError;

/// Prefix of the inline marker that replaces a failed plugin's output.
pub const PLUGIN_FAILURE_PREFIX: &str = "Plugin insertion failed: ";

/// Why a plugin evaluation failed. Displays as the underlying message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// Expanding a parameter value failed
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// Looking up or running the plugin failed
    #[error(transparent)]
    Plugin(#[from] PluginError),
}

/// Outcome of evaluating a [`PluginContent`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The plugin's output
    Output(String),
    /// The failure marker text
    Failed(String),
}

impl Resolution {
    /// The text to insert into the page, whichever way evaluation went.
    pub fn into_text(self) -> String {
        match self {
            Self::Output(text) | Self::Failed(text) => text,
        }
    }

    /// Whether this is a failure marker.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// A plugin invocation whose output is computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginContent {
    plugin_name: String,
    params: PluginParams,
}

impl PluginContent {
    /// Create a node for `plugin_name` with raw, unexpanded parameters.
    pub fn new(plugin_name: impl Into<String>, params: PluginParams) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            params,
        }
    }

    /// Name of the plugin to invoke.
    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    /// The raw parameters as they were given at construction.
    pub fn params(&self) -> &PluginParams {
        &self.params
    }

    /// Evaluate the plugin and return its text, or the failure marker.
    pub fn resolve_text(&self, ctx: &RenderContext) -> String {
        self.resolve(ctx).into_text()
    }

    /// Evaluate the plugin, keeping track of whether it failed.
    pub fn resolve(&self, ctx: &RenderContext) -> Resolution {
        match self.evaluate(ctx) {
            Ok(output) => Resolution::Output(output),
            Err(err) => Resolution::Failed(format!("{PLUGIN_FAILURE_PREFIX}{err}")),
        }
    }

    /// Expand text parameters, then run the plugin with the expanded map.
    ///
    /// Opaque parameter values are copied through without expansion.
    pub fn evaluate(&self, ctx: &RenderContext) -> Result<String, EvaluationError> {
        let engine = ctx.engine();
        let expander = engine.variable_manager();

        let expanded = self
            .params
            .iter()
            .map(|(name, value)| -> Result<(String, ParamValue), EvaluationError> {
                let value = match value {
                    ParamValue::Text(raw) => ParamValue::Text(expander.expand_variables(ctx, raw)?),
                    opaque @ ParamValue::Opaque(_) => opaque.clone(),
                };
                Ok((name.clone(), value))
            })
            .collect::<Result<PluginParams, _>>()?;

        Ok(engine.plugin_manager().execute(ctx, &self.plugin_name, &expanded)?)
    }
}
