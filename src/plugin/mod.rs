//! Plugin contracts and the default plugin registry.
//!
//! A plugin is a named unit of content generation. It receives the
//! [`RenderContext`] and a parameter map and returns a string that is
//! inserted into the rendered page. Plugins are reached through the
//! [`PluginExecutor`] collaborator; [`PluginManager`] is the default
//! executor, a case-insensitive registry of [`WikiPlugin`] implementations.
//!
//! # Parameters
//!
//! Parameter values are either text or an opaque, already-resolved value:
//!
//! - [`ParamValue::Text`] values come from markup and go through variable
//!   expansion before the plugin sees them.
//! - [`ParamValue::Opaque`] values are handed to the plugin untouched.
//!
//! # Built-in plugins
//!
//! | Name | Parameters | Output |
//! |------|------------|--------|
//! | `CurrentTime` | `format` (strftime) | the local time |
//! | `Counter` | `name`, `increment`, `showResult` | the incremented counter |
//! | `Variable` | `var` | the value of a context variable |

mod builtin;
mod manager;

pub use builtin::{CounterPlugin, CurrentTimePlugin, VariablePlugin};
pub use manager::PluginManager;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::context::RenderContext;
use crate::core::did_you_mean;

/// Parameter name under which markup passes the text after the first line.
pub const BODY_PARAM: &str = "_body";

/// A single plugin parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Raw text, subject to variable expansion
    Text(String),
    /// An already-resolved value passed through unchanged
    Opaque(serde_json::Value),
}

impl ParamValue {
    /// The text of a [`ParamValue::Text`], or `None` for opaque values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Opaque(_) => None,
        }
    }

    /// Interpret the value as an integer.
    ///
    /// Text is trimmed and parsed; opaque values must be JSON integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Opaque(value) => value.as_i64(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Opaque(value)
    }
}

/// Parameters passed to a plugin, keyed by name.
pub type PluginParams = HashMap<String, ParamValue>;

/// Failures raised by plugin lookup or plugin execution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// No plugin is registered under the requested name
    #[error("No such plugin: '{name}'{}", did_you_mean(.suggestions))]
    NotFound {
        /// The requested name
        name: String,
        /// Registered plugins with similar names
        suggestions: Vec<String>,
    },

    /// The plugin exists but has been disabled by configuration
    #[error("Plugin '{name}' is disabled")]
    Disabled {
        /// The requested name
        name: String,
    },

    /// A parameter is missing or has an unusable value
    #[error("Plugin '{plugin}': invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// The plugin that rejected the parameter
        plugin: String,
        /// The parameter name
        param: String,
        /// What was wrong with it
        reason: String,
    },

    /// The plugin ran and failed
    #[error("{message}")]
    Failed {
        /// Human-readable failure message, shown verbatim
        message: String,
    },
}

impl PluginError {
    /// Shorthand for [`PluginError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Shorthand for [`PluginError::InvalidParameter`].
    pub fn invalid_parameter(
        plugin: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            plugin: plugin.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }
}

/// Plugin-execution collaborator.
///
/// Called synchronously once per evaluation of a deferred plugin node. Slow
/// plugins are the executor's concern; callers apply no timeout.
pub trait PluginExecutor: Send + Sync {
    /// Run the plugin called `plugin_name` with already-expanded parameters.
    fn execute(
        &self,
        ctx: &RenderContext,
        plugin_name: &str,
        params: &PluginParams,
    ) -> Result<String, PluginError>;
}

/// A plugin that can be registered with a [`PluginManager`].
pub trait WikiPlugin: Send + Sync {
    /// Name the plugin is invoked by in markup.
    fn name(&self) -> &str;

    /// Produce the plugin's output for one invocation.
    fn execute(&self, ctx: &RenderContext, params: &PluginParams) -> Result<String, PluginError>;
}
