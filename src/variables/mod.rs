//! Variable expansion for plugin parameters.
//!
//! Before a plugin runs, every textual parameter value is passed through a
//! [`VariableExpander`]. The expander reads the [`RenderContext`] but never
//! changes it; any failure is reported as a [`VariableError`] and later folded
//! into the plugin's inline failure marker.
//!
//! The default implementation, [`TemplateVariableExpander`], uses Tera syntax:
//!
//! ```text
//! [{CurrentTime format='{{ dateformat }}'}]
//! ```

mod template;

pub use template::TemplateVariableExpander;

use thiserror::Error;

use crate::context::RenderContext;
use crate::core::did_you_mean;

/// Failures raised while expanding variables in a parameter value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariableError {
    /// The value referenced a variable that is not defined in the context
    #[error("Unknown variable '{name}'{}", did_you_mean(.suggestions))]
    UnknownVariable {
        /// The variable name as written
        name: String,
        /// Defined variables with similar names
        suggestions: Vec<String>,
    },

    /// The value could not be parsed or rendered as a template
    #[error("Variable syntax error: {message}")]
    Syntax {
        /// Cleaned-up message from the template engine
        message: String,
    },
}

/// Variable-expansion collaborator.
///
/// Implementations must be pure with respect to the context: the same raw
/// string and the same variables give the same result.
pub trait VariableExpander: Send + Sync {
    /// Expand all variable references in `raw` using the variables of `ctx`.
    fn expand_variables(&self, ctx: &RenderContext, raw: &str) -> Result<String, VariableError>;
}

/// Expander that returns every string unchanged.
///
/// Useful for engines that pass parameters to plugins verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVariableExpander;

impl VariableExpander for NoopVariableExpander {
    fn expand_variables(&self, _ctx: &RenderContext, raw: &str) -> Result<String, VariableError> {
        Ok(raw.to_string())
    }
}
