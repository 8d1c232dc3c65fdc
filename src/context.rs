//! Rendering context and engine handles.
//!
//! A [`RenderContext`] carries the page- and request-scoped state that plugin
//! evaluation needs: the page name, the page variables, and a handle to the
//! [`WikiEngine`] whose collaborators expand variables and execute plugins.
//!
//! Contexts are shared through `Arc`. Documents refer to them weakly (see
//! [`WikiDocument`](crate::document::WikiDocument)) so a document never keeps
//! its context alive. Variables live in a `DashMap` so plugins with side
//! effects (such as `Counter`) can update them through a shared reference
//! while other documents render in parallel with their own contexts.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::plugin::{PluginExecutor, PluginManager};
use crate::variables::{TemplateVariableExpander, VariableExpander};

/// Engine-wide collaborators shared by every rendering context.
pub struct WikiEngine {
    variable_manager: Arc<dyn VariableExpander>,
    plugin_manager: Arc<dyn PluginExecutor>,
}

impl WikiEngine {
    /// Create an engine from explicit collaborators.
    pub fn new(
        variable_manager: Arc<dyn VariableExpander>,
        plugin_manager: Arc<dyn PluginExecutor>,
    ) -> Self {
        Self {
            variable_manager,
            plugin_manager,
        }
    }

    /// Engine with the Tera-backed variable expander and the given plugin manager.
    #[must_use]
    pub fn with_plugins(plugins: PluginManager) -> Self {
        Self::new(Arc::new(TemplateVariableExpander::new()), Arc::new(plugins))
    }

    /// The variable-expansion collaborator.
    pub fn variable_manager(&self) -> &dyn VariableExpander {
        self.variable_manager.as_ref()
    }

    /// The plugin-execution collaborator.
    pub fn plugin_manager(&self) -> &dyn PluginExecutor {
        self.plugin_manager.as_ref()
    }
}

impl Default for WikiEngine {
    fn default() -> Self {
        Self::with_plugins(PluginManager::with_builtins())
    }
}

impl fmt::Debug for WikiEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiEngine").finish_non_exhaustive()
    }
}

/// Page-scoped state for one rendering pass.
#[derive(Debug)]
pub struct RenderContext {
    page_name: String,
    engine: Arc<WikiEngine>,
    variables: DashMap<String, String>,
}

impl RenderContext {
    /// Create a context for `page_name` with no variables.
    pub fn new(engine: Arc<WikiEngine>, page_name: impl Into<String>) -> Self {
        Self {
            page_name: page_name.into(),
            engine,
            variables: DashMap::new(),
        }
    }

    /// Seed the context with variables, replacing any with the same name.
    #[must_use]
    pub fn with_variables<I, K, V>(self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in variables {
            self.variables.insert(name.into(), value.into());
        }
        self
    }

    /// Name of the page being rendered.
    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    /// The engine this context renders with.
    pub fn engine(&self) -> &WikiEngine {
        &self.engine
    }

    /// Current value of a variable.
    pub fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(|value| value.value().clone())
    }

    /// Set a variable, returning its previous value.
    pub fn set_variable(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.variables.insert(name.into(), value.into())
    }

    /// Remove a variable, returning its value.
    pub fn remove_variable(&self, name: &str) -> Option<String> {
        self.variables.remove(name).map(|(_, value)| value)
    }

    /// Sorted snapshot of all variables.
    pub fn variables(&self) -> BTreeMap<String, String> {
        self.variables
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_roundtrip() {
        let ctx = RenderContext::new(Arc::new(WikiEngine::default()), "Main")
            .with_variables([("author", "Alice"), ("title", "Home")]);

        assert_eq!(ctx.page_name(), "Main");
        assert_eq!(ctx.variable("author").as_deref(), Some("Alice"));
        assert_eq!(ctx.set_variable("author", "Bob").as_deref(), Some("Alice"));
        assert_eq!(ctx.remove_variable("title").as_deref(), Some("Home"));
        assert_eq!(ctx.variable("title"), None);

        let snapshot = ctx.variables();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["author"], "Bob");
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderContext>();
        assert_send_sync::<WikiEngine>();
    }
}
