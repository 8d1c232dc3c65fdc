//! Registry of named plugins.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use super::builtin::{CounterPlugin, CurrentTimePlugin, VariablePlugin};
use super::{PluginError, PluginExecutor, PluginParams, WikiPlugin};
use crate::context::RenderContext;
use crate::core::find_similar;

/// Case-insensitive registry of [`WikiPlugin`]s, usable as a [`PluginExecutor`].
///
/// Names may be written fully qualified in markup (`org.example.Counter`); when
/// the full name is not registered, the part after the last `.` is tried.
#[derive(Default)]
pub struct PluginManager {
    plugins: BTreeMap<String, Arc<dyn WikiPlugin>>,
    disabled: HashSet<String>,
}

impl PluginManager {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in plugins.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut manager = Self::new();
        manager.register(CurrentTimePlugin);
        manager.register(CounterPlugin);
        manager.register(VariablePlugin);
        manager
    }

    /// Register a plugin under its own name, returning any plugin it replaces.
    pub fn register<P>(&mut self, plugin: P) -> Option<Arc<dyn WikiPlugin>>
    where
        P: WikiPlugin + 'static,
    {
        let key = plugin.name().to_lowercase();
        tracing::debug!("Registering plugin '{}'", plugin.name());
        self.plugins.insert(key, Arc::new(plugin))
    }

    /// Disable a plugin by name. Disabled plugins stay registered but refuse to run.
    pub fn disable(&mut self, name: &str) {
        self.disabled.insert(name.to_lowercase());
    }

    /// Whether a plugin with this name is registered and not disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Registered plugin names, sorted case-insensitively.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.values().map(|plugin| plugin.name()).collect()
    }

    fn lookup(&self, name: &str) -> Result<&Arc<dyn WikiPlugin>, PluginError> {
        let full = name.trim().to_lowercase();
        let short = full.rsplit('.').next().unwrap_or(&full).to_string();

        let (key, plugin) = [full, short]
            .into_iter()
            .find_map(|key| self.plugins.get(&key).map(|plugin| (key, plugin)))
            .ok_or_else(|| PluginError::NotFound {
                name: name.to_string(),
                suggestions: find_similar(name, self.plugin_names()),
            })?;

        if self.disabled.contains(&key) {
            return Err(PluginError::Disabled {
                name: plugin.name().to_string(),
            });
        }

        Ok(plugin)
    }
}

impl PluginExecutor for PluginManager {
    fn execute(
        &self,
        ctx: &RenderContext,
        plugin_name: &str,
        params: &PluginParams,
    ) -> Result<String, PluginError> {
        let plugin = self.lookup(plugin_name)?;
        tracing::debug!(
            "Executing plugin '{}' on page '{}' with {} parameter(s)",
            plugin.name(),
            ctx.page_name(),
            params.len()
        );
        plugin.execute(ctx, params)
    }
}

impl fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginManager")
            .field("plugins", &self.plugin_names())
            .field("disabled", &self.disabled)
            .finish()
    }
}
