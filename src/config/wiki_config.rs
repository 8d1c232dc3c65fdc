//! The configuration file schema and loader.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use crate::context::{RenderContext, WikiEngine};
use crate::core::WikiError;
use crate::plugin::PluginManager;

/// Environment variable that overrides the default configuration path.
pub const CONFIG_ENV_VAR: &str = "WIKIRENDER_CONFIG";

/// Output format for rendered pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, plugin failures shown as marker text
    #[default]
    Text,
    /// Escaped HTML, plugin failures wrapped in `<span class="error">`
    Html,
}

/// `[plugins]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Plugins that are registered but refuse to run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

/// `[render]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// The wikirender configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Variables seeded into every rendering context
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    /// Plugin settings
    #[serde(default)]
    pub plugins: PluginSettings,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderSettings,
}

impl WikiConfig {
    /// Load from `path` if given, otherwise from the default location.
    ///
    /// An explicit path must exist. The default path may be absent, in which
    /// case the default configuration is returned.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => {
                let path = expand_path(&path)?;
                Self::load_from(&path).await
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path).await
                } else {
                    tracing::debug!("No configuration at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a configuration file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(WikiError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Default configuration path, honouring [`CONFIG_ENV_VAR`].
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return expand_path(Path::new(&path));
            }
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine configuration directory"))?;
        Ok(config_dir.join("wikirender").join("config.toml"))
    }

    /// Reject settings that would only fail later.
    fn validate(&self) -> Result<(), WikiError> {
        if let Some(name) = self.variables.keys().find(|name| name.trim().is_empty()) {
            return Err(WikiError::ConfigError {
                message: format!("variable names must not be empty (found {name:?})"),
            });
        }
        if self.plugins.disabled.iter().any(|name| name.trim().is_empty()) {
            return Err(WikiError::ConfigError {
                message: "[plugins] disabled contains an empty name".to_string(),
            });
        }
        Ok(())
    }

    /// Build an engine with the built-in plugins, minus the disabled ones.
    #[must_use]
    pub fn build_engine(&self) -> WikiEngine {
        let mut plugins = PluginManager::with_builtins();
        for name in &self.plugins.disabled {
            plugins.disable(name);
        }
        WikiEngine::with_plugins(plugins)
    }

    /// Create a rendering context seeded with the configured variables.
    pub fn new_context(&self, engine: Arc<WikiEngine>, page_name: impl Into<String>) -> RenderContext {
        RenderContext::new(engine, page_name).with_variables(self.variables.clone())
    }
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand config path {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
