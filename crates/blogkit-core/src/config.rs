//! Site configuration management.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::{CoreError, Result},
    site::SiteMeta,
};

/// Main configuration structure for a blogkit site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical site URL (e.g., "https://example.com").
    pub site: String,

    /// Markdown pipeline settings.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Build pipeline extensions, in registration order.
    #[serde(default = "default_integrations")]
    pub integrations: Vec<PluginRef>,

    /// Global site metadata.
    pub meta: SiteMeta,
}

/// Markdown pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Syntax highlighting settings.
    #[serde(default)]
    pub shiki_config: ShikiConfig,

    /// Markdown AST transforms, applied in order.
    #[serde(default)]
    pub remark_plugins: Vec<PluginRef>,

    /// HTML AST transforms, applied in order.
    #[serde(default)]
    pub rehype_plugins: Vec<PluginRef>,
}

/// Syntax highlighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShikiConfig {
    /// Highlighting theme name.
    #[serde(default = "default_shiki_theme")]
    pub theme: String,

    /// Whether long code lines wrap.
    #[serde(default)]
    pub wrap: bool,
}

/// Reference to a plugin or integration, optionally parameterized.
///
/// Written either as a bare name (`"remark-mermaid"`) or as a table
/// (`{ name = "remark-toc", options = { heading = "contents" } }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginRef {
    Name(String),
    Configured {
        name: String,
        #[serde(default)]
        options: toml::Table,
    },
}

impl PluginRef {
    /// Plugin name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Configured { name, .. } => name,
        }
    }

    /// Plugin options, if any were given.
    pub fn options(&self) -> Option<&toml::Table> {
        match self {
            Self::Name(_) => None,
            Self::Configured { options, .. } => Some(options),
        }
    }
}

fn default_integrations() -> Vec<PluginRef> {
    ["mdx", "sitemap", "tailwind"]
        .into_iter()
        .map(|name| PluginRef::Name(name.to_string()))
        .collect()
}

fn default_shiki_theme() -> String {
    "css-variables".to_string()
}

impl Default for ShikiConfig {
    fn default() -> Self {
        Self {
            theme: default_shiki_theme(),
            wrap: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        tracing::debug!(site = %config.site, "loaded site configuration");
        Ok(config)
    }

    /// Load configuration with `BLOGKIT__*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("BLOGKIT").separator("__"))
            .build()?;

        let config: SiteConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.is_empty() {
            return Err(CoreError::config("site cannot be empty"));
        }

        let url = Url::parse(&self.site).map_err(|e| {
            CoreError::config_with_source(format!("site is not a valid URL: {}", self.site), e)
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::config(format!(
                "site must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.site.ends_with('/') {
            tracing::warn!("site should not have a trailing slash");
        }

        if self.markdown.shiki_config.theme.is_empty() {
            return Err(CoreError::config(
                "markdown.shikiConfig.theme cannot be empty",
            ));
        }

        if self.meta.title.is_empty() {
            return Err(CoreError::config("meta.title cannot be empty"));
        }

        check_unique("markdown.remarkPlugins", &self.markdown.remark_plugins)?;
        check_unique("markdown.rehypePlugins", &self.markdown.rehype_plugins)?;
        check_unique("integrations", &self.integrations)?;

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Whether an integration is registered.
    pub fn has_integration(&self, name: &str) -> bool {
        self.integrations.iter().any(|i| i.name() == name)
    }
}

fn check_unique(list: &str, plugins: &[PluginRef]) -> Result<()> {
    let mut seen = HashSet::new();
    for plugin in plugins {
        if plugin.name().is_empty() {
            return Err(CoreError::config(format!("{list} contains an unnamed entry")));
        }
        if !seen.insert(plugin.name()) {
            return Err(CoreError::config(format!(
                "{list} registers '{}' more than once",
                plugin.name()
            )));
        }
    }
    Ok(())
}
