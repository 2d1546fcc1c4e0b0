//! Error types for the blogkit core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// A single schema violation: the offending field and the unmet constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Frontmatter key that failed validation.
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Core error types for blogkit.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Site configuration loading or validation error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Theme configuration loading or validation error.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Header block could not be parsed as YAML or TOML.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Frontmatter parsed but violates the content schema.
    #[error("Invalid frontmatter in {path}: {}", join_issues(.issues))]
    Schema { path: PathBuf, issues: Vec<Issue> },

    /// Two content files resolve to the same slug.
    #[error("Duplicate slug in {path}: '{slug}' is defined by more than one file")]
    DuplicateSlug { path: PathBuf, slug: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new theme error.
    pub fn theme(message: impl Into<String>) -> Self {
        Self::Theme(message.into())
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new schema error from collected issues.
    pub fn schema(path: impl Into<PathBuf>, issues: Vec<Issue>) -> Self {
        Self::Schema {
            path: path.into(),
            issues,
        }
    }

    /// Create a new duplicate slug error.
    pub fn duplicate_slug(path: impl Into<PathBuf>, slug: impl Into<String>) -> Self {
        Self::DuplicateSlug {
            path: path.into(),
            slug: slug.into(),
        }
    }

    /// Schema issues carried by this error, empty for any other kind.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Schema { issues, .. } => issues,
            _ => &[],
        }
    }
}
