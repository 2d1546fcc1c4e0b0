//! The closed set of post categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A blog post category.
///
/// The set is closed: frontmatter naming any other tag fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Typescript,
    React,
    Frontend,
    Backend,
    Sql,
    Nosql,
    Svelte,
    Astro,
    Solidjs,
    Web3,
    Concept,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 11] = [
        Self::Typescript,
        Self::React,
        Self::Frontend,
        Self::Backend,
        Self::Sql,
        Self::Nosql,
        Self::Svelte,
        Self::Astro,
        Self::Solidjs,
        Self::Web3,
        Self::Concept,
    ];

    /// The tag as written in frontmatter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::React => "react",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Sql => "sql",
            Self::Nosql => "nosql",
            Self::Svelte => "svelte",
            Self::Astro => "astro",
            Self::Solidjs => "solidjs",
            Self::Web3 => "web3",
            Self::Concept => "concept",
        }
    }

    /// Comma separated list of allowed tags, for error messages.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tag is not part of the category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}', must be one of: {}",
            self.0,
            Category::allowed()
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("TypeScript".parse::<Category>().is_err());
    }

    #[test]
    fn test_unknown_tag_lists_allowed_values() {
        let err = "not-a-real-tag".parse::<Category>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("not-a-real-tag"));
        assert!(msg.contains("typescript, react, frontend"));
    }

    #[test]
    fn test_serde_uses_lowercase_tags() {
        let yaml = serde_yaml::to_string(&Category::Web3).expect("serialize");
        assert_eq!(yaml.trim(), "web3");
        let back: Category = serde_yaml::from_str("solidjs").expect("deserialize");
        assert_eq!(back, Category::Solidjs);
    }
}
