//! Global site metadata.
//!
//! Loaded once as part of [`crate::SiteConfig`] and handed out by reference;
//! nothing mutates it after startup.

use serde::{Deserialize, Serialize};

/// Read-only site-wide metadata used by layouts and feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMeta {
    /// Site title.
    pub title: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: String,

    /// Greeting shown on the landing page.
    #[serde(default)]
    pub welcome: Option<String>,

    /// Longer introduction shown under the greeting.
    #[serde(default)]
    pub introduction: Option<String>,

    /// Author social profiles.
    #[serde(default)]
    pub links: SocialLinks,
}

/// Social profile URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinks {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl SocialLinks {
    /// Configured links as `(network, url)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("github", self.github.as_deref()),
            ("twitter", self.twitter.as_deref()),
            ("linkedin", self.linkedin.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.map(|u| (name, u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_skip_unset_networks() {
        let links = SocialLinks {
            github: Some("https://github.com/someone".to_string()),
            twitter: None,
            linkedin: Some("https://www.linkedin.com/in/someone/".to_string()),
        };

        let names: Vec<_> = links.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["github", "linkedin"]);
    }

    #[test]
    fn test_meta_from_toml_defaults() {
        let meta: SiteMeta = toml::from_str(r#"title = "A Blog""#).expect("parse");
        assert_eq!(meta.title, "A Blog");
        assert!(meta.description.is_empty());
        assert!(meta.welcome.is_none());
        assert_eq!(meta.links.iter().count(), 0);
    }
}
