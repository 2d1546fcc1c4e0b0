//! The blog post content schema.
//!
//! [`BlogPost::from_frontmatter`] is the only way to obtain a post: it checks
//! every field of an untyped header mapping, applies defaults and reports all
//! violations of a record at once.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::{
    category::Category,
    date::coerce_date,
    error::{CoreError, Issue, Result},
    frontmatter::{RawFrontmatter, parse_frontmatter},
};

/// A validated blog post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Post title, never empty.
    pub title: String,

    /// Summary used for listings and meta tags.
    pub description: String,

    /// One or more categories from the closed set.
    pub category: Vec<Category>,

    /// Publication date.
    #[serde(with = "crate::date::serde_date")]
    pub pub_date: DateTime<Utc>,

    /// Date of the last substantial revision.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "crate::date::serde_date::option"
    )]
    pub updated_date: Option<DateTime<Utc>>,

    /// Whether the post is listed. Omitted means unpublished.
    pub published: bool,
}

impl BlogPost {
    /// Frontmatter keys understood by the schema.
    pub const FIELDS: [&'static str; 6] = [
        "title",
        "description",
        "category",
        "pubDate",
        "updatedDate",
        "published",
    ];

    /// Validate an untyped header mapping.
    pub fn from_frontmatter(raw: &RawFrontmatter, path: &Path) -> Result<Self> {
        let mut issues = Vec::new();

        let title = string_field(raw, "title", &mut issues).filter(|title| {
            let ok = !title.trim().is_empty();
            if !ok {
                issues.push(Issue::new("title", "must not be empty"));
            }
            ok
        });
        let description = string_field(raw, "description", &mut issues);
        let category = category_field(raw, &mut issues);
        let pub_date = date_field(raw, "pubDate", &mut issues);
        let updated_date = optional_date_field(raw, "updatedDate", &mut issues);
        let published = bool_field(raw, "published", false, &mut issues);

        for key in raw.keys() {
            let known = key.as_str().is_some_and(|k| Self::FIELDS.contains(&k));
            if !known {
                debug!(path = %path.display(), key = ?key, "ignoring unknown frontmatter key");
            }
        }

        match (title, description, category, pub_date) {
            (Some(title), Some(description), Some(category), Some(pub_date))
                if issues.is_empty() =>
            {
                Ok(Self {
                    title,
                    description,
                    category,
                    pub_date,
                    updated_date,
                    published,
                })
            }
            _ => Err(CoreError::schema(path, issues)),
        }
    }

    /// Extract and validate the header of a content file, returning the post
    /// and its body.
    pub fn parse(content: &str, path: &Path) -> Result<(Self, String)> {
        let (raw, body) = parse_frontmatter(content, path)?;
        let post = Self::from_frontmatter(&raw, path)?;
        Ok((post, body))
    }

    /// Whether the post belongs to a category.
    pub fn has_category(&self, category: Category) -> bool {
        self.category.contains(&category)
    }

    /// Most recent of the publication and update dates.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_date
            .map_or(self.pub_date, |updated| updated.max(self.pub_date))
    }
}

/// Short name of a value's kind, for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Look up a key, treating an explicit `null` like a missing key.
fn present<'a>(raw: &'a RawFrontmatter, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn string_field(raw: &RawFrontmatter, key: &str, issues: &mut Vec<Issue>) -> Option<String> {
    match present(raw, key) {
        None => {
            issues.push(Issue::new(key, "required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(Issue::new(
                key,
                format!("expected string, received {}", kind(other)),
            ));
            None
        }
    }
}

fn category_field(raw: &RawFrontmatter, issues: &mut Vec<Issue>) -> Option<Vec<Category>> {
    const KEY: &str = "category";

    let items = match present(raw, KEY) {
        None => {
            issues.push(Issue::new(KEY, "required"));
            return None;
        }
        Some(Value::Sequence(items)) => items,
        Some(other) => {
            issues.push(Issue::new(
                KEY,
                format!("expected array of categories, received {}", kind(other)),
            ));
            return None;
        }
    };

    if items.is_empty() {
        issues.push(Issue::new(KEY, "must contain at least one category"));
        return None;
    }

    let before = issues.len();
    let categories: Vec<Category> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(tag) => match tag.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => {
                    issues.push(Issue::new(
                        KEY,
                        format!(
                            "must be one of: {}, received '{tag}'",
                            Category::allowed()
                        ),
                    ));
                    None
                }
            },
            other => {
                issues.push(Issue::new(
                    KEY,
                    format!("expected string, received {}", kind(other)),
                ));
                None
            }
        })
        .collect();

    (issues.len() == before).then_some(categories)
}

fn date_field(raw: &RawFrontmatter, key: &str, issues: &mut Vec<Issue>) -> Option<DateTime<Utc>> {
    let blank = |v: &&Value| matches!(v, Value::String(s) if s.trim().is_empty());
    match present(raw, key).filter(|v| !blank(v)) {
        None => {
            issues.push(Issue::new(key, "required"));
            None
        }
        Some(value) => coerce_or_report(value, key, issues),
    }
}

fn optional_date_field(
    raw: &RawFrontmatter,
    key: &str,
    issues: &mut Vec<Issue>,
) -> Option<DateTime<Utc>> {
    present(raw, key).and_then(|value| coerce_or_report(value, key, issues))
}

fn coerce_or_report(value: &Value, key: &str, issues: &mut Vec<Issue>) -> Option<DateTime<Utc>> {
    let coerced = coerce_date(value);
    if coerced.is_none() {
        let shown = match value {
            Value::String(s) => format!("'{s}'"),
            other => kind(other).to_string(),
        };
        issues.push(Issue::new(key, format!("expected a date, received {shown}")));
    }
    coerced
}

fn bool_field(raw: &RawFrontmatter, key: &str, default: bool, issues: &mut Vec<Issue>) -> bool {
    match raw.get(key) {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            issues.push(Issue::new(
                key,
                format!("expected boolean, received {}", kind(other)),
            ));
            default
        }
    }
}
