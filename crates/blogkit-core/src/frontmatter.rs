//! Frontmatter extraction for content files.
//!
//! The header block is parsed into an untyped mapping; typing and validation
//! happen in [`crate::schema`].

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::{
    error::{CoreError, Result},
    schema::BlogPost,
};

/// Untyped key-value mapping parsed from a content file's header block.
pub type RawFrontmatter = Mapping;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// Both delimiters must stand on a line of their own; a delimiter inside a
/// value does not close the header.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let (opening, after_first) = content[delimiter.len()..].split_once('\n')?;
    if !opening.trim().is_empty() {
        return None;
    }

    let mut offset = 0;
    for line in after_first.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = after_first[..offset].trim();
            let body = after_first[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse the header block of a content file into an untyped mapping.
///
/// A file without a header block yields an empty mapping and the full content
/// as body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawFrontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Mapping::new(), content.to_string()));
    };

    let raw = match format {
        FrontmatterFormat::Yaml => parse_yaml(fm_str, path)?,
        FrontmatterFormat::Toml => parse_toml(fm_str, path)?,
    };

    Ok((raw, body.to_string()))
}

fn parse_yaml(fm_str: &str, path: &Path) -> Result<RawFrontmatter> {
    let value: Value =
        serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(CoreError::frontmatter(
            path,
            "header block must be a key-value mapping",
        )),
    }
}

fn parse_toml(fm_str: &str, path: &Path) -> Result<RawFrontmatter> {
    let table: toml::Table =
        toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(table
        .into_iter()
        .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
        .collect())
}

/// Convert a TOML value into the YAML value model. Datetimes become text.
fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_to_yaml).collect())
        }
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Value::String(k), toml_to_yaml(v)))
                .collect(),
        ),
    }
}

/// Render a YAML header block for a post.
pub fn render_frontmatter(post: &BlogPost) -> Result<String> {
    let yaml = serde_yaml::to_string(post)?;
    Ok(format!("---\n{yaml}---\n"))
}
