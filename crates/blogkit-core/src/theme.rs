//! Theme configuration: design tokens for the CSS framework.
//!
//! The theme file declares which source files the CSS framework scans, font
//! stacks, gradient backgrounds and color tokens. Two color entries are
//! special: `light` and `dark` hold the per-mode token sets.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use wax::{Glob, Pattern};

use crate::error::{CoreError, Result};

/// Font stack entry that expands to the framework default for the family.
pub const DEFAULT_STACK_MARKER: &str = "...";

const DEFAULT_SANS: &[&str] = &[
    "ui-sans-serif",
    "system-ui",
    "sans-serif",
    "Apple Color Emoji",
    "Segoe UI Emoji",
    "Segoe UI Symbol",
    "Noto Color Emoji",
];

const DEFAULT_SERIF: &[&str] = &[
    "ui-serif",
    "Georgia",
    "Cambria",
    "Times New Roman",
    "Times",
    "serif",
];

const DEFAULT_MONO: &[&str] = &[
    "ui-monospace",
    "SFMono-Regular",
    "Menlo",
    "Monaco",
    "Consolas",
    "Liberation Mono",
    "Courier New",
    "monospace",
];

/// Framework default stack for a family name, if it has one.
pub fn default_font_stack(family: &str) -> Option<&'static [&'static str]> {
    match family {
        "sans" => Some(DEFAULT_SANS),
        "serif" => Some(DEFAULT_SERIF),
        "mono" => Some(DEFAULT_MONO),
        _ => None,
    }
}

/// Color scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub const ALL: [ColorMode; 2] = [Self::Light, Self::Dark];

    /// Key of the mode's token set under `theme.extend.colors`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level theme file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Globs selecting files scanned for utility classes.
    #[serde(default)]
    pub content: Vec<String>,

    /// Theme overrides.
    #[serde(default)]
    pub theme: ThemeSection,

    /// CSS framework plugins, in registration order.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// The `theme` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSection {
    /// Tokens merged into the framework defaults.
    #[serde(default)]
    pub extend: ThemeExtend,
}

/// Tokens merged into the framework defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeExtend {
    /// Family name to ordered font stack.
    #[serde(default)]
    pub font_family: BTreeMap<String, Vec<String>>,

    /// Name to CSS image value, usually a gradient.
    #[serde(default)]
    pub background_image: BTreeMap<String, String>,

    /// Named colors, palettes and per-mode token sets.
    #[serde(default)]
    pub colors: BTreeMap<String, ColorValue>,
}

/// A color entry: one value or a keyed set of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    Scale(BTreeMap<String, String>),
}

impl ColorValue {
    /// `(suffix, color)` pairs, numeric shade keys in numeric order.
    fn entries(&self) -> Vec<(Option<&str>, &str)> {
        match self {
            Self::Single(color) => vec![(None, color.as_str())],
            Self::Scale(scale) => {
                let mut entries: Vec<_> = scale.iter().collect();
                entries.sort_by(|(a, _), (b, _)| shade_order(a, b));
                entries
                    .into_iter()
                    .map(|(k, v)| (Some(k.as_str()), v.as_str()))
                    .collect()
            }
        }
    }
}

fn shade_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Whether a string is a CSS hex color or one of the keywords we allow.
pub fn is_valid_color(value: &str) -> bool {
    if matches!(value, "transparent" | "currentColor" | "inherit") {
        return true;
    }
    value.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

fn compile_glob(pattern: &str) -> Result<Glob<'static>> {
    let normalized = pattern.strip_prefix("./").unwrap_or(pattern);
    Glob::new(normalized)
        .map(Glob::into_owned)
        .map_err(|e| CoreError::theme(format!("invalid content glob '{pattern}': {e}")))
}

impl ThemeConfig {
    /// Load theme configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let theme = Self::read(path)?;
        for warning in theme.validate()? {
            tracing::warn!(path = %path.display(), "{warning}");
        }
        Ok(theme)
    }

    /// Parse a theme file without validating it.
    ///
    /// Callers that report warnings themselves pair this with [`Self::validate`].
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::theme(format!(
                "Theme file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CoreError::theme(format!(
                "Failed to parse theme file {}: {e}",
                path.display()
            ))
        })
    }

    /// Validate the theme, returning non-fatal warnings.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        if self.content.is_empty() {
            warnings.push("content lists no globs, no classes will be generated".to_string());
        }
        for pattern in &self.content {
            compile_glob(pattern)?;
        }

        for (name, value) in &self.theme.extend.colors {
            for (shade, color) in value.entries() {
                if !is_valid_color(color) {
                    let key = shade.map_or_else(|| name.clone(), |s| format!("{name}.{s}"));
                    return Err(CoreError::theme(format!(
                        "colors.{key} is not a valid color: {color}"
                    )));
                }
            }
        }

        for (name, stack) in &self.theme.extend.font_family {
            if stack.is_empty() {
                return Err(CoreError::theme(format!(
                    "fontFamily.{name} must list at least one font"
                )));
            }
        }

        for (name, image) in &self.theme.extend.background_image {
            if image.trim().is_empty() {
                return Err(CoreError::theme(format!(
                    "backgroundImage.{name} cannot be empty"
                )));
            }
        }

        let light = self.mode(ColorMode::Light);
        let dark = self.mode(ColorMode::Dark);
        match (light, dark) {
            (Some(light), Some(dark)) => {
                for token in light.keys().filter(|t| !dark.contains_key(*t)) {
                    warnings.push(format!(
                        "dark mode does not override '{token}', the light value will be used"
                    ));
                }
                for token in dark.keys().filter(|t| !light.contains_key(*t)) {
                    warnings.push(format!("dark mode token '{token}' has no light counterpart"));
                }
            }
            (None, None) => {}
            (Some(_), None) => {
                return Err(CoreError::theme("colors.light is set but colors.dark is missing"));
            }
            (None, Some(_)) => {
                return Err(CoreError::theme("colors.dark is set but colors.light is missing"));
            }
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin) {
                return Err(CoreError::theme(format!(
                    "plugin '{plugin}' is registered more than once"
                )));
            }
        }

        Ok(warnings)
    }

    /// Token set for a color mode, if declared as a keyed set.
    pub fn mode(&self, mode: ColorMode) -> Option<&BTreeMap<String, String>> {
        match self.theme.extend.colors.get(mode.as_str()) {
            Some(ColorValue::Scale(tokens)) => Some(tokens),
            _ => None,
        }
    }

    /// Resolve a mode token, falling back to the light value in dark mode.
    pub fn token(&self, mode: ColorMode, name: &str) -> Option<&str> {
        let own = self.mode(mode).and_then(|t| t.get(name));
        let fallback = || {
            self.mode(ColorMode::Light)
                .and_then(|t| t.get(name))
                .filter(|_| mode == ColorMode::Dark)
        };
        own.or_else(fallback).map(String::as_str)
    }

    /// Font stack for a family with the default-stack marker expanded.
    pub fn font_stack(&self, family: &str) -> Option<Vec<String>> {
        let stack = self.theme.extend.font_family.get(family)?;
        let defaults = default_font_stack(family).unwrap_or_default();

        Some(
            stack
                .iter()
                .flat_map(|font| {
                    if font == DEFAULT_STACK_MARKER {
                        defaults.iter().map(|f| (*f).to_string()).collect()
                    } else {
                        vec![font.clone()]
                    }
                })
                .collect(),
        )
    }

    /// Whether a path, relative to the project root, is scanned for classes.
    pub fn matches(&self, relative: &Path) -> Result<bool> {
        for pattern in &self.content {
            if compile_glob(pattern)?.is_match(relative) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// All files under `root` selected by the content globs, sorted.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let globs = self
            .content
            .iter()
            .map(|p| compile_glob(p))
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if globs.iter().any(|g| g.is_match(relative)) {
                files.push(entry.path().to_path_buf());
            }
        }

        files.sort();
        tracing::debug!(root = %root.display(), count = files.len(), "scanned theme content");
        Ok(files)
    }

    /// Render the tokens as CSS custom properties.
    pub fn to_css_variables(&self) -> String {
        CssVariables(self).to_string()
    }
}

/// Custom-property rendering of a theme.
///
/// Fonts, backgrounds, palettes and light tokens go on `:root`; dark tokens
/// go under `.dark`.
pub struct CssVariables<'a>(pub &'a ThemeConfig);

impl fmt::Display for CssVariables<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let theme = self.0;
        let extend = &theme.theme.extend;

        writeln!(f, ":root {{")?;

        for family in extend.font_family.keys() {
            if let Some(stack) = theme.font_stack(family) {
                let fonts: Vec<String> = stack.iter().map(|font| quote_font(font)).collect();
                writeln!(f, "  --font-{family}: {};", fonts.join(", "))?;
            }
        }

        for (name, image) in &extend.background_image {
            writeln!(f, "  --bg-{name}: {image};")?;
        }

        let modes: Vec<&str> = ColorMode::ALL.iter().map(ColorMode::as_str).collect();
        for (name, value) in extend.colors.iter().filter(|(n, _)| !modes.contains(&n.as_str())) {
            for (shade, color) in value.entries() {
                match shade {
                    Some(shade) => writeln!(f, "  --color-{name}-{shade}: {color};")?,
                    None => writeln!(f, "  --color-{name}: {color};")?,
                }
            }
        }

        if let Some(light) = theme.mode(ColorMode::Light) {
            for (token, color) in light {
                writeln!(f, "  --color-{token}: {color};")?;
            }
        }

        writeln!(f, "}}")?;

        if let Some(dark) = theme.mode(ColorMode::Dark) {
            writeln!(f)?;
            writeln!(f, ".dark {{")?;
            for (token, color) in dark {
                writeln!(f, "  --color-{token}: {color};")?;
            }
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

fn quote_font(font: &str) -> String {
    if font.contains(' ') {
        format!("\"{font}\"")
    } else {
        font.to_string()
    }
}
