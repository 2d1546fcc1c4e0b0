//! Theme command - print design tokens as CSS custom properties

use std::path::Path;

use blogkit_core::ThemeConfig;
use color_eyre::eyre::{Result, WrapErr};

/// Run the theme command.
///
/// With `files`, lists the sources the content globs select (relative to the
/// theme file's directory) instead of printing CSS.
pub fn run(theme_path: &Path, files: bool) -> Result<()> {
    let theme = ThemeConfig::load(theme_path).wrap_err("Failed to load theme")?;

    if files {
        let root = theme_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        for file in theme.scan(root).wrap_err("Failed to scan content globs")? {
            println!("{}", file.strip_prefix(root).unwrap_or(&file).display());
        }
        return Ok(());
    }

    print!("{}", theme.to_css_variables());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_theme_fails() {
        let err = run(Path::new("/nonexistent/theme.toml"), false).unwrap_err();
        assert!(format!("{err:#}").contains("Theme file not found"));
    }

    #[test]
    fn test_prints_tokens() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("theme.toml");
        std::fs::write(
            &path,
            "content = [\"src/**/*.md\"]\n\n[theme.extend.colors]\nbrand = \"#007ebd\"\n",
        )
        .expect("write");

        assert!(run(&path, false).is_ok());
        assert!(run(&path, true).is_ok());
    }
}
