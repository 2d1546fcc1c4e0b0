//! Check command - validate configuration and content

use std::path::Path;

use blogkit_content::ContentCollector;
use blogkit_core::{SiteConfig, ThemeConfig};
use color_eyre::eyre::{Result, bail};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates site configuration, theme configuration and every content file.
pub fn run(site_path: &Path, theme_path: &Path, content_dir: &Path, strict: bool) -> Result<()> {
    tracing::info!(
        ?site_path,
        ?theme_path,
        ?content_dir,
        strict,
        "Checking configuration and content"
    );

    let result = validate(site_path, theme_path, content_dir);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every error and warning without printing a summary.
pub fn validate(site_path: &Path, theme_path: &Path, content_dir: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking site configuration...");
    match SiteConfig::load(site_path) {
        Ok(config) => {
            println!("  ✓ Site configuration valid ({})", config.site);
            check_site_values(&config, &mut result);
        }
        Err(e) => {
            println!("  ✗ Site configuration invalid: {e}");
            result.add_error(format!("Site configuration error: {e}"));
        }
    }

    println!("\nChecking theme configuration...");
    match ThemeConfig::read(theme_path).and_then(|theme| theme.validate()) {
        Ok(warnings) => {
            println!("  ✓ Theme configuration valid");
            for warning in warnings {
                result.add_warning(format!("theme: {warning}"));
            }
        }
        Err(e) => {
            println!("  ✗ Theme configuration invalid: {e}");
            result.add_error(format!("Theme configuration error: {e}"));
        }
    }

    println!("\nChecking content files...");
    validate_content_files(content_dir, &mut result);

    result
}

/// Validate all content files in the collection directory.
fn validate_content_files(dir: &Path, result: &mut ValidationResult) {
    let collector = ContentCollector::new(dir);
    let (collection, failures) = match collector.collect_lenient() {
        Ok(collected) => collected,
        Err(e) => {
            println!("  ✗ {e}");
            result.add_error(e.to_string());
            return;
        }
    };

    let checked = collection.len() + failures.len();
    if checked == 0 {
        result.add_warning(format!("No content files found in {}", dir.display()));
        println!("  ⚠ no content files");
        return;
    }

    for failure in &failures {
        result.add_error(failure.error.to_string());
    }

    if failures.is_empty() {
        println!("  ✓ All {checked} content files valid");
    } else {
        println!("  ✗ {}/{checked} content files have errors", failures.len());
    }

    let drafts = collection.iter().filter(|e| !e.post.published).count();
    if drafts > 0 {
        println!("  ℹ {drafts} unpublished post(s)");
    }
}

/// Check site configuration values for common issues.
fn check_site_values(config: &SiteConfig, result: &mut ValidationResult) {
    if config.site.ends_with('/') {
        result.add_warning("site should not have a trailing slash");
    }

    if config.meta.description.is_empty() {
        result.add_warning("meta.description is empty");
    }

    if !config.has_integration("sitemap") {
        result.add_warning("sitemap integration is not registered");
    }
}
