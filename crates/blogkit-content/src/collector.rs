//! Content collection discovery and validation.
//!
//! Walks a collection directory and validates every content file against the
//! post schema. Files are independent of each other, so validation fans out
//! over rayon; results do not depend on the order in which files finish.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use blogkit_core::{BlogPost, CoreError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::collection::{Collection, Entry};

/// File extensions treated as content.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// A content file that failed to load or validate.
#[derive(Debug)]
pub struct Failure {
    /// Offending file.
    pub path: PathBuf,

    /// Why it failed.
    pub error: CoreError,
}

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// IO error while walking the directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The collection directory does not exist.
    #[error("content directory not found: {0}")]
    Missing(PathBuf),

    /// One or more files violate the schema. Fatal to the build.
    #[error("{} content file(s) failed validation:\n{}", .failures.len(), describe(.failures))]
    Invalid { failures: Vec<Failure> },
}

fn describe(failures: &[Failure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {}", f.error))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Content collector that walks a collection directory and validates files.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Collection root.
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Collect and validate every content file.
    ///
    /// Any invalid file aborts the collection with all failures listed.
    pub fn collect(&self) -> Result<Collection> {
        let (collection, failures) = self.collect_lenient()?;
        if failures.is_empty() {
            Ok(collection)
        } else {
            Err(CollectionError::Invalid { failures })
        }
    }

    /// Collect every valid file and report the invalid ones separately.
    pub fn collect_lenient(&self) -> Result<(Collection, Vec<Failure>)> {
        if !self.content_dir.is_dir() {
            return Err(CollectionError::Missing(self.content_dir.clone()));
        }

        info!(dir = %self.content_dir.display(), "collecting content");

        let files = self.find_content_files()?;
        info!(count = files.len(), "found content files");

        let results: Vec<_> = files
            .par_iter()
            .map(|path| (path, self.parse_file(path)))
            .collect();

        let mut entries: Vec<Entry> = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (path, result) in results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    warn!(path = %path.display(), %error, "invalid content file");
                    failures.push(Failure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        // Two files resolving to one slug (post.md and post.mdx) are both rejected.
        let mut by_slug: HashMap<String, Vec<Entry>> = HashMap::new();
        for entry in entries {
            by_slug.entry(entry.slug.clone()).or_default().push(entry);
        }
        let mut unique = Vec::with_capacity(by_slug.len());
        for (slug, group) in by_slug {
            if group.len() == 1 {
                unique.extend(group);
                continue;
            }
            for entry in group {
                failures.push(Failure {
                    error: CoreError::duplicate_slug(&entry.path, &slug),
                    path: entry.path,
                });
            }
        }

        failures.sort_by(|a, b| a.path.cmp(&b.path));
        let collection = Collection::from_entries(unique);

        info!(
            posts = collection.len(),
            failures = failures.len(),
            "content collection complete"
        );

        Ok((collection, failures))
    }

    /// Find all content files in the collection directory.
    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        walk_dir(&self.content_dir, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Parse and validate a single content file.
    fn parse_file(&self, path: &Path) -> std::result::Result<Entry, CoreError> {
        debug!(path = %path.display(), "validating file");

        let content = fs::read_to_string(path)?;
        let (post, body) = BlogPost::parse(&content, path)?;

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);

        Ok(Entry {
            slug: slug_for(relative),
            path: path.to_path_buf(),
            post,
            body,
        })
    }
}

/// Recursively walk a directory for content files.
///
/// Entries starting with `.` or `_` are skipped.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let ignored = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(['.', '_']));
        if ignored {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, files)?;
        } else if path.is_file() && is_content_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Slug for a path relative to the collection root.
///
/// `posts/hello.md` becomes `posts/hello`; `posts/hello/index.md` becomes
/// `posts/hello`.
pub fn slug_for(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let path = if without_ext.file_name().is_some_and(|n| n == "index") {
        without_ext.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        without_ext
    };

    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
