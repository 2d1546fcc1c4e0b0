//! Posts command - list validated posts

use std::path::Path;

use blogkit_content::{Collection, ContentCollector, Entry};
use blogkit_core::BlogPost;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;

#[derive(Serialize)]
struct Listing<'a> {
    slug: &'a str,
    #[serde(flatten)]
    post: &'a BlogPost,
}

/// Run the posts command.
///
/// Fails like a build would if any post is invalid.
pub fn run(content_dir: &Path, all: bool, json: bool) -> Result<()> {
    let collection = ContentCollector::new(content_dir)
        .collect()
        .wrap_err("Content validation failed")?;

    println!("{}", render(&collection, all, json)?);
    Ok(())
}

fn select(collection: &Collection, all: bool) -> Vec<&Entry> {
    if all {
        collection.by_date()
    } else {
        collection.published()
    }
}

/// Render the listing as a table or as JSON.
pub fn render(collection: &Collection, all: bool, json: bool) -> Result<String> {
    let entries = select(collection, all);

    if json {
        let listings: Vec<_> = entries
            .iter()
            .map(|e| Listing {
                slug: &e.slug,
                post: &e.post,
            })
            .collect();
        return serde_json::to_string_pretty(&listings).wrap_err("Failed to serialize posts");
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|e| {
            let categories: Vec<&str> = e.post.category.iter().map(|c| c.as_str()).collect();
            let marker = if e.post.published { " " } else { "*" };
            format!(
                "{marker} {}  {:<40}  [{}]",
                e.post.pub_date.format("%Y-%m-%d"),
                e.post.title,
                categories.join(", ")
            )
        })
        .collect();

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn collection() -> (tempfile::TempDir, Collection) {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(
            dir.path().join("live.md"),
            "---\ntitle: Live\ndescription: d\ncategory: [react]\npubDate: 2023-01-02\npublished: true\n---\n",
        )
        .expect("write");
        fs::write(
            dir.path().join("draft.md"),
            "---\ntitle: Draft\ndescription: d\ncategory: [sql, backend]\npubDate: 2023-01-03\n---\n",
        )
        .expect("write");
        let collection = ContentCollector::new(dir.path())
            .collect()
            .expect("collect");
        (dir, collection)
    }

    #[test]
    fn test_table_lists_published_only_by_default() {
        let (_dir, collection) = collection();
        let out = render(&collection, false, false).expect("render");
        assert!(out.contains("2023-01-02  Live"));
        assert!(!out.contains("Draft"));
    }

    #[test]
    fn test_table_marks_drafts() {
        let (_dir, collection) = collection();
        let out = render(&collection, true, false).expect("render");
        let first = out.lines().next().expect("line");
        assert!(first.starts_with("* 2023-01-03  Draft"));
        assert!(first.ends_with("[sql, backend]"));
    }

    #[test]
    fn test_json_uses_frontmatter_keys() {
        let (_dir, collection) = collection();
        let out = render(&collection, true, true).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");

        let first = &value[0];
        assert_eq!(first["slug"], "draft");
        assert_eq!(first["pubDate"], "2023-01-03");
        assert_eq!(first["published"], false);
        assert_eq!(first["category"][1], "backend");
        assert!(first.get("updatedDate").is_none());
    }
}
