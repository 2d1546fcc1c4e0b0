//! End-to-end tests for content collection.
//!
//! These tests validate whole directories, including the demo blog.

use std::{fs, path::Path};

use blogkit_content::{CollectionError, ContentCollector};
use blogkit_core::{Category, SiteConfig, ThemeConfig};
use chrono::Datelike;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

#[test]
fn test_demo_blog_collects() {
    let content_dir = Path::new("../../demos/blog/src/content/blog");
    if !content_dir.exists() {
        // Skip if running from different working directory
        return;
    }

    let collection = ContentCollector::new(content_dir)
        .collect()
        .expect("demo content should validate");
    assert_eq!(collection.len(), 3);

    let generics = collection.get("typescript-generics").expect("post");
    assert_eq!(
        generics.post.category,
        vec![Category::Typescript, Category::Concept]
    );
    assert!(generics.post.published);
    assert!(generics.post.updated_date.is_some());

    let rsc = collection.get("react-server-components").expect("post");
    assert_eq!(rsc.post.pub_date.year(), 2022);
    assert_eq!(rsc.post.pub_date.month(), 7);

    // TOML frontmatter without `published` defaults to a draft.
    let sql = collection.get("sql-vs-nosql").expect("post");
    assert!(!sql.post.published);
    assert!(sql.body.starts_with("A draft"));

    let published: Vec<_> = collection
        .published()
        .iter()
        .map(|e| e.slug.as_str())
        .collect();
    assert_eq!(
        published,
        vec!["typescript-generics", "react-server-components"]
    );
}

#[test]
fn test_demo_blog_configs_load() {
    let site_path = Path::new("../../demos/blog/site.toml");
    let theme_path = Path::new("../../demos/blog/theme.toml");
    if !site_path.exists() || !theme_path.exists() {
        return;
    }

    let site = SiteConfig::load(site_path).expect("site config");
    assert_eq!(site.site, "https://example.com");
    assert_eq!(site.meta.title, "Adrian's Blog");
    assert_eq!(site.meta.links.iter().count(), 3);
    assert_eq!(site.integrations[0].name(), "mdx");

    let theme = ThemeConfig::load(theme_path).expect("theme config");
    let warnings = theme.validate().expect("valid theme");
    assert_eq!(warnings.len(), 2, "select-text and select-bg lack dark values");

    let scanned = theme
        .scan(Path::new("../../demos/blog"))
        .expect("scan demo");
    assert!(scanned.iter().any(|p| p.ends_with("src/pages/index.astro")));
    assert!(scanned.iter().all(|p| !p.ends_with("site.toml")));
}

#[test]
fn test_invalid_file_aborts_collection() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path();
    write(
        root,
        "post-a.md",
        "---\ntitle: \"Post A\"\ndescription: \"...\"\ncategory: [typescript]\npubDate: \"2023-01-01\"\n---\nA",
    );
    write(
        root,
        "post-b.md",
        "---\ntitle: \"Post B\"\ncategory: [not-a-real-tag]\npubDate: \"2023-01-01\"\ndescription: \"...\"\n---\nB",
    );
    write(
        root,
        "nested/post-c.md",
        "---\ntitle: \"Post C\"\ndescription: \"...\"\ncategory: [react]\n---\nC",
    );

    let err = ContentCollector::new(root).collect().unwrap_err();
    let CollectionError::Invalid { failures } = &err else {
        panic!("expected validation failure, got {err}");
    };

    assert_eq!(failures.len(), 2);
    assert!(failures[0].path.ends_with("nested/post-c.md"));
    assert_eq!(failures[0].error.issues()[0].field, "pubDate");
    assert!(failures[1].path.ends_with("post-b.md"));
    assert_eq!(failures[1].error.issues()[0].field, "category");

    let msg = err.to_string();
    assert!(msg.starts_with("2 content file(s) failed validation"));
    assert!(msg.contains("must be one of: typescript"));
}

#[test]
fn test_lenient_collection_keeps_valid_posts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path();
    write(
        root,
        "good/index.md",
        "---\ntitle: Good\ndescription: ok\ncategory: [svelte]\npubDate: 2023-05-01\n---\n",
    );
    write(root, "bad.md", "no frontmatter at all");

    let (collection, failures) = ContentCollector::new(root)
        .collect_lenient()
        .expect("collect");

    assert_eq!(collection.len(), 1);
    let good = collection.get("good").expect("index slug");
    assert!(!good.post.published);
    assert!(good.post.updated_date.is_none());

    assert_eq!(failures.len(), 1);
    let fields: Vec<_> = failures[0]
        .error
        .issues()
        .iter()
        .map(|i| i.field.as_str())
        .collect();
    assert_eq!(fields, vec!["title", "description", "category", "pubDate"]);
}

#[test]
fn test_category_index_spans_collection() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path();
    for (name, cats, day) in [
        ("one", "[web3, concept]", 1),
        ("two", "[concept]", 2),
        ("three", "[solidjs]", 3),
    ] {
        write(
            root,
            &format!("{name}.md"),
            &format!(
                "---\ntitle: {name}\ndescription: d\ncategory: {cats}\npubDate: 2023-06-0{day}\npublished: true\n---\n"
            ),
        );
    }

    let collection = ContentCollector::new(root).collect().expect("collect");
    let index = collection.by_category();

    let concept: Vec<_> = index[&Category::Concept]
        .iter()
        .map(|e| e.slug.as_str())
        .collect();
    assert_eq!(concept, vec!["two", "one"]);
    assert_eq!(index[&Category::Solidjs].len(), 1);
    assert_eq!(index.len(), 3);
}
