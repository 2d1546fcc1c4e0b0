//! Validated content collection.

use std::{
    collections::{BTreeMap, btree_map},
    path::PathBuf,
};

use blogkit_core::{BlogPost, Category};

/// One validated content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path relative to the collection root, without extension.
    pub slug: String,

    /// Source file.
    pub path: PathBuf,

    /// Validated frontmatter.
    pub post: BlogPost,

    /// Content after the header block.
    pub body: String,
}

/// All posts of a collection, keyed by slug.
#[derive(Debug, Default)]
pub struct Collection {
    entries: BTreeMap<String, Entry>,
}

impl Collection {
    /// Build a collection from entries. Later entries replace earlier ones
    /// with the same slug.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.slug.clone(), e)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by slug.
    pub fn get(&self, slug: &str) -> Option<&Entry> {
        self.entries.get(slug)
    }

    /// Entries in slug order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Entry> {
        self.entries.values()
    }

    /// Every entry, newest first.
    pub fn by_date(&self) -> Vec<&Entry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            b.post
                .pub_date
                .cmp(&a.post.pub_date)
                .then_with(|| a.post.title.cmp(&b.post.title))
        });
        entries
    }

    /// Published entries, newest first.
    pub fn published(&self) -> Vec<&Entry> {
        self.by_date()
            .into_iter()
            .filter(|e| e.post.published)
            .collect()
    }

    /// Category to entries (newest first). Entries appear under each of
    /// their categories.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&Entry>> {
        let mut index: BTreeMap<Category, Vec<&Entry>> = BTreeMap::new();
        for entry in self.by_date() {
            for category in &entry.post.category {
                let bucket = index.entry(*category).or_default();
                if !bucket.iter().any(|e| e.slug == entry.slug) {
                    bucket.push(entry);
                }
            }
        }
        index
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = btree_map::Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn entry(slug: &str, day: u32, published: bool, category: Vec<Category>) -> Entry {
        Entry {
            slug: slug.to_string(),
            path: PathBuf::from(format!("{slug}.md")),
            post: BlogPost {
                title: slug.to_string(),
                description: String::new(),
                category,
                pub_date: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
                updated_date: None,
                published,
            },
            body: String::new(),
        }
    }

    #[test]
    fn test_by_date_newest_first() {
        let collection = Collection::from_entries([
            entry("old", 1, true, vec![Category::Sql]),
            entry("new", 20, true, vec![Category::Sql]),
            entry("mid", 10, false, vec![Category::React]),
        ]);

        let slugs: Vec<_> = collection.by_date().iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_published_filters_drafts() {
        let collection = Collection::from_entries([
            entry("draft", 5, false, vec![Category::Astro]),
            entry("live", 4, true, vec![Category::Astro]),
        ]);

        let slugs: Vec<_> = collection
            .published()
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["live"]);
    }

    #[test]
    fn test_by_category_lists_posts_under_each_tag() {
        let collection = Collection::from_entries([
            entry("a", 1, true, vec![Category::Typescript, Category::React]),
            entry("b", 2, true, vec![Category::React, Category::React]),
        ]);

        let index = collection.by_category();
        assert_eq!(index[&Category::Typescript].len(), 1);
        let react: Vec<_> = index[&Category::React]
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(react, vec!["b", "a"]);
        assert!(!index.contains_key(&Category::Sql));
    }

    #[test]
    fn test_empty_collection() {
        let collection = Collection::default();
        assert!(collection.is_empty());
        assert!(collection.published().is_empty());
        assert!(collection.get("missing").is_none());
    }
}
