//! New command - create a post with valid frontmatter

use std::{
    fs,
    path::{Path, PathBuf},
};

use blogkit_core::{BlogPost, Category, frontmatter::render_frontmatter};
use chrono::{NaiveTime, Utc};
use color_eyre::eyre::{Result, WrapErr, bail};

/// Run the new command.
///
/// Creates an unpublished post dated today. Existing files are never
/// overwritten.
pub fn run(
    content_dir: &Path,
    slug: &str,
    title: Option<&str>,
    categories: &[Category],
) -> Result<PathBuf> {
    tracing::info!(?content_dir, slug, ?categories, "Creating new post");

    let file_path = post_path(content_dir, slug);
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    let post = scaffold(slug, title, categories);
    let header = render_frontmatter(&post).wrap_err("Failed to render frontmatter")?;
    let content = format!("{header}\nWrite your content here.\n");

    // The scaffold must pass the same checks as any other post.
    BlogPost::parse(&content, &file_path).wrap_err("Generated frontmatter is invalid")?;

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }
    fs::write(&file_path, content).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new post");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

fn post_path(content_dir: &Path, slug: &str) -> PathBuf {
    let full_path = content_dir.join(slug.trim_matches('/'));
    if full_path.extension().is_some() {
        full_path
    } else {
        full_path.with_extension("md")
    }
}

fn scaffold(slug: &str, title: Option<&str>, categories: &[Category]) -> BlogPost {
    let title = title.map(str::to_string).unwrap_or_else(|| title_from_slug(slug));
    let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

    BlogPost {
        title,
        description: String::new(),
        category: categories.to_vec(),
        pub_date: today,
        updated_date: None,
        published: false,
    }
}

fn title_from_slug(slug: &str) -> String {
    let stem = Path::new(slug)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");

    stem.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("my-first_post"), "My First Post");
        assert_eq!(title_from_slug("notes/typed-sql.md"), "Typed Sql");
    }

    #[test]
    fn test_post_path_adds_extension() {
        let dir = Path::new("blog");
        assert_eq!(post_path(dir, "hello"), PathBuf::from("blog/hello.md"));
        assert_eq!(post_path(dir, "/hello.mdx"), PathBuf::from("blog/hello.mdx"));
    }

    #[test]
    fn test_new_post_validates_as_unpublished() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = run(
            dir.path(),
            "generic-helpers",
            None,
            &[Category::Typescript, Category::Concept],
        )
        .expect("create post");

        let content = fs::read_to_string(&path).expect("read");
        let (post, body) = BlogPost::parse(&content, &path).expect("valid");
        assert_eq!(post.title, "Generic Helpers");
        assert_eq!(post.category, vec![Category::Typescript, Category::Concept]);
        assert!(!post.published);
        assert_eq!(post.pub_date.date_naive(), Utc::now().date_naive());
        assert!(body.starts_with("Write your content"));
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = tempfile::tempdir().expect("create temp dir");
        run(dir.path(), "taken", Some("Taken"), &[Category::Sql]).expect("first");
        let err = run(dir.path(), "taken", Some("Again"), &[Category::Sql]).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
