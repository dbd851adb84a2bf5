//! Filesystem-backed content source.

use super::{ContentError, ContentSource, Post, PostData, frontmatter};
use crate::utils::slug::{is_valid_slug, slug_from_path};
use serde_json::Value;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extensions recognized as posts.
const POST_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Reads collections from `<root>/<collection>/**/*.md`.
///
/// Files are visited in file-name order. Files and directories whose name
/// starts with `_` or `.` are skipped.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read a single post file. `dir` is the collection directory.
    fn read_post(dir: &Path, path: &Path) -> Result<Post, ContentError> {
        let text =
            fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        let mut map = frontmatter::parse(path, &text)?;

        let slug = match map.remove("slug") {
            Some(Value::String(slug)) if !slug.trim().is_empty() => slug.trim().to_owned(),
            _ => slug_from_path(path.strip_prefix(dir).unwrap_or(path)),
        };
        if !is_valid_slug(&slug) {
            return Err(ContentError::InvalidSlug(path.to_path_buf(), slug));
        }

        let data: PostData = serde_json::from_value(Value::Object(map))
            .map_err(|err| ContentError::InvalidPost(path.to_path_buf(), err))?;

        Ok(Post::new(slug, data))
    }
}

impl ContentSource for DirectorySource {
    fn posts(&self, collection: &str) -> Result<Vec<Post>, ContentError> {
        let dir = self.root.join(collection);
        if !dir.is_dir() {
            return Err(ContentError::MissingCollection(collection.to_owned(), dir));
        }

        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        let walker = WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|err| ContentError::Walk(dir.clone(), err))?;
            if !entry.file_type().is_file() || !is_post_file(entry.path()) {
                continue;
            }

            let path = entry.into_path();
            let post = Self::read_post(&dir, &path)?;

            if let Some(first) = seen.get(&post.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first: first.clone(),
                    second: path,
                });
            }
            seen.insert(post.slug.clone(), path);
            posts.push(post);
        }

        Ok(posts)
    }
}

fn is_ignored(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('_') || name.starts_with('.')
}

fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| POST_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post_file(title: &str, date: &str) -> String {
        format!("---\ntitle: '{title}'\ndescription: 'About {title}'\npubDate: '{date}'\n---\n\nBody.\n")
    }

    fn setup() -> TempDir {
        let root = TempDir::new().unwrap();
        let blog = root.path().join("blog");
        write(&blog, "first-post.md", &post_file("First post", "Jul 08 2022"));
        write(&blog, "second-post.md", &post_file("Second post", "Jul 15 2022"));
        write(&blog, "third-post.mdx", &post_file("Third post", "Jul 22 2022"));
        root
    }

    #[test]
    fn test_reads_collection_in_file_name_order() {
        let root = setup();
        let posts = DirectorySource::new(root.path()).posts("blog").unwrap();

        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["first-post", "second-post", "third-post"]);
        assert_eq!(posts[0].data.title, "First post");
        assert_eq!(posts[0].data.description, "About First post");
        assert_eq!(
            posts[2].data.pub_date,
            Utc.with_ymd_and_hms(2022, 7, 22, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_skips_non_posts_and_ignored_entries() {
        let root = setup();
        let blog = root.path().join("blog");
        write(&blog, "notes.txt", "not a post");
        write(&blog, "_draft.md", "no frontmatter at all");
        write(&blog, ".hidden/post.md", "no frontmatter at all");
        write(&blog, "_partials/header.md", "no frontmatter at all");

        let posts = DirectorySource::new(root.path()).posts("blog").unwrap();
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn test_nested_and_toml_posts() {
        let root = TempDir::new().unwrap();
        let blog = root.path().join("blog");
        write(
            &blog,
            "2024/Year Review/index.md",
            "+++\ntitle = \"Year in review\"\ndescription = \"2024\"\npubDate = 2024-12-31\n+++\n",
        );

        let posts = DirectorySource::new(root.path()).posts("blog").unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "2024/year-review");
        assert_eq!(
            posts[0].data.pub_date,
            Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_frontmatter_slug_overrides_path() {
        let root = TempDir::new().unwrap();
        write(
            &root.path().join("blog"),
            "post.md",
            "---\ntitle: T\ndescription: D\npubDate: 2024-01-01\nslug: custom-slug\n---\n",
        );

        let posts = DirectorySource::new(root.path()).posts("blog").unwrap();
        assert_eq!(posts[0].slug, "custom-slug");
        assert!(!posts[0].data.extra.contains_key("slug"));
    }

    #[test]
    fn test_frontmatter_slug_cannot_leave_collection() {
        let root = TempDir::new().unwrap();
        write(
            &root.path().join("blog"),
            "post.md",
            "---\ntitle: T\ndescription: D\npubDate: 2024-01-01\nslug: ../../evil\n---\n",
        );

        let err = DirectorySource::new(root.path()).posts("blog").unwrap_err();
        assert!(matches!(err, ContentError::InvalidSlug(_, ref slug) if slug == "../../evil"));
    }

    #[test]
    fn test_file_name_without_slug_characters() {
        let root = setup();
        write(&root.path().join("blog"), "!!!.md", &post_file("Bang", "2024-01-01"));

        let err = DirectorySource::new(root.path()).posts("blog").unwrap_err();
        assert!(
            matches!(err, ContentError::InvalidSlug(ref path, ref slug) if path.ends_with("!!!.md") && slug.is_empty())
        );
    }

    #[test]
    fn test_missing_collection() {
        let root = TempDir::new().unwrap();
        let err = DirectorySource::new(root.path()).posts("blog").unwrap_err();
        assert!(matches!(err, ContentError::MissingCollection(name, _) if name == "blog"));
    }

    #[test]
    fn test_malformed_post_fails_whole_listing() {
        let root = setup();
        write(&root.path().join("blog"), "broken.md", "---\ntitle: Broken\n---\n");

        let err = DirectorySource::new(root.path()).posts("blog").unwrap_err();
        assert!(matches!(err, ContentError::InvalidPost(path, _) if path.ends_with("broken.md")));
    }

    #[test]
    fn test_duplicate_slug() {
        let root = setup();
        write(
            &root.path().join("blog"),
            "zzz.md",
            "---\ntitle: T\ndescription: D\npubDate: 2024-01-01\nslug: first-post\n---\n",
        );

        let err = DirectorySource::new(root.path()).posts("blog").unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { ref slug, .. } if slug == "first-post"));
    }
}
