//! Content source error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while listing a content collection.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("collection `{0}` not found at `{1}`")]
    MissingCollection(String, PathBuf),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to walk `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("`{0}` has no frontmatter")]
    MissingFrontmatter(PathBuf),

    #[error("`{0}` has unterminated frontmatter")]
    UnterminatedFrontmatter(PathBuf),

    #[error("`{0}` has invalid YAML frontmatter")]
    Yaml(PathBuf, #[source] serde_yaml::Error),

    #[error("`{0}` has invalid TOML frontmatter")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("frontmatter of `{0}` is not a table")]
    NotATable(PathBuf),

    #[error("`{0}` has invalid post data")]
    InvalidPost(PathBuf, #[source] serde_json::Error),

    #[error("`{0}` has invalid slug `{1}`")]
    InvalidSlug(PathBuf, String),

    #[error("duplicate slug `{slug}` in `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_error_display() {
        let err = ContentError::MissingCollection("blog".into(), PathBuf::from("src/content/blog"));
        let display = err.to_string();
        assert!(display.contains("`blog`"));
        assert!(display.contains("src/content/blog"));

        let err = ContentError::DuplicateSlug {
            slug: "hello".into(),
            first: PathBuf::from("hello.md"),
            second: PathBuf::from("Hello.md"),
        };
        assert_eq!(
            err.to_string(),
            "duplicate slug `hello` in `hello.md` and `Hello.md`"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = ContentError::Io(
            PathBuf::from("post.md"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_invalid_slug_display() {
        let err = ContentError::InvalidSlug(PathBuf::from("blog/post.md"), "../evil".into());
        assert_eq!(err.to_string(), "`blog/post.md` has invalid slug `../evil`");
    }
}
