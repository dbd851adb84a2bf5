//! URL slugification of content paths.

use std::path::{Component, Path};

/// Slugify a single path segment.
///
/// Lowercases, turns whitespace into `-` and drops everything that is not
/// alphanumeric, `-` or `_`. Non-ASCII letters are kept.
pub fn slugify_segment(text: &str) -> String {
    text.trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Slug of a content file, given its path relative to the collection.
///
/// Drops the extension, slugifies each segment and collapses a trailing
/// `index`: `Hello World.md` → `hello-world`, `guides/Intro/index.md` →
/// `guides/intro`.
pub fn slug_from_path(relative: &Path) -> String {
    let stem = relative.with_extension("");
    let mut segments: Vec<String> = stem
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(slugify_segment(&s.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
        segments.pop();
    }
    segments.join("/")
}

/// Whether `slug` stays inside its collection when used as a URL path.
///
/// Rejects empty slugs, a leading `/`, backslashes and empty, `.` or `..`
/// segments.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains('\\')
        && slug
            .split('/')
            .all(|segment| !matches!(segment, "" | "." | ".."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_segment_basic() {
        assert_eq!(slugify_segment("Hello World"), "hello-world");
        assert_eq!(slugify_segment("first-post"), "first-post");
        assert_eq!(slugify_segment("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_segment_drops_punctuation() {
        assert_eq!(slugify_segment("What's new?"), "whats-new");
        assert_eq!(slugify_segment("a<b>c:d|e*f#g"), "abcdefg");
        assert_eq!(slugify_segment("(draft) [v2]"), "draft-v2");
    }

    #[test]
    fn test_slugify_segment_unicode() {
        assert_eq!(slugify_segment("Café Ünïcode"), "café-ünïcode");
    }

    #[test]
    fn test_slugify_segment_trims() {
        assert_eq!(slugify_segment("  padded  "), "padded");
    }

    #[test]
    fn test_slug_from_path_strips_extension() {
        assert_eq!(slug_from_path(Path::new("first-post.md")), "first-post");
        assert_eq!(slug_from_path(Path::new("Using MDX.mdx")), "using-mdx");
    }

    #[test]
    fn test_slug_from_path_nested() {
        assert_eq!(
            slug_from_path(Path::new("2024/Year in Review.md")),
            "2024/year-in-review"
        );
    }

    #[test]
    fn test_slug_from_path_collapses_index() {
        assert_eq!(slug_from_path(Path::new("guides/Intro/index.md")), "guides/intro");
        // A lone index file keeps its name
        assert_eq!(slug_from_path(Path::new("index.md")), "index");
    }

    #[test]
    fn test_slug_from_punctuation_only_name_is_empty() {
        assert_eq!(slug_from_path(Path::new("!!!.md")), "");
        assert!(!is_valid_slug(&slug_from_path(Path::new("!!!.md"))));
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("first-post"));
        assert!(is_valid_slug("2024/year-in-review"));

        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("/evil"));
        assert!(!is_valid_slug("evil/"));
        assert!(!is_valid_slug("../../evil"));
        assert!(!is_valid_slug("a/./b"));
        assert!(!is_valid_slug("a//b"));
        assert!(!is_valid_slug("a\\b"));
    }
}
