//! Content collections.
//!
//! The feed never touches the filesystem directly: it asks a
//! [`ContentSource`] for every post of a collection. [`DirectorySource`]
//! reads Markdown files from disk; tests pass closures instead.
//!
//! # Post files
//!
//! ```text
//! src/content/blog/first-post.md
//! ---
//! title: 'First post'
//! description: 'Lorem ipsum dolor sit amet'
//! pubDate: 'Jul 08 2022'
//! heroImage: '/blog-placeholder-3.jpg'
//! ---
//! ```

mod dir;
mod error;
mod frontmatter;

pub use dir::DirectorySource;
pub use error::ContentError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Data Types
// ============================================================================

/// A post of a content collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// URL-safe unique identifier within the collection.
    pub slug: String,
    /// Frontmatter data.
    pub data: PostData,
}

impl Post {
    pub fn new(slug: impl Into<String>, data: PostData) -> Self {
        Self {
            slug: slug.into(),
            data,
        }
    }
}

/// Frontmatter of a post.
///
/// Keys follow the camelCase spelling of the original site (`pubDate`,
/// `updatedDate`, `heroImage`); snake_case aliases are accepted. Any other
/// key is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostData {
    pub title: String,

    pub description: String,

    #[serde(rename = "pubDate", alias = "pub_date", alias = "date", with = "serde_date")]
    pub pub_date: DateTime<Utc>,

    #[serde(
        rename = "updatedDate",
        alias = "updated_date",
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_date::option"
    )]
    pub updated_date: Option<DateTime<Utc>>,

    #[serde(
        rename = "heroImage",
        alias = "hero_image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, alias = "tags", skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Remaining frontmatter fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PostData {
    /// Post data with only the required fields set.
    #[cfg(test)]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        pub_date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            pub_date,
            updated_date: None,
            hero_image: None,
            author: None,
            categories: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Content Source
// ============================================================================

/// Capability to list every post of a named collection.
///
/// Posts are returned in the source's own enumeration order. Failures are
/// returned as-is; callers decide what a failed listing means.
pub trait ContentSource {
    fn posts(&self, collection: &str) -> Result<Vec<Post>, ContentError>;
}

impl<F> ContentSource for F
where
    F: Fn(&str) -> Result<Vec<Post>, ContentError>,
{
    fn posts(&self, collection: &str) -> Result<Vec<Post>, ContentError> {
        self(collection)
    }
}

// ============================================================================
// Date (de)serialization
// ============================================================================

/// Dates are read with [`parse_date`](crate::utils::date::parse_date) and
/// written as RFC 3339.
mod serde_date {
    use crate::utils::date::parse_date;
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
            match dt {
                Some(dt) => super::serialize(dt, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| {
                    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date `{raw}`")))
                })
                .transpose()
        }
    }
}
