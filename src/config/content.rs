//! `[content]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in site.toml - where posts are read from.
///
/// # Example
/// ```toml
/// [content]
/// dir = "src/content"   # Holds one directory per collection
/// collection = "blog"   # Also the first segment of every item link
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Directory containing the content collections.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Name of the collection the feed is built from.
    #[serde(default = "defaults::content::collection")]
    #[educe(Default = defaults::content::collection())]
    pub collection: String,
}

impl ContentConfig {
    /// Directory of the configured collection.
    pub fn collection_dir(&self) -> PathBuf {
        self.dir.join(&self.collection)
    }
}
