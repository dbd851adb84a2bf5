//! `[feed]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[feed]` section in site.toml - rss feed settings.
///
/// # Example
/// ```toml
/// [feed]
/// path = "/rss.xml"        # Route when serving, file name when building
/// order = "newest"         # or "reverse"
/// favicon = "favicon.svg"  # Resolved against [site.url]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Route of the feed, relative to the site root.
    #[serde(default = "defaults::feed::path")]
    #[educe(Default = defaults::feed::path())]
    pub path: String,

    /// How posts are ordered in the feed.
    #[serde(default)]
    pub order: FeedOrder,

    /// Favicon file advertised through `<media:content>`.
    #[serde(default = "defaults::feed::favicon")]
    #[educe(Default = defaults::feed::favicon())]
    pub favicon: String,
}

impl FeedConfig {
    /// Feed path without the leading `/`, used as the output file name.
    pub fn file_name(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

/// Item ordering strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrder {
    /// Newest publication date first. Posts sharing a date keep the
    /// reversed source order.
    #[default]
    Newest,
    /// Plain reversal of the order the content source yields.
    Reverse,
}
