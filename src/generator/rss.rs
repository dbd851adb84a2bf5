//! rss feed generation.
//!
//! Lists the configured collection, orders it newest-first and renders an
//! RSS 2.0 document with the `media` and `atom` namespaces.

use crate::{
    config::{FeedOrder, SiteConfig},
    content::{ContentSource, Post, PostData},
    log,
    utils::{date::to_rfc2822, slug::is_valid_slug},
};
use anyhow::{Context, Result, anyhow, bail};
use rss::{
    CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder,
    extension::{ExtensionBuilder, ExtensionMap},
    validation::Validate,
};
use std::{collections::BTreeMap, fs, path::PathBuf};
use url::Url;

/// Media RSS namespace.
pub const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";
/// Atom namespace.
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
/// Site-relative prefix of every item link, whatever the collection is named.
pub const LINK_PREFIX: &str = "/blog/";

// ============================================================================
// Public API
// ============================================================================

/// Build the feed and render it to XML.
pub fn render_rss(config: &SiteConfig, source: &dyn ContentSource) -> Result<String> {
    Feed::build(config, source)?.to_xml()
}

/// Build the feed and write it to `[build.output]/[feed.path]`.
pub fn build_rss(config: &SiteConfig, source: &dyn ContentSource) -> Result<PathBuf> {
    let feed = Feed::build(config, source)?;
    let count = feed.items.len();
    let xml = feed.to_xml()?;

    let path = config.feed_output_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, xml).with_context(|| format!("Failed to write {}", path.display()))?;

    log!("feed"; "{} items -> {}", count, path.display());
    Ok(path)
}

// ============================================================================
// Feed Descriptor
// ============================================================================

/// A post as it appears in the feed.
///
/// The link is always `/blog/<slug>/` and cannot be set directly.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    data: PostData,
    link: String,
}

impl FeedItem {
    pub fn from_post(post: Post) -> Self {
        Self {
            link: format!("{LINK_PREFIX}{}/", post.slug),
            data: post.data,
        }
    }

    /// Site-relative link of the post.
    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn data(&self) -> &PostData {
        &self.data
    }
}

/// The `<media:content>` element pointing at the site favicon.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaContent {
    pub url: String,
    pub title: String,
}

impl MediaContent {
    /// Element attributes. Everything but `url` and `title` is fixed.
    pub fn attrs(&self) -> BTreeMap<String, String> {
        [
            ("type", "image/svg"),
            ("width", "32"),
            ("height", "32"),
            ("medium", "image"),
            ("title", self.title.as_str()),
            ("url", self.url.as_str()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
    }

    fn to_extensions(&self) -> ExtensionMap {
        let content = ExtensionBuilder::default()
            .name("media:content".to_string())
            .attrs(self.attrs())
            .build();

        let mut media = BTreeMap::new();
        media.insert("content".to_string(), vec![content]);

        let mut extensions = ExtensionMap::default();
        extensions.insert("media".to_string(), media);
        extensions
    }
}

/// Everything needed to render the feed. Rebuilt for every request.
#[derive(Debug, Clone)]
pub struct Feed {
    pub title: String,
    pub description: String,
    /// Site base URL, ending with `/`.
    pub site: Url,
    /// Extra XML namespaces declared on `<rss>`.
    pub namespaces: BTreeMap<String, String>,
    pub media: MediaContent,
    /// Items, newest first.
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// List the collection and assemble the feed.
    ///
    /// A failing content source fails the whole build; there is no
    /// partial or fallback feed.
    pub fn build(config: &SiteConfig, source: &dyn ContentSource) -> Result<Self> {
        let site = config.site_url()?;
        let collection = &config.content.collection;

        let posts = source
            .posts(collection)
            .with_context(|| format!("Failed to list collection `{collection}`"))?;

        if let Some(post) = posts.iter().find(|post| !is_valid_slug(&post.slug)) {
            bail!("Invalid slug `{}` in collection `{collection}`", post.slug);
        }

        let items = order_posts(posts, config.feed.order)
            .into_iter()
            .map(FeedItem::from_post)
            .collect();

        let namespaces = BTreeMap::from([
            ("media".to_string(), MEDIA_NAMESPACE.to_string()),
            ("atom".to_string(), ATOM_NAMESPACE.to_string()),
        ]);

        Ok(Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            media: MediaContent {
                url: config.favicon_url()?,
                title: config.site.image_title().to_owned(),
            },
            site,
            namespaces,
            items,
        })
    }

    /// Convert to an `rss::Channel`.
    pub fn to_channel(&self) -> rss::Channel {
        let items: Vec<_> = self
            .items
            .iter()
            .map(|item| item_to_rss(item, &self.site))
            .collect();

        ChannelBuilder::default()
            .title(self.title.clone())
            .link(self.site.to_string())
            .description(self.description.clone())
            .namespaces(self.namespaces.clone())
            .extensions(self.media.to_extensions())
            .items(items)
            .build()
    }

    /// Validate and render the rss xml string.
    pub fn to_xml(&self) -> Result<String> {
        let channel = self.to_channel();
        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Order posts newest-first.
///
/// The source order is reversed first; `Newest` then stable-sorts by date,
/// so posts sharing a date stay in reversed source order.
fn order_posts(mut posts: Vec<Post>, order: FeedOrder) -> Vec<Post> {
    posts.reverse();
    if order == FeedOrder::Newest {
        posts.sort_by(|a, b| b.data.pub_date.cmp(&a.data.pub_date));
    }
    posts
}

/// Convert a feed item to an rss item, resolving its link against the site.
fn item_to_rss(item: &FeedItem, site: &Url) -> rss::Item {
    let data = item.data();
    let link = site
        .join(item.link())
        .map(String::from)
        .unwrap_or_else(|_| item.link().to_owned());

    let categories: Vec<_> = data
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(name.clone()).build())
        .collect();

    ItemBuilder::default()
        .title(Some(data.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(Some(data.description.clone()))
        .pub_date(Some(to_rfc2822(&data.pub_date)))
        .author(data.author.clone())
        .categories(categories)
        .build()
}
