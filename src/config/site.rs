//! `[site]` section configuration.
//!
//! Contains the site metadata used for the feed channel.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in site.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// url = "https://edezekiel.com"
/// title = "Ed Ezekiel"
/// description = "Notes on web development"
/// author = "Ed Ezekiel"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Absolute base URL of the deployed site.
    /// Required; validated at startup.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: Option<String>,

    /// Feed channel title.
    pub title: String,

    /// Feed channel description.
    pub description: String,

    /// Name shown as the title of the feed image.
    #[serde(default)]
    pub author: String,
}

impl SiteInfo {
    /// Title used for the `<media:content>` favicon element.
    pub fn image_title(&self) -> &str {
        if self.author.is_empty() {
            &self.title
        } else {
            &self.author
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_site_config_full() {
        let config = r#"
            [site]
            url = "https://edezekiel.com"
            title = "Ed Ezekiel"
            description = "Notes on web development"
            author = "Ed Ezekiel"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.url.as_deref(), Some("https://edezekiel.com"));
        assert_eq!(config.site.title, "Ed Ezekiel");
        assert_eq!(config.site.description, "Notes on web development");
        assert_eq!(config.site.image_title(), "Ed Ezekiel");
    }

    #[test]
    fn test_image_title_falls_back_to_title() {
        let config = r#"
            [site]
            title = "My Blog"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.author, "");
        assert_eq!(config.site.url, None);
        assert_eq!(config.site.image_title(), "My Blog");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            title = "Test"
            description = "Test blog"
            language = "en-US"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_site_config_unicode() {
        let config = r#"
            [site]
            title = "My Blog 🚀"
            description = "Ünïcödé"
            author = "René"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.title, "My Blog 🚀");
        assert_eq!(config.site.image_title(), "René");
    }
}
