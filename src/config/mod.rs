//! Site configuration management for `site.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                         |
//! |------------------|-------------------------------------------------|
//! | `[site]`         | Site metadata (url, title, description)         |
//! | `[content]`      | Content directory and feed collection           |
//! | `[feed]`         | Feed route, ordering, favicon                   |
//! | `[build]`        | Output directory for `sitefeed build`           |
//! | `[serve]`        | Feed server (interface, port)                   |
//! | `[integrations]` | Build-time integrations (sitemap, icon sets)    |
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://edezekiel.com"
//! title = "Ed Ezekiel"
//! description = "Notes on web development"
//!
//! [integrations]
//! sitemap = true
//!
//! [integrations.icon]
//! include = { mdi = ["github", "linkedin", "twitter"] }
//! ```

mod build;
mod content;
pub mod defaults;
mod error;
mod feed;
mod integrations;
mod serve;
mod site;

pub use feed::FeedOrder;

use build::BuildConfig;
use content::ContentConfig;
use error::ConfigError;
use feed::FeedConfig;
use integrations::IntegrationsConfig;
use serve::ServeConfig;
use site::SiteInfo;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing site.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Root directory of the site (set after loading)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub site: SiteInfo,

    /// Content collection settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Feed server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Declared build-time integrations
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content).with_context(|| format!("in `{}`", path.display()))
    }

    /// Load, apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        if !config_path.exists() {
            bail!("Config file not found: {}", config_path.display());
        }

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        match &cli.command {
            Commands::Build { output } => {
                Self::update_option(&mut self.build.output, output.as_ref());
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Check => {}
        }

        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve directory paths against the root directory
    fn update_path_with_root(&mut self, root: &Path) {
        self.root = Some(root.to_path_buf());
        self.content.dir = root.join(&self.content.dir);
        self.build.output = root.join(&self.build.output);
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// Base URL of the site, always ending with `/`.
    pub fn site_url(&self) -> Result<Url> {
        let raw = self
            .site
            .url
            .as_deref()
            .ok_or_else(|| ConfigError::Validation("[site.url] is required".into()))?;

        let mut url = Url::parse(raw)
            .map_err(|e| ConfigError::Validation(format!("[site.url] `{raw}` is invalid: {e}")))?;

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Absolute URL of the favicon advertised in the feed.
    ///
    /// Plain concatenation: `https://example.com/` → `https://example.com/favicon.svg`.
    pub fn favicon_url(&self) -> Result<String> {
        Ok(format!("{}{}", self.site_url()?, self.feed.favicon))
    }

    /// Path the feed is written to by `sitefeed build`.
    pub fn feed_output_path(&self) -> PathBuf {
        self.build.output.join(self.feed.file_name())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.site_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!(ConfigError::Validation(
                "[site.url] must start with http:// or https://".into()
            ));
        }
        if url.cannot_be_a_base() || url.host().is_none() {
            bail!(ConfigError::Validation(
                "[site.url] must be an absolute url".into()
            ));
        }
        if url.query().is_some() || url.fragment().is_some() {
            bail!(ConfigError::Validation(
                "[site.url] must not have a query or fragment".into()
            ));
        }

        let path = &self.feed.path;
        if !path.starts_with('/') {
            bail!(ConfigError::Validation(
                "[feed.path] must start with `/`".into()
            ));
        }
        if path.ends_with('/') || path.contains(['?', '#', '\\']) {
            bail!(ConfigError::Validation(
                "[feed.path] must name a file".into()
            ));
        }
        // Output file must stay inside [build.output]
        if path[1..]
            .split('/')
            .any(|segment| matches!(segment, "" | "." | ".."))
        {
            bail!(ConfigError::Validation(
                "[feed.path] must not contain empty, `.` or `..` segments".into()
            ));
        }

        let collection = &self.content.collection;
        if matches!(collection.as_str(), "" | "." | "..") || collection.contains(['/', '\\']) {
            bail!(ConfigError::Validation(
                "[content.collection] must be a single directory name".into()
            ));
        }

        self.integrations
            .validate()
            .map_err(ConfigError::Validation)?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
