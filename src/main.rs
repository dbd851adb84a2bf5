//! sitefeed - site configuration and rss feed server for a markdown blog.

mod cli;
mod config;
mod content;
mod generator;
mod logger;
mod serve;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{ContentSource, DirectorySource};
use generator::rss::{Feed, build_rss};
use serve::serve_feed;

fn main() {
    if let Err(err) = run() {
        log!("error"; "{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;
    let source = DirectorySource::new(&config.content.dir);

    match &cli.command {
        Commands::Build { .. } => build_rss(&config, &source).map(|_| ()),
        Commands::Serve { .. } => serve_feed(&config, &source),
        Commands::Check => check(&config, &source),
    }
}

/// Validate config and content without writing any output.
fn check(config: &SiteConfig, source: &dyn ContentSource) -> Result<()> {
    let feed = Feed::build(config, source)?;
    feed.to_xml()?;

    let integrations: Vec<_> = config
        .integrations
        .enabled()
        .iter()
        .map(ToString::to_string)
        .collect();

    log!("config"; "{}", config.config_path.display());
    log!("config"; "site {}", feed.site);
    log!("config"; "integrations: {}", integrations.join(", "));
    log!(
        "content";
        "{} posts in `{}`",
        feed.items.len(),
        config.content.collection
    );
    Ok(())
}
