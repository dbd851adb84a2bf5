//! `[integrations]` section configuration.
//!
//! Declares which build-time integrations the site uses. The declarations
//! are validated here and consumed by external tooling; nothing in this
//! crate runs them.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// `[integrations]` section in site.toml.
///
/// # Example
/// ```toml
/// [integrations]
/// sitemap = true
///
/// [integrations.icon]
/// enable = true
/// include = { mdi = ["github", "linkedin", "twitter"] }
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IntegrationsConfig {
    /// Generate `sitemap-index.xml` at build time.
    #[serde(default)]
    pub sitemap: bool,

    /// Icon bundling.
    #[serde(default)]
    pub icon: IconConfig,
}

/// `[integrations.icon]` - icon sets bundled into the site.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IconConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Icon-set name → icon identifiers to include.
    #[serde(default)]
    pub include: BTreeMap<String, Vec<String>>,
}

/// A build-time integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Integration {
    Sitemap,
    Icon,
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sitemap => f.write_str("sitemap"),
            Self::Icon => f.write_str("icon"),
        }
    }
}

impl IntegrationsConfig {
    /// Enabled integrations, in declaration order.
    pub fn enabled(&self) -> Vec<Integration> {
        let mut enabled = Vec::new();
        if self.sitemap {
            enabled.push(Integration::Sitemap);
        }
        if self.icon.enable {
            enabled.push(Integration::Icon);
        }
        enabled
    }

    /// Check the icon inclusion map.
    ///
    /// Returns a message naming the offending key on failure.
    pub fn validate(&self) -> Result<(), String> {
        let icon = &self.icon;
        if !icon.enable && !icon.include.is_empty() {
            return Err(
                "[integrations.icon.include] is set but [integrations.icon.enable] = false".into(),
            );
        }

        for (set, icons) in &icon.include {
            if set.trim().is_empty() {
                return Err("[integrations.icon.include] has an empty icon-set name".into());
            }
            if icons.iter().any(|name| name.trim().is_empty()) {
                return Err(format!(
                    "[integrations.icon.include.{set}] contains an empty icon identifier"
                ));
            }
        }

        Ok(())
    }
}
