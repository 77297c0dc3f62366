//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root. There
//! is exactly one configuration per run: it is loaded once at startup and
//! passed by reference into the pipeline, never read from the process
//! environment at call sites. That keeps the resolution pipeline testable
//! with several configurations side by side in one test run.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = "/"                      # Deployment base path (e.g. "/portfolio"
//!                                      # for a GitHub Pages project site)
//! data_source = "local"                # "local" (filesystem) | "remote" (CMS)
//! photos_dir = "public/photos"         # Image files to scan
//! photos_meta_dir = "content/photos"   # Photo sidecar documents
//! posts_dir = "content/posts"          # Article documents
//! videos_catalog = "content/videos.json"
//!
//! [remote]
//! base_url = ""                        # Required when data_source = "remote"
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Which pipeline answers content queries for the whole run.
///
/// The switch applies to the entire query set; per-collection mixing is not
/// supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Resolve from the local filesystem (scan + sidecar merge).
    #[default]
    Local,
    /// Resolve from the remote CMS API.
    Remote,
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL path prefix the site is served under. `"/"` means no prefix.
    pub base_path: String,
    /// Local filesystem vs remote CMS resolution.
    pub data_source: DataSource,
    /// Directory of image files, relative to the content root.
    pub photos_dir: String,
    /// Directory of photo sidecar documents, relative to the content root.
    pub photos_meta_dir: String,
    /// Directory of article documents, relative to the content root.
    pub posts_dir: String,
    /// Path of the video catalog document, relative to the content root.
    pub videos_catalog: String,
    /// Remote CMS settings (used only when `data_source = "remote"`).
    pub remote: RemoteConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            data_source: DataSource::Local,
            photos_dir: "public/photos".to_string(),
            photos_meta_dir: "content/photos".to_string(),
            posts_dir: "content/posts".to_string(),
            videos_catalog: "content/videos.json".to_string(),
            remote: RemoteConfig::default(),
        }
    }
}

/// Remote CMS connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Base URL of the CMS, e.g. `https://cms.example.com`.
    pub base_url: String,
}

impl SiteConfig {
    /// Site-root URL path for a scanned image file.
    ///
    /// The `public/` deployment folder is not part of the served URL:
    /// `photos_dir = "public/photos"` serves `tokyo.jpg` at
    /// `/photos/tokyo.jpg`. Base-path prefixing happens later, in the
    /// normalizer.
    pub fn photo_url(&self, filename: &str) -> String {
        let web_dir = self
            .photos_dir
            .strip_prefix("public/")
            .unwrap_or(&self.photos_dir);
        format!("/{}/{}", web_dir.trim_matches('/'), filename)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "base_path must start with '/' (use \"/\" for no prefix)".into(),
            ));
        }
        if self.data_source == DataSource::Remote && self.remote.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "remote.base_url is required when data_source = \"remote\"".into(),
            ));
        }
        Ok(())
    }
}

/// Load the site config from `config.toml` in the content root.
///
/// Returns stock defaults when no config file exists. The loaded config is
/// validated before being returned.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A stock `config.toml` with every option documented, for `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# folio configuration - all options shown with their defaults

# Deployment base path. Project sites served under a subpath (GitHub Pages
# serves https://user.github.io/<repo>/) need it here so asset references
# are prefixed correctly. "/" means the site is served from the root.
base_path = "/"

# Where content queries are answered from:
#   "local"  - scan image files and sidecar documents on disk
#   "remote" - fetch from the CMS API ([remote] below must be configured)
data_source = "local"

# Image files to scan (.jpg/.jpeg). A photo card is generated per file;
# a same-named markdown file in photos_meta_dir overrides its metadata.
photos_dir = "public/photos"

# Photo sidecar documents: <slug>.md with YAML frontmatter
# (title / date / caption / tags / image).
photos_meta_dir = "content/photos"

# Article documents: <slug>.md with YAML frontmatter
# (title / date / excerpt / cover) followed by the markdown body.
posts_dir = "content/posts"

# Flat video catalog: a JSON array of records tagged "youtube" or "mp4".
videos_catalog = "content/videos.json"

[remote]
# Base URL of the CMS, e.g. "https://cms.example.com".
base_url = ""
"#
}
