//! The public query surface: routes every query to the local filesystem
//! pipeline or the remote CMS, per the configured data source.
//!
//! The mode switch covers the whole query set — there is no per-collection
//! mixing. Videos are the one deliberate exception: the CMS exposes no video
//! resource, so the catalog document answers the video query in both modes.
//!
//! By-slug lookups are list-then-filter: collections are small (a portfolio,
//! not an archive) and every query re-derives the collection anyway, so an
//! index would buy nothing. A missing slug is an absent result, not an
//! error.

use crate::assemble::{self, AssembleError};
use crate::config::{DataSource, SiteConfig};
use crate::remote::{RemoteClient, RemoteError};
use crate::types::{Article, Photo, Video};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Resolves content queries against one configuration and content root.
///
/// Construct once at startup and share; every query runs to completion
/// against a fresh snapshot of the sources.
pub struct ContentSource<'a> {
    config: &'a SiteConfig,
    root: PathBuf,
}

impl<'a> ContentSource<'a> {
    pub fn new(config: &'a SiteConfig, root: &Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    /// List all photos, date descending.
    pub fn list_photos(&self) -> Result<Vec<Photo>, SourceError> {
        match self.config.data_source {
            DataSource::Local => Ok(assemble::assemble_photos(self.config, &self.root)?),
            DataSource::Remote => Ok(self.remote_client()?.photos()?),
        }
    }

    /// List all articles, date descending.
    pub fn list_articles(&self) -> Result<Vec<Article>, SourceError> {
        match self.config.data_source {
            DataSource::Local => Ok(assemble::assemble_articles(self.config, &self.root)?),
            DataSource::Remote => Ok(self.remote_client()?.articles()?),
        }
    }

    /// List all videos, in catalog order.
    pub fn list_videos(&self) -> Result<Vec<Video>, SourceError> {
        Ok(assemble::assemble_videos(self.config, &self.root)?)
    }

    /// Look up one photo by slug. Absent is `Ok(None)`, not an error.
    pub fn get_photo(&self, slug: &str) -> Result<Option<Photo>, SourceError> {
        Ok(self.list_photos()?.into_iter().find(|p| p.slug == slug))
    }

    /// Look up one article by slug. Absent is `Ok(None)`, not an error.
    pub fn get_article(&self, slug: &str) -> Result<Option<Article>, SourceError> {
        Ok(self.list_articles()?.into_iter().find(|a| a.slug == slug))
    }

    fn remote_client(&self) -> Result<RemoteClient, RemoteError> {
        RemoteClient::new(&self.config.remote.base_url, &self.config.base_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;
    use crate::test_helpers::write_jpeg_with_date;
    use std::fs;
    use tempfile::TempDir;

    fn local_fixture() -> (TempDir, SiteConfig) {
        let tmp = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let photos_dir = tmp.path().join(&config.photos_dir);
        fs::create_dir_all(&photos_dir).unwrap();
        write_jpeg_with_date(&photos_dir.join("tokyo.jpg"), "2023:05:01 12:00:00");
        fs::write(photos_dir.join("osaka.jpg"), b"no exif").unwrap();
        (tmp, config)
    }

    #[test]
    fn get_photo_by_slug_finds_match() {
        let (tmp, config) = local_fixture();
        let source = ContentSource::new(&config, tmp.path());

        let tokyo = source.get_photo("tokyo").unwrap();
        assert_eq!(tokyo.unwrap().date.as_deref(), Some("2023-05-01"));
    }

    #[test]
    fn get_photo_by_unknown_slug_is_absent_not_error() {
        let (tmp, config) = local_fixture();
        let source = ContentSource::new(&config, tmp.path());

        assert!(source.get_photo("nagoya").unwrap().is_none());
    }

    #[test]
    fn get_article_by_slug() {
        let (tmp, config) = local_fixture();
        let posts = tmp.path().join(&config.posts_dir);
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\n---\nBody.\n",
        )
        .unwrap();
        let source = ContentSource::new(&config, tmp.path());

        assert_eq!(source.get_article("first").unwrap().unwrap().title, "First");
        assert!(source.get_article("missing").unwrap().is_none());
    }

    #[test]
    fn remote_mode_failure_propagates_not_degrades() {
        // Nothing listens on the configured port: the query must fail,
        // never return an empty collection.
        let tmp = TempDir::new().unwrap();
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let config = SiteConfig {
            data_source: DataSource::Remote,
            remote: RemoteConfig {
                base_url: format!("http://{addr}"),
            },
            ..SiteConfig::default()
        };
        let source = ContentSource::new(&config, tmp.path());

        assert!(matches!(
            source.list_photos(),
            Err(SourceError::Remote(_))
        ));
    }

    #[test]
    fn videos_answered_locally_in_both_modes() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("content")).unwrap();
        fs::write(
            tmp.path().join("content/videos.json"),
            r#"[{"type": "youtube", "id": "abc", "title": "Clip"}]"#,
        )
        .unwrap();
        let config = SiteConfig {
            data_source: DataSource::Remote,
            remote: RemoteConfig {
                base_url: "http://127.0.0.1:9".to_string(),
            },
            ..SiteConfig::default()
        };
        let source = ContentSource::new(&config, tmp.path());

        assert_eq!(source.list_videos().unwrap().len(), 1);
    }
}
