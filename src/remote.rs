//! Remote CMS client: fetches and maps the provider envelope onto the
//! unified record shapes.
//!
//! The CMS answers `GET {base}/api/photos?populate=*` and
//! `GET {base}/api/articles?populate=*` with an envelope of
//! attribute-bearing records:
//!
//! ```text
//! { "data": [ { "attributes": { "slug": "...", "title": "...", ... } } ] }
//! ```
//!
//! Media fields arrive either as a plain URL string or, with relationship
//! expansion, nested as `{ "data": { "attributes": { "url": "..." } } }` —
//! both shapes are accepted.
//!
//! Unlike the local pipeline there is nothing to degrade to here: a network
//! failure, a non-2xx status, or a malformed envelope fails the query
//! outright. Mapped records pass through the same base-path normalization as
//! locally assembled ones, so the presentation layer cannot tell the sources
//! apart.

use crate::merge;
use crate::paths;
use crate::types::{Article, Photo};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS article '{0}' has no date - a date is required for posts")]
    MissingDate(String),
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one CMS instance.
pub struct RemoteClient {
    http: reqwest::blocking::Client,
    base_url: String,
    base_path: String,
}

impl RemoteClient {
    /// Build a client for the given CMS base URL and deployment base path.
    pub fn new(base_url: &str, base_path: &str) -> Result<Self, RemoteError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            base_path: base_path.to_string(),
        })
    }

    /// Fetch and map the photo collection.
    pub fn photos(&self) -> Result<Vec<Photo>, RemoteError> {
        let records: Vec<PhotoAttributes> = self.fetch("photos")?;
        Ok(records
            .into_iter()
            .map(|attrs| attrs.into_photo(&self.base_path))
            .collect())
    }

    /// Fetch and map the article collection.
    pub fn articles(&self) -> Result<Vec<Article>, RemoteError> {
        let records: Vec<ArticleAttributes> = self.fetch("articles")?;
        records
            .into_iter()
            .map(|attrs| attrs.into_article(&self.base_path))
            .collect()
    }

    /// GET one resource with full relationship expansion and unwrap the
    /// envelope down to the attribute records.
    fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, RemoteError> {
        let url = format!("{}/api/{}?populate=*", self.base_url, resource);
        let envelope: Envelope<T> = self
            .http
            .get(&url)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(envelope.data.into_iter().map(|e| e.attributes).collect())
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<Entry<T>>,
}

#[derive(Deserialize)]
struct Entry<T> {
    attributes: T,
}

/// A media field: plain URL string, or an expanded relationship.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MediaRef {
    Url(String),
    Nested { data: Option<MediaEntry> },
}

#[derive(Debug, Deserialize)]
struct MediaEntry {
    attributes: MediaAttributes,
}

#[derive(Debug, Deserialize)]
struct MediaAttributes {
    url: String,
}

impl MediaRef {
    fn into_url(self) -> Option<String> {
        match self {
            MediaRef::Url(url) => Some(url),
            MediaRef::Nested { data } => data.map(|entry| entry.attributes.url),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PhotoAttributes {
    slug: String,
    title: Option<String>,
    date: Option<String>,
    image: Option<MediaRef>,
    caption: Option<String>,
    tags: Option<Vec<String>>,
}

impl PhotoAttributes {
    fn into_photo(self, base: &str) -> Photo {
        let title = self
            .title
            .unwrap_or_else(|| merge::title_from_slug(&self.slug));
        let image = self
            .image
            .and_then(MediaRef::into_url)
            .map(|url| paths::prefix(&url, base))
            .unwrap_or_default();
        Photo {
            slug: self.slug,
            title,
            date: self.date,
            image,
            caption: self.caption,
            tags: self.tags.unwrap_or_default(),
            // The CMS carries no technical metadata.
            exif: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArticleAttributes {
    slug: String,
    title: Option<String>,
    date: Option<String>,
    excerpt: Option<String>,
    cover: Option<MediaRef>,
    body: Option<String>,
}

impl ArticleAttributes {
    fn into_article(self, base: &str) -> Result<Article, RemoteError> {
        let date = self
            .date
            .ok_or_else(|| RemoteError::MissingDate(self.slug.clone()))?;
        let title = self
            .title
            .unwrap_or_else(|| merge::title_from_slug(&self.slug));
        let cover = self
            .cover
            .and_then(MediaRef::into_url)
            .map(|url| paths::prefix(&url, base));
        Ok(Article {
            slug: self.slug,
            title,
            date,
            excerpt: self.excerpt,
            cover,
            body: self.body,
        })
    }
}
