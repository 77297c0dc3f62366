//! Unified content records shared by the local and remote pipelines.
//!
//! Both resolution modes (filesystem scan and remote CMS fetch) produce these
//! same shapes, so the presentation layer never sees which source a record
//! came from. Optional fields use `Option` throughout: override precedence in
//! the merge step depends on a field being *present or absent*, not on it
//! being truthy, so nothing here collapses `None` into an empty default
//! before merging is done.

use serde::{Deserialize, Serialize};

/// A single photo, resolved from an image file plus its optional sidecar
/// document (local mode) or a CMS record (remote mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Lookup key: image filename with the extension stripped, lowercased.
    /// Also the merge key matching the photo to its sidecar document.
    pub slug: String,
    /// Human-readable title; derived from the slug unless overridden.
    pub title: String,
    /// ISO calendar date (`YYYY-MM-DD`), usually the EXIF capture date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Image reference, always normalized against the deployment base path.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Technical metadata from the image file itself; never sidecar-supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif: Option<Exif>,
}

/// Technical capture attributes read from an image's embedded metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exif {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Formatted with a `mm` suffix, e.g. `"35mm"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<u32>,
    /// Formatted as a fractional second, e.g. `"1/250"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<String>,
}

impl Exif {
    /// True when extraction found nothing at all.
    pub fn is_empty(&self) -> bool {
        *self == Exif::default()
    }
}

/// An article parsed from a markdown document in the posts directory.
///
/// `body` is raw markdown; rendering to HTML is the presentation layer's
/// concern, not this crate's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    pub title: String,
    /// Required for articles — a post without a date is a data-quality
    /// defect and is rejected at assembly time.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Cover image reference, normalized against the deployment base path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// A hosted-platform video reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeVideo {
    /// Platform video identifier (the `v=` parameter).
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A self-hosted video file reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mp4Video {
    /// Source URL of the video file.
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A video entry from the catalog, discriminated by its `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Video {
    Youtube(YoutubeVideo),
    Mp4(Mp4Video),
}

/// One record of the flat media catalog document.
///
/// Historical catalogs mixed photo records in with videos under the same
/// `type` discriminator, so the catalog schema keeps all three variants;
/// the video query selects by variant match and ignores photo entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogEntry {
    Photo(Photo),
    Youtube(YoutubeVideo),
    Mp4(Mp4Video),
}
