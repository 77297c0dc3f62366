//! Collection assembly: directory scan → extraction → merge → sort.
//!
//! Every query re-derives its collection from the source-of-truth files;
//! nothing is cached or persisted between invocations. The assembly order
//! for photos is:
//!
//! ```text
//! list .jpg/.jpeg files   (sorted by filename ascending)
//!   → derive slug per file
//!   → extract EXIF        (rayon-parallel; results indexed, not raced)
//!   → look up sidecar override
//!   → merge per-field
//!   → sort by date descending, stable
//! ```
//!
//! The filename sort before processing matters: the final date sort is
//! stable, so photos sharing a date (or lacking one) keep their
//! filename-ascending relative order. Parallel extraction cannot perturb
//! this — `par_iter().map().collect()` preserves index order, and the
//! explicit sort is the only reordering step.
//!
//! Source-level absences (missing photos dir, missing posts dir, missing
//! catalog) contribute empty collections. Item-level failures degrade or
//! skip that item. Only configuration errors (duplicate slugs, a dateless
//! article) abort a query.

use crate::config::SiteConfig;
use crate::merge;
use crate::metadata;
use crate::paths;
use crate::sidecar::{self, SidecarError};
use crate::types::{Article, CatalogEntry, Photo, Video};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sidecar error: {0}")]
    Sidecar(#[from] SidecarError),
    #[error("two image files map to slug '{0}' in {1}")]
    DuplicateSlug(String, PathBuf),
    #[error("article '{0}' has no date - a date is required for posts")]
    MissingDate(String),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Assemble the photo collection from the media directory plus sidecars.
pub fn assemble_photos(config: &SiteConfig, root: &Path) -> Result<Vec<Photo>, AssembleError> {
    let photos_dir = root.join(&config.photos_dir);
    let files = image_files(&photos_dir)?;

    // Derive slugs up front so a collision is rejected before any work runs.
    let mut slugs = Vec::with_capacity(files.len());
    let mut seen = HashSet::new();
    for filename in &files {
        let slug = sidecar::slug_from_filename(filename);
        if !seen.insert(slug.clone()) {
            return Err(AssembleError::DuplicateSlug(slug, photos_dir.clone()));
        }
        slugs.push(slug);
    }

    let overrides = sidecar::index_photo_sidecars(&root.join(&config.photos_meta_dir))?;

    // Extraction is per-file independent; parallelize it. collect() keeps
    // index order, so the zip below pairs each result with its file.
    let extracted: Vec<metadata::ExtractedMetadata> = files
        .par_iter()
        .map(|filename| metadata::extract(&photos_dir.join(filename)))
        .collect();

    let mut photos: Vec<Photo> = files
        .iter()
        .zip(slugs)
        .zip(extracted)
        .map(|((filename, slug), meta)| {
            let image = paths::prefix(&config.photo_url(filename), &config.base_path);
            merge::resolve(&slug, image, meta, overrides.get(&slug), &config.base_path)
        })
        .collect();

    // Date descending; undated items compare as "" and land at the end.
    // Stable, so filename order survives among ties.
    photos.sort_by(|a, b| {
        b.date
            .as_deref()
            .unwrap_or("")
            .cmp(a.date.as_deref().unwrap_or(""))
    });
    Ok(photos)
}

/// Assemble the article collection from the posts directory.
///
/// Articles require a date: a dateless post would sort arbitrarily, so it is
/// rejected here rather than allowed to drift through the collection.
pub fn assemble_articles(config: &SiteConfig, root: &Path) -> Result<Vec<Article>, AssembleError> {
    let docs = sidecar::read_article_docs(&root.join(&config.posts_dir))?;

    let mut seen = HashSet::new();
    let mut articles = Vec::with_capacity(docs.len());
    for doc in docs {
        if !seen.insert(doc.slug.clone()) {
            return Err(AssembleError::DuplicateSlug(
                doc.slug,
                root.join(&config.posts_dir),
            ));
        }
        let date = doc
            .front
            .date
            .ok_or_else(|| AssembleError::MissingDate(doc.slug.clone()))?;
        let title = doc
            .front
            .title
            .unwrap_or_else(|| merge::title_from_slug(&doc.slug));
        articles.push(Article {
            slug: doc.slug,
            title,
            date,
            excerpt: doc.front.excerpt,
            cover: paths::normalize(doc.front.cover.as_deref(), &config.base_path),
            body: Some(doc.body),
        });
    }

    articles.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(articles)
}

/// Assemble the video collection from the flat catalog document.
///
/// A missing catalog is an empty collection; a malformed one is reported and
/// degraded to empty rather than failing the query. Photo entries in the
/// catalog belong to the photo pipeline and are ignored here.
pub fn assemble_videos(config: &SiteConfig, root: &Path) -> Result<Vec<Video>, AssembleError> {
    let catalog_path = root.join(&config.videos_catalog);
    let raw = match fs::read_to_string(&catalog_path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Vec<CatalogEntry>>(&raw) {
        Ok(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Youtube(v) => Some(Video::Youtube(v)),
                CatalogEntry::Mp4(v) => Some(Video::Mp4(v)),
                CatalogEntry::Photo(_) => None,
            })
            .collect()),
        Err(e) => {
            log::warn!(
                "malformed video catalog {}: {}",
                catalog_path.display(),
                e
            );
            Ok(Vec::new())
        }
    }
}

/// List image filenames in a directory, sorted ascending.
/// A missing directory is an empty list.
fn image_files(dir: &Path) -> Result<Vec<String>, AssembleError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| {
            Path::new(name)
                .extension()
                .map(|ext| {
                    IMAGE_EXTENSIONS
                        .iter()
                        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
                })
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
