//! Sidecar document parsing and indexing.
//!
//! A sidecar document is a hand-written markdown file whose YAML frontmatter
//! supplies or overrides metadata for the asset sharing its slug:
//!
//! ```text
//! content/photos/tokyo.md          overrides public/photos/tokyo.jpg
//! content/posts/first-post.md      is the article "first-post"
//! ```
//!
//! Frontmatter is the `---`-fenced YAML header; everything after the closing
//! fence is the body (ignored for photos, kept as raw markdown for articles).
//! Header records keep `Option` presence semantics — the merge step must see
//! the difference between "field absent" and "field empty".
//!
//! ## Failure containment
//!
//! One malformed document must not poison the rest of the directory: YAML
//! parse failures are logged as warnings and the document is skipped. Two
//! documents deriving the same slug, though, are a configuration error — the
//! winner would depend on filesystem iteration order, so the scan rejects the
//! directory outright instead of silently picking one.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("two sidecar documents map to slug '{0}' in {1}")]
    DuplicateSlug(String, PathBuf),
}

/// Photo metadata overrides from a sidecar document's frontmatter.
///
/// Every field is optional: only fields the author actually wrote override
/// the extracted values. Unknown keys are tolerated (frontmatter is
/// hand-written and often carries presentation-only extras).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoFront {
    pub title: Option<String>,
    pub date: Option<String>,
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

/// Article header fields from a post document's frontmatter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFront {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub cover: Option<String>,
}

/// A parsed article document: header record plus raw markdown body.
#[derive(Debug, Clone)]
pub struct ArticleDoc {
    pub slug: String,
    pub front: ArticleFront,
    pub body: String,
}

/// Derive the slug for a sidecar document or image file.
///
/// Filename stem, lowercased — both sides of the photo/sidecar pairing use
/// this exact derivation, so the override lookup is a plain map hit.
pub fn slug_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| filename.to_string());
    stem.to_lowercase()
}

/// Split a document into its YAML frontmatter and body.
///
/// Returns `(None, text)` when there is no opening fence on the first line or
/// no closing fence at all — the whole text is then the body.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let Some(after_open) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    // Degenerate but legal: the closing fence immediately follows the opener.
    if let Some(body) = after_open
        .strip_prefix("---\n")
        .or_else(|| after_open.strip_prefix("---\r\n"))
    {
        return (Some(""), body);
    }

    for (idx, _) in after_open.match_indices("\n---") {
        let after_close = &after_open[idx + "\n---".len()..];
        let is_fence_line = after_close.is_empty()
            || after_close.starts_with('\n')
            || after_close.starts_with("\r\n");
        if is_fence_line {
            let header = after_open[..idx]
                .strip_suffix('\r')
                .unwrap_or(&after_open[..idx]);
            let body = after_close
                .strip_prefix("\r\n")
                .or_else(|| after_close.strip_prefix('\n'))
                .unwrap_or(after_close);
            return (Some(header), body);
        }
    }

    (None, text)
}

fn parse_front<T: Default + for<'de> Deserialize<'de>>(
    header: Option<&str>,
) -> Result<T, serde_yaml::Error> {
    match header {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml),
        _ => Ok(T::default()),
    }
}

/// Build the photo override index: slug → frontmatter record.
///
/// A missing directory is an empty index, not an error. Malformed documents
/// are skipped with a warning; duplicate slugs reject the whole directory.
pub fn index_photo_sidecars(dir: &Path) -> Result<HashMap<String, PhotoFront>, SidecarError> {
    let mut index = HashMap::new();
    for path in markdown_files(dir)? {
        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        let slug = slug_from_filename(&filename);

        let raw = fs::read_to_string(&path)?;
        let (header, _body) = split_frontmatter(&raw);
        let front: PhotoFront = match parse_front(header) {
            Ok(front) => front,
            Err(e) => {
                log::warn!("skipping malformed sidecar {}: {}", path.display(), e);
                continue;
            }
        };

        if index.insert(slug.clone(), front).is_some() {
            return Err(SidecarError::DuplicateSlug(slug, dir.to_path_buf()));
        }
    }
    Ok(index)
}

/// Read all article documents from the posts directory.
///
/// A missing directory yields an empty list. Malformed frontmatter skips the
/// document with a warning, same as photo sidecars. Ordering and the
/// required-date rule are the assembler's concern, not this reader's.
pub fn read_article_docs(dir: &Path) -> Result<Vec<ArticleDoc>, SidecarError> {
    let mut docs = Vec::new();
    for path in markdown_files(dir)? {
        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        let slug = slug_from_filename(&filename);

        let raw = fs::read_to_string(&path)?;
        let (header, body) = split_frontmatter(&raw);
        let front: ArticleFront = match parse_front(header) {
            Ok(front) => front,
            Err(e) => {
                log::warn!("skipping malformed post {}: {}", path.display(), e);
                continue;
            }
        };

        docs.push(ArticleDoc {
            slug,
            front,
            body: body.to_string(),
        });
    }
    Ok(docs)
}

/// List `.md` files in a directory, sorted by filename for determinism.
/// A missing directory is an empty list.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>, SidecarError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
