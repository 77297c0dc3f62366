//! Photo record resolution: extracted metadata + sidecar override → `Photo`.
//!
//! The merge is per-field, never per-record. A sidecar document that only
//! sets `caption` must not discard the extracted date or tags; each of
//! `title`, `date`, `caption`, `tags`, `image` is replaced only when the
//! override actually carries that field. `exif` is the one exception — it is
//! sourced exclusively from extraction, so curation mistakes in a sidecar
//! can never fabricate technical metadata.

use crate::metadata::ExtractedMetadata;
use crate::paths;
use crate::sidecar::PhotoFront;
use crate::types::Photo;

/// Resolve one photo from its extracted metadata and optional sidecar record.
///
/// `image` is the default (pre-normalized) image reference derived from the
/// file's location; an override-supplied image replaces it after being
/// normalized against `base`.
pub fn resolve(
    slug: &str,
    image: String,
    extracted: ExtractedMetadata,
    front: Option<&PhotoFront>,
    base: &str,
) -> Photo {
    let mut photo = Photo {
        slug: slug.to_string(),
        title: title_from_slug(slug),
        date: extracted.date,
        image,
        caption: None,
        tags: Vec::new(),
        exif: (!extracted.exif.is_empty()).then_some(extracted.exif),
    };

    if let Some(front) = front {
        if let Some(title) = &front.title {
            photo.title = title.clone();
        }
        if let Some(date) = &front.date {
            photo.date = Some(date.clone());
        }
        if let Some(caption) = &front.caption {
            photo.caption = Some(caption.clone());
        }
        if let Some(tags) = &front.tags {
            photo.tags = tags.clone();
        }
        if let Some(image) = &front.image {
            photo.image = paths::prefix(image, base);
        }
    }

    photo
}

/// Default title derivation: runs of `-`/`_` become single spaces, the first
/// character is uppercased. `shibuya-crossing_night` → `"Shibuya crossing night"`.
pub fn title_from_slug(slug: &str) -> String {
    let mut spaced = String::with_capacity(slug.len());
    let mut prev_space = false;
    for c in slug.chars() {
        if c == '-' || c == '_' {
            if !prev_space {
                spaced.push(' ');
            }
            prev_space = true;
        } else {
            spaced.push(c);
            prev_space = false;
        }
    }

    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exif;

    fn extracted_with_date() -> ExtractedMetadata {
        ExtractedMetadata {
            date: Some("2023-05-01".to_string()),
            exif: Exif {
                make: Some("FUJIFILM".to_string()),
                iso: Some(200),
                ..Exif::default()
            },
        }
    }

    // =========================================================================
    // title_from_slug() tests
    // =========================================================================

    #[test]
    fn title_replaces_separators_and_capitalizes() {
        assert_eq!(title_from_slug("osaka"), "Osaka");
        assert_eq!(title_from_slug("tokyo-night"), "Tokyo night");
        assert_eq!(title_from_slug("old_town_square"), "Old town square");
    }

    #[test]
    fn title_collapses_separator_runs() {
        assert_eq!(title_from_slug("foo--bar__baz"), "Foo bar baz");
    }

    #[test]
    fn title_trims_edge_separators() {
        assert_eq!(title_from_slug("-leading"), "Leading");
        assert_eq!(title_from_slug("trailing-"), "Trailing");
    }

    #[test]
    fn title_of_empty_slug_is_empty() {
        assert_eq!(title_from_slug(""), "");
        assert_eq!(title_from_slug("---"), "");
    }

    // =========================================================================
    // resolve() tests
    // =========================================================================

    #[test]
    fn no_override_keeps_extracted_values_and_defaults() {
        let photo = resolve(
            "tokyo-night",
            "/photos/tokyo-night.jpg".to_string(),
            extracted_with_date(),
            None,
            "/",
        );

        assert_eq!(photo.title, "Tokyo night");
        assert_eq!(photo.date.as_deref(), Some("2023-05-01"));
        assert_eq!(photo.caption, None);
        assert!(photo.tags.is_empty());
        assert_eq!(photo.exif.as_ref().unwrap().iso, Some(200));
    }

    #[test]
    fn override_is_per_field_not_per_record() {
        let front = PhotoFront {
            caption: Some("Shibuya crossing".to_string()),
            ..PhotoFront::default()
        };
        let photo = resolve(
            "tokyo",
            "/photos/tokyo.jpg".to_string(),
            extracted_with_date(),
            Some(&front),
            "/",
        );

        // Only caption overridden; everything else extracted/defaulted
        assert_eq!(photo.caption.as_deref(), Some("Shibuya crossing"));
        assert_eq!(photo.date.as_deref(), Some("2023-05-01"));
        assert_eq!(photo.title, "Tokyo");
        assert_eq!(photo.exif.as_ref().unwrap().make.as_deref(), Some("FUJIFILM"));
    }

    #[test]
    fn present_fields_all_override() {
        let front = PhotoFront {
            title: Some("Neon Rain".to_string()),
            date: Some("2024-12-31".to_string()),
            caption: Some("caption".to_string()),
            tags: Some(vec!["city".to_string()]),
            image: None,
        };
        let photo = resolve(
            "tokyo",
            "/photos/tokyo.jpg".to_string(),
            extracted_with_date(),
            Some(&front),
            "/",
        );

        assert_eq!(photo.title, "Neon Rain");
        assert_eq!(photo.date.as_deref(), Some("2024-12-31"));
        assert_eq!(photo.tags, vec!["city".to_string()]);
    }

    #[test]
    fn exif_never_overridden_by_sidecar() {
        // PhotoFront has no exif field at all; extraction is the only source.
        let front = PhotoFront {
            title: Some("T".to_string()),
            ..PhotoFront::default()
        };
        let photo = resolve(
            "x",
            "/photos/x.jpg".to_string(),
            extracted_with_date(),
            Some(&front),
            "/",
        );
        assert_eq!(photo.exif.as_ref().unwrap().make.as_deref(), Some("FUJIFILM"));
    }

    #[test]
    fn override_image_is_base_normalized() {
        let front = PhotoFront {
            image: Some("/covers/alt.jpg".to_string()),
            ..PhotoFront::default()
        };
        let photo = resolve(
            "x",
            "/portfolio/photos/x.jpg".to_string(),
            ExtractedMetadata::default(),
            Some(&front),
            "/portfolio",
        );
        assert_eq!(photo.image, "/portfolio/covers/alt.jpg");
    }

    #[test]
    fn empty_extraction_yields_no_exif_record() {
        let photo = resolve(
            "osaka",
            "/photos/osaka.jpg".to_string(),
            ExtractedMetadata::default(),
            None,
            "/",
        );
        assert_eq!(photo.date, None);
        assert!(photo.exif.is_none());
    }
}
