//! Embedded image metadata extraction.
//!
//! Reads the bounded set of technical attributes the portfolio displays
//! (capture date, camera make/model, focal length, aperture, ISO, exposure
//! time) from an image file's EXIF block.
//!
//! Extraction failure is never fatal to the pipeline: a corrupt file, an
//! unsupported container, or a missing EXIF block all degrade to an empty
//! [`ExtractedMetadata`]. The photo still appears in the collection — it just
//! carries no technical metadata. Errors are traced at debug level so a
//! curious operator can see why a file yielded nothing.
//!
//! ## Date resolution
//!
//! The capture date prefers `DateTimeOriginal` (when the shutter fired) and
//! falls back to `DateTimeDigitized` (when the file was created) — scanned
//! film and exported edits often carry only the latter. Rendered as an ISO
//! calendar date, `YYYY-MM-DD`.
//!
//! ## Display formatting
//!
//! Focal length and exposure time are formatted here, once, rather than in
//! every consumer: focal length gets a literal `mm` suffix (`"35mm"`), and
//! exposure time becomes the photographic fraction `"1/N"` with `N` the
//! reciprocal rounded to the nearest integer.

use crate::types::Exif;
use exif::{DateTime, In, Reader, Tag, Value};
use std::fs;
use std::io;
use std::path::Path;

/// Technical attributes extracted from one image file.
///
/// This is the extraction half of a photo record, before sidecar overrides
/// are merged in. Everything is optional; [`ExtractedMetadata::default`] is
/// the degraded result for files extraction gave up on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    /// ISO calendar date (`YYYY-MM-DD`) of capture, when determinable.
    pub date: Option<String>,
    pub exif: Exif,
}

/// Extract technical metadata from an image file.
///
/// Never fails: any read or parse problem returns the empty default.
pub fn extract(path: &Path) -> ExtractedMetadata {
    match read_exif(path) {
        Ok(data) => from_exif(&data),
        Err(e) => {
            log::debug!("no EXIF for {}: {}", path.display(), e);
            ExtractedMetadata::default()
        }
    }
}

fn read_exif(path: &Path) -> Result<exif::Exif, exif::Error> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);
    Reader::new().read_from_container(&mut reader)
}

fn from_exif(data: &exif::Exif) -> ExtractedMetadata {
    let date = iso_date(data, Tag::DateTimeOriginal).or_else(|| iso_date(data, Tag::DateTimeDigitized));

    let exif = Exif {
        make: ascii_value(data, Tag::Make),
        model: ascii_value(data, Tag::Model),
        focal_length: rational_value(data, Tag::FocalLength).map(format_focal_length),
        f_number: rational_value(data, Tag::FNumber),
        iso: uint_value(data, Tag::PhotographicSensitivity),
        exposure_time: rational_value(data, Tag::ExposureTime).and_then(format_exposure_time),
    };

    ExtractedMetadata { date, exif }
}

/// EXIF timestamps are `"YYYY:MM:DD HH:MM:SS"`; only the calendar date
/// survives into the record. Unparseable values yield `None`.
fn iso_date(data: &exif::Exif, tag: Tag) -> Option<String> {
    let field = data.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref text) = field.value else {
        return None;
    };
    let dt = DateTime::from_ascii(text.first()?).ok()?;
    Some(format!("{:04}-{:02}-{:02}", dt.year, dt.month, dt.day))
}

fn ascii_value(data: &exif::Exif, tag: Tag) -> Option<String> {
    let field = data.get_field(tag, In::PRIMARY)?;
    let Value::Ascii(ref text) = field.value else {
        return None;
    };
    text.first()
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .filter(|s| !s.is_empty())
}

fn rational_value(data: &exif::Exif, tag: Tag) -> Option<f64> {
    let field = data.get_field(tag, In::PRIMARY)?;
    match field.value {
        Value::Rational(ref v) => v.first().map(|r| r.to_f64()),
        _ => None,
    }
}

fn uint_value(data: &exif::Exif, tag: Tag) -> Option<u32> {
    data.get_field(tag, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// `35.0` → `"35mm"`, `35.5` → `"35.5mm"`.
fn format_focal_length(mm: f64) -> String {
    if mm.fract() == 0.0 {
        format!("{}mm", mm as i64)
    } else {
        format!("{mm}mm")
    }
}

/// `0.004` → `"1/250"`. Non-positive durations yield `None`.
fn format_exposure_time(seconds: f64) -> Option<String> {
    if seconds <= 0.0 {
        return None;
    }
    Some(format!("1/{}", (1.0 / seconds).round() as u32))
}
