//! Shared test fixtures: synthetic JPEG files with real EXIF payloads.
//!
//! Tests need image files whose EXIF block parses for real — stub bytes only
//! exercise the degradation path. The `exif` crate's experimental writer
//! produces a raw TIFF-format EXIF buffer; wrapping it in a JPEG APP1
//! segment (SOI, APP1 with the `Exif\0\0` identifier, EOI) is enough for the
//! reader to find it. No pixel data is needed for metadata extraction.

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// Build an EXIF field for the primary image.
pub(crate) fn exif_field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

/// Write a minimal JPEG carrying the given EXIF fields to `path`.
pub(crate) fn write_jpeg_with_exif(path: &Path, fields: &[Field]) {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut raw = Cursor::new(Vec::new());
    writer.write(&mut raw, false).expect("write EXIF buffer");
    let tiff = raw.into_inner();

    let mut jpeg = Vec::with_capacity(tiff.len() + 16);
    jpeg.extend_from_slice(&[0xFF, 0xD8]); // SOI
    jpeg.extend_from_slice(&[0xFF, 0xE1]); // APP1
    let segment_len = (2 + 6 + tiff.len()) as u16; // length field + "Exif\0\0" + payload
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI

    std::fs::write(path, jpeg).expect("write fixture JPEG");
}

/// Write a JPEG with just a capture date, the common fixture case.
pub(crate) fn write_jpeg_with_date(path: &Path, timestamp: &str) {
    let field = exif_field(
        Tag::DateTimeOriginal,
        Value::Ascii(vec![timestamp.as_bytes().to_vec()]),
    );
    write_jpeg_with_exif(path, std::slice::from_ref(&field));
}
