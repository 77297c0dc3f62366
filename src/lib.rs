//! # Folio
//!
//! Content ingestion and normalization for static photo/article portfolio
//! sites. Your filesystem is the data source: drop a `.jpg` in the photos
//! directory and a card exists; add a same-named markdown sidecar to curate
//! its metadata; write posts as markdown with frontmatter. A remote CMS can
//! answer the same queries instead, behind the same record shapes.
//!
//! # Architecture: Multi-Source Resolution Pipeline
//!
//! Every query re-derives its collection from source-of-truth files (or a
//! remote fetch) — no database, no cache, no incremental state to go stale:
//!
//! ```text
//! scan photos dir ──▶ extract EXIF ──┐
//!                                    ├──▶ merge per-field ──▶ sort ──▶ Vec<Photo>
//! index sidecar .md ─────────────────┘
//! ```
//!
//! Merging is field-level with deterministic precedence: a sidecar document
//! overrides exactly the fields it carries; everything else keeps its
//! extracted or derived value. Technical metadata (`exif`) is never
//! sidecar-supplied.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Public query surface — routes to the local or remote pipeline |
//! | [`assemble`] | Scan → extract → merge → sort orchestration per collection |
//! | [`metadata`] | EXIF extraction with graceful degradation |
//! | [`sidecar`] | Frontmatter parsing and the slug-keyed override index |
//! | [`merge`] | Field-level override resolution into final `Photo` records |
//! | [`remote`] | CMS envelope fetch and mapping onto the unified shapes |
//! | [`paths`] | Deployment base-path normalization for asset references |
//! | [`config`] | `config.toml` loading, defaults, validation |
//! | [`types`] | The unified `Photo` / `Article` / `Video` record shapes |
//!
//! # Design Decisions
//!
//! ## One Record Shape, Two Sources
//!
//! Local scanning and the remote CMS produce identical records, normalized
//! against the same deployment base path. The presentation layer never
//! branches on the data source; switching a site from filesystem to CMS is
//! one config key.
//!
//! ## Presence, Not Truthiness
//!
//! Override precedence works on `Option` presence. An empty caption in a
//! sidecar is still a caption; an absent one keeps the extracted value. The
//! intermediate records never collapse `None` into defaults before the merge
//! step has run.
//!
//! ## Contained Failure
//!
//! A corrupt image or a malformed sidecar affects exactly one item — logged,
//! degraded or skipped, never fatal to the collection. Whole-source failures
//! (an unreachable CMS) propagate instead: there is no local data to fall
//! back to, and a silently empty portfolio is worse than an error page.

pub mod assemble;
pub mod config;
pub mod merge;
pub mod metadata;
pub mod paths;
pub mod remote;
pub mod sidecar;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
