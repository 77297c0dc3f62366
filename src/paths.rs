//! Base-path normalization for asset references.
//!
//! Sites deployed under a subpath (GitHub Pages serves project sites from
//! `https://user.github.io/<repo>/`) need every root-relative asset reference
//! rewritten to include that prefix. Sidecar documents and the remote CMS are
//! written without knowledge of the deployment base, so normalization happens
//! here, in one place, as records are assembled.
//!
//! The rules, applied in order:
//!
//! 1. Absolute `http://`/`https://` URLs pass through untouched.
//! 2. Paths already carrying the base prefix pass through (idempotent — a
//!    record can be normalized twice without doubling the prefix).
//! 3. Root-relative paths (`/photos/x.jpg`) get the base prepended, with the
//!    base's trailing slash stripped first so `/portfolio/` + `/photos/x.jpg`
//!    yields `/portfolio/photos/x.jpg`, not `/portfolio//photos/x.jpg`.
//! 4. Bare relative paths get the base prepended directly.

/// Rewrite an optional path reference against the deployment base path.
///
/// `None` passes through unchanged; see [`prefix`] for the rewrite rules.
pub fn normalize(path: Option<&str>, base: &str) -> Option<String> {
    path.map(|p| prefix(p, base))
}

/// Rewrite a path reference against the deployment base path.
pub fn prefix(path: &str, base: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    if path.starts_with(base) {
        return path.to_string();
    }
    if path.starts_with('/') {
        return format!("{}{}", base.trim_end_matches('/'), path);
    }
    format!("{base}{path}")
}

fn is_absolute_url(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_path_passes_through() {
        assert_eq!(normalize(None, "/portfolio"), None);
    }

    #[test]
    fn absolute_url_is_noop() {
        assert_eq!(
            prefix("https://cdn.example.com/a.jpg", "/portfolio"),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            prefix("http://example.com/b.jpg", "/portfolio"),
            "http://example.com/b.jpg"
        );
    }

    #[test]
    fn absolute_url_scheme_is_case_insensitive() {
        assert_eq!(
            prefix("HTTPS://cdn.example.com/a.jpg", "/portfolio"),
            "HTTPS://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn root_relative_gets_base_prepended() {
        assert_eq!(
            prefix("/photos/tokyo.jpg", "/portfolio"),
            "/portfolio/photos/tokyo.jpg"
        );
    }

    #[test]
    fn trailing_slash_base_does_not_double_separator() {
        let result = prefix("/photos/tokyo.jpg", "/portfolio/");
        assert_eq!(result, "/portfolio/photos/tokyo.jpg");
        assert!(!result.contains("//"));
    }

    #[test]
    fn already_prefixed_is_idempotent() {
        let once = prefix("/photos/tokyo.jpg", "/portfolio");
        let twice = prefix(&once, "/portfolio");
        assert_eq!(once, twice);
    }

    #[test]
    fn bare_relative_gets_base_prepended_directly() {
        assert_eq!(prefix("photos/a.jpg", "/portfolio/"), "/portfolio/photos/a.jpg");
    }

    #[test]
    fn root_base_leaves_root_relative_paths_alone() {
        // "/" prefixes every root-relative path already, so nothing changes.
        assert_eq!(prefix("/photos/tokyo.jpg", "/"), "/photos/tokyo.jpg");
    }

    #[test]
    fn normalize_wraps_prefix() {
        assert_eq!(
            normalize(Some("/covers/x.jpg"), "/portfolio"),
            Some("/portfolio/covers/x.jpg".to_string())
        );
    }
}
