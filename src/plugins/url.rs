//! URL resolution against a plugin's site origin.

use crate::model::DEFAULT_COVER;
use reqwest::Url;
use url::form_urlencoded;

/// Resolve a cover image reference to an absolute URL.
///
/// `//host/x` gets an `https:` scheme, `/x` is prefixed with `site`, absolute `http(s)` URLs
/// are kept, and anything else (absent, empty, bare relative, `data:`) yields the default cover.
pub fn resolve_cover(site: &str, raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return DEFAULT_COVER.to_string(),
    };
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if raw.starts_with('/') {
        return format!("{}{}", site.trim_end_matches('/'), raw);
    }
    if is_absolute(raw) {
        return raw.to_string();
    }
    DEFAULT_COVER.to_string()
}

/// Resolve a novel or chapter path to an absolute URL. Absolute input is returned unchanged.
pub fn resolve_path(site: &str, path: &str) -> String {
    let path = path.trim();
    if is_absolute(path) {
        return path.to_string();
    }
    if let Some(rest) = path.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    format!(
        "{}/{}",
        site.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Path component of an absolute URL (`new URL(x).pathname`). Root-relative input is returned as is.
pub fn url_path(url: &str) -> Option<String> {
    let url = url.trim();
    if url.starts_with('/') && !url.starts_with("//") {
        return Some(url.to_string());
    }
    Url::parse(url).ok().map(|u| u.path().to_string())
}

/// Percent-encode a search term for a query string (form style, spaces as `+`).
pub fn encode_query(term: &str) -> String {
    form_urlencoded::byte_serialize(term.as_bytes()).collect()
}

/// Build `base?k=v&...` with form-style encoding. Pairs with empty values are kept.
pub fn with_query(base: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return base.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", base, query)
}

fn is_absolute(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
