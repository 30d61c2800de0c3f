//! Token extraction from inline scripts and link text. Pure functions over strings.

use regex::Regex;
use std::sync::LazyLock;

static CSRF_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.CSRF_TOKEN\s*=\s*"([^"]+)""#).expect("valid regex")
});

static BOOK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const\s+OBJECT_BY_COMMENT\s*=\s*([0-9]+)").expect("valid regex"));

static CHAPTER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"const\s+CHAPTER_ID\s*=\s*"([0-9]+)"#).expect("valid regex"));

static PAGE_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]page=(\d+)").expect("valid regex"));

static VOLUME_CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Vol\.?\s*\d+\s*Ch\.?\s*(\d+(?:\.\d+)?)").expect("valid regex")
});

static CHAPTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Ch\.?\s*(\d+(?:\.\d+)?)").expect("valid regex"));

fn first_capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// `window.CSRF_TOKEN = "..."`
pub fn csrf_token(body: &str) -> Option<String> {
    first_capture(&CSRF_TOKEN_RE, body)
}

/// `const OBJECT_BY_COMMENT = 123`
pub fn book_id(body: &str) -> Option<String> {
    first_capture(&BOOK_ID_RE, body)
}

/// `const CHAPTER_ID = "456"`
pub fn chapter_id(body: &str) -> Option<String> {
    first_capture(&CHAPTER_ID_RE, body)
}

/// `page=N` from a link's query string.
pub fn page_param(href: &str) -> Option<u32> {
    first_capture(&PAGE_PARAM_RE, href).and_then(|n| n.parse().ok())
}

/// Chapter number from labels like `Vol. 2 Ch. 14` or `Ch. 3.5`. Volume form wins.
pub fn chapter_number(label: &str) -> Option<f64> {
    first_capture(&VOLUME_CHAPTER_RE, label)
        .or_else(|| first_capture(&CHAPTER_RE, label))
        .and_then(|n| n.parse().ok())
}
