//! Uniform data model every plugin produces.
//!
//! JSON keys are camelCase so the shape matches what a host application reads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder cover used when a site gives no usable image.
pub const DEFAULT_COVER: &str = "https://placehold.co/300x450/png?text=No+Cover";

/// One entry of a listing or search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovelItem {
    pub name: String,
    /// Site-relative path or absolute URL; resolved by the owning plugin.
    pub path: String,
    /// Always absolute, or [DEFAULT_COVER].
    pub cover: String,
}

/// Novel detail page: listing fields, metadata, and chapters oldest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNovel {
    pub path: String,
    pub name: String,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub status: NovelStatus,
    #[serde(default)]
    pub chapters: Vec<ChapterItem>,
}

impl SourceNovel {
    /// Empty detail for `path`; plugins fill the rest.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            cover: DEFAULT_COVER.to_string(),
            summary: None,
            author: None,
            artist: None,
            genres: Vec::new(),
            status: NovelStatus::Unknown,
            chapters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterItem {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_number: Option<f64>,
    /// Chapter-list page this entry came from, for page-wise loading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl ChapterItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            release_time: None,
            chapter_number: None,
            page: None,
        }
    }
}

/// One page of a paginated chapter list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePage {
    pub chapters: Vec<ChapterItem>,
}

/// Publication status. Closed set; site vocabularies map onto it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NovelStatus {
    Ongoing,
    Completed,
    OnHiatus,
    Cancelled,
    #[default]
    Unknown,
}

impl NovelStatus {
    /// Map site text through `vocabulary` (site word, status). Case-insensitive, whitespace-trimmed.
    /// Anything not in the table is [NovelStatus::Unknown].
    pub fn from_site_text(text: &str, vocabulary: &[(&str, NovelStatus)]) -> NovelStatus {
        let text = text.trim();
        vocabulary
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(text))
            .map(|(_, status)| *status)
            .unwrap_or(NovelStatus::Unknown)
    }
}

impl fmt::Display for NovelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NovelStatus::Ongoing => "Ongoing",
            NovelStatus::Completed => "Completed",
            NovelStatus::OnHiatus => "On Hiatus",
            NovelStatus::Cancelled => "Cancelled",
            NovelStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}
