//! DarkStar Translations. Every page embeds its data as JSON in `div#app[data-page]`,
//! so listing, detail, and chapter all read `props` from that blob instead of the DOM.

use crate::filters::FilterSet;
use crate::model::{ChapterItem, NovelItem, NovelStatus, SourceNovel};
use crate::plugins::html::parse_selector;
use crate::plugins::url::{encode_query, resolve_cover};
use crate::plugins::{
    fetch_text, Plugin, PluginError, PluginId, PoliteClient, PopularOptions,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

pub const SITE: &str = "https://darkstartranslations.com";

/// Accounts the site posts under; shown as the group name.
const HOUSE_ACCOUNTS: &[&str] = &["DarkStarTL", "GalaxyTL"];
const HOUSE_AUTHOR: &str = "DarkStar Translations";

const STATUS_VOCABULARY: &[(&str, NovelStatus)] = &[
    ("ongoing", NovelStatus::Ongoing),
    ("completed", NovelStatus::Completed),
    ("end", NovelStatus::Completed),
    ("hiatus", NovelStatus::OnHiatus),
    ("dropped", NovelStatus::Cancelled),
    ("cancelled", NovelStatus::Cancelled),
];

pub struct DarkStarPlugin<'a> {
    client: &'a mut PoliteClient,
}

#[derive(Debug, Default, Deserialize)]
struct CoverRef {
    thumbnail_url: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatestEntry {
    series_slug: Option<String>,
    title: Option<String>,
    #[serde(rename = "coverImage")]
    cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    slug: Option<String>,
    title: Option<String>,
    cover: Option<CoverRef>,
    #[serde(rename = "coverImage")]
    cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Series {
    slug: Option<String>,
    title: Option<String>,
    cover: Option<CoverRef>,
    #[serde(rename = "coverImage")]
    cover_image: Option<String>,
    description: Option<String>,
    user: Option<NamedRef>,
    story_state: Option<String>,
    #[serde(default)]
    genres: Vec<Value>,
    #[serde(default)]
    chapters: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChapterEntry {
    slug: Option<String>,
    name: Option<String>,
    title: Option<String>,
    number: Option<Value>,
    created_at: Option<String>,
}

/// Read `props` from the `data-page` attribute of `div#app`.
fn page_props(html: &str, url: &str) -> Result<Value, PluginError> {
    let doc = Html::parse_document(html);
    let app_sel = parse_selector("div#app")?;
    let raw = doc
        .select(&app_sel)
        .next()
        .and_then(|e| e.value().attr("data-page"))
        .ok_or_else(|| PluginError::missing("data-page attribute", url))?;
    let mut page: Value = serde_json::from_str(raw)
        .map_err(|e| PluginError::parse(format!("data-page JSON on {}", url), e))?;
    match page.get_mut("props") {
        Some(props) => Ok(props.take()),
        None => Err(PluginError::missing("data-page props", url)),
    }
}

/// Decode each element of `props.{key}.data` on its own so one malformed entry is skipped, not fatal.
fn list_entries<T: for<'de> Deserialize<'de>>(props: &Value, key: &str) -> Vec<T> {
    props
        .get(key)
        .and_then(|l| l.get("data"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_latest(props: &Value) -> Vec<NovelItem> {
    list_entries::<LatestEntry>(props, "latestUpdates")
        .into_iter()
        .filter_map(|e| {
            let slug = non_empty(e.series_slug)?;
            let name = non_empty(e.title)?;
            Some(NovelItem {
                name,
                path: format!("/series/{}", slug),
                cover: resolve_cover(SITE, e.cover_image.as_deref()),
            })
        })
        .collect()
}

fn parse_series_list(props: &Value) -> Vec<NovelItem> {
    list_entries::<SeriesEntry>(props, "seriesList")
        .into_iter()
        .filter_map(|e| {
            let slug = non_empty(e.slug)?;
            let name = non_empty(e.title)?;
            let cover = e.cover.unwrap_or_default();
            let raw_cover = non_empty(cover.thumbnail_url)
                .or_else(|| non_empty(cover.url))
                .or_else(|| non_empty(e.cover_image));
            Some(NovelItem {
                name,
                path: format!("/series/{}", slug),
                cover: resolve_cover(SITE, raw_cover.as_deref()),
            })
        })
        .collect()
}

/// `created_at` as `YYYY-MM-DD HH:mm`. Unrecognized formats are passed through.
fn format_release(raw: &str) -> String {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

/// Label for a chapter number value: `12`, `12.5`, or a numeric string.
fn number_label(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn html_to_text(fragment: &str) -> String {
    Html::parse_fragment(fragment)
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_series(props: &Value, path: &str, url: &str) -> Result<SourceNovel, PluginError> {
    let series_value = props
        .get("series")
        .filter(|v| v.is_object())
        .ok_or_else(|| PluginError::missing("series data", url))?;
    let series: Series = serde_json::from_value(series_value.clone())
        .map_err(|e| PluginError::parse(format!("series data on {}", url), e))?;
    let series_slug = non_empty(series.slug).ok_or_else(|| PluginError::missing("series slug", url))?;

    let mut novel = SourceNovel::new(
        path,
        non_empty(series.title).unwrap_or_else(|| "Untitled".to_string()),
    );
    let cover = series.cover.unwrap_or_default();
    let raw_cover = non_empty(cover.url).or_else(|| non_empty(series.cover_image));
    novel.cover = resolve_cover(SITE, raw_cover.as_deref());
    novel.summary = series
        .description
        .as_deref()
        .map(html_to_text)
        .filter(|s| !s.is_empty());
    let user = series.user.and_then(|u| non_empty(u.name));
    novel.author = Some(match user {
        Some(name) if HOUSE_ACCOUNTS.contains(&name.as_str()) => HOUSE_AUTHOR.to_string(),
        Some(name) => name,
        None => "Unknown".to_string(),
    });
    novel.status = series
        .story_state
        .as_deref()
        .map(|s| NovelStatus::from_site_text(s, STATUS_VOCABULARY))
        .unwrap_or_default();
    novel.genres = series
        .genres
        .iter()
        .filter_map(|g| g.get("name").and_then(Value::as_str))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let mut chapters: Vec<ChapterItem> = series
        .chapters
        .into_iter()
        .filter_map(|v| serde_json::from_value::<ChapterEntry>(v).ok())
        .filter_map(|ch| {
            let slug = non_empty(ch.slug)?;
            let number_text = ch.number.as_ref().and_then(number_label);
            let name = non_empty(ch.name)
                .or_else(|| non_empty(ch.title))
                .or_else(|| number_text.map(|n| format!("Chapter {}", n)))?;
            Some(ChapterItem {
                name,
                path: format!("/series/{}/{}", series_slug, slug),
                release_time: ch.created_at.as_deref().map(format_release),
                chapter_number: ch.number.as_ref().and_then(Value::as_f64),
                page: None,
            })
        })
        .collect();
    // Site lists newest first.
    chapters.reverse();
    novel.chapters = fill_chapter_gaps(chapters, &series_slug);
    Ok(novel)
}

/// Highest chapter number gap filling will synthesize up to.
const MAX_FILLED_CHAPTER: u64 = 10_000;

/// The series payload can omit older chapters. When every chapter is numbered, add placeholder
/// entries for the missing whole numbers from 1 up to the highest one, then order by number.
fn fill_chapter_gaps(chapters: Vec<ChapterItem>, series_slug: &str) -> Vec<ChapterItem> {
    let numbers: Option<Vec<f64>> = chapters.iter().map(|c| c.chapter_number).collect();
    let numbers = match numbers {
        Some(n) if !n.is_empty() => n,
        _ => return chapters,
    };
    let max = numbers.iter().copied().fold(0.0_f64, f64::max).floor();
    if !max.is_finite() || max > MAX_FILLED_CHAPTER as f64 {
        tracing::warn!(
            series = series_slug,
            highest = max,
            "chapter number too large to fill gaps; keeping listed chapters only"
        );
        return chapters;
    }
    let max = max as u64;
    let present: std::collections::HashSet<u64> = numbers
        .iter()
        .filter(|n| **n >= 1.0 && n.fract() == 0.0)
        .map(|n| *n as u64)
        .collect();
    let mut filled = chapters;
    let before = filled.len();
    for n in 1..=max {
        if !present.contains(&n) {
            filled.push(ChapterItem {
                name: format!("Chapter {}", n),
                path: format!("/series/{}/chapter-{}", series_slug, n),
                release_time: None,
                chapter_number: Some(n as f64),
                page: None,
            });
        }
    }
    if filled.len() != before {
        tracing::debug!(
            series = series_slug,
            added = filled.len() - before,
            "filled chapter number gaps"
        );
    }
    filled.sort_by(|a, b| {
        a.chapter_number
            .unwrap_or(0.0)
            .total_cmp(&b.chapter_number.unwrap_or(0.0))
    });
    filled
}

fn is_set(v: &Value, key: &str) -> bool {
    match v.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

fn parse_chapter_props(props: &Value, url: &str) -> Result<String, PluginError> {
    let chapter = props
        .get("chapter")
        .filter(|v| v.is_object())
        .ok_or_else(|| PluginError::missing("chapter data", url))?;
    if ["is_locked", "locked", "is_premium"]
        .iter()
        .any(|k| is_set(chapter, k))
    {
        return Err(PluginError::Locked {
            url: url.to_string(),
        });
    }
    let content = chapter
        .get("content")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| PluginError::missing("chapter content", url))?;
    let mut doc = Html::parse_fragment(content);
    crate::plugins::html::remove_matching(&mut doc, &["div.ad-container"])?;
    Ok(doc.root_element().inner_html())
}

/// Catalogue URL: `sortBy` is `sort|order`; genre and tag slugs are comma-joined.
fn listing_url(page: u32, filters: &FilterSet, options: &PopularOptions) -> String {
    let sort_by = filters.picker(&options.filters, "sortBy");
    let (sort, order) = sort_by.split_once('|').unwrap_or((sort_by.as_str(), "desc"));
    let mut url = format!(
        "{}/series?order={}&page={}&sort={}",
        SITE, order, page, sort
    );
    let genres = filters.checkboxes(&options.filters, "genres");
    if !genres.is_empty() {
        url.push_str(&format!("&genres={}", genres.join(",")));
    }
    let tags = filters.checkboxes(&options.filters, "tags");
    if !tags.is_empty() {
        url.push_str(&format!("&tags={}", tags.join(",")));
    }
    url
}

impl<'a> DarkStarPlugin<'a> {
    pub fn new(client: &'a mut PoliteClient) -> Self {
        Self { client }
    }

    fn props(&mut self, url: &str) -> Result<Value, PluginError> {
        let html = fetch_text(self.client, url, &[])?;
        page_props(&html, url)
    }
}

impl Plugin for DarkStarPlugin<'_> {
    fn id(&self) -> PluginId {
        PluginId::DarkStarTranslations
    }

    fn popular_novels(
        &mut self,
        page: u32,
        options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError> {
        if options.show_latest {
            let props = self.props(SITE)?;
            return Ok(parse_latest(&props));
        }
        let url = listing_url(page, &self.filters(), options);
        let props = self.props(&url)?;
        Ok(parse_series_list(&props))
    }

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError> {
        let url = self.resolve_url(path);
        let props = self.props(&url)?;
        parse_series(&props, path, &url)
    }

    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError> {
        let url = self.resolve_url(path);
        let props = self.props(&url)?;
        parse_chapter_props(&props, &url)
    }

    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError> {
        let url = format!(
            "{}/series?page={}&search={}",
            SITE,
            page,
            encode_query(term)
        );
        let props = self.props(&url)?;
        Ok(parse_series_list(&props))
    }
}
