//! MyNovels. The chapter list is served page by page from an AJAX endpoint guarded by the
//! CSRF token and book id embedded in the novel page; chapter text comes from a second
//! AJAX endpoint keyed by the chapter id.

use crate::model::{ChapterItem, NovelItem, NovelStatus, SourceNovel, SourcePage};
use crate::plugins::extract::{book_id, chapter_id, csrf_token};
use crate::plugins::html::{parse_selector, remove_matching, select_all_text, select_attr, select_text, text_of};
use crate::plugins::url::{encode_query, resolve_cover};
use crate::plugins::{
    fetch_json, fetch_text, Plugin, PluginError, PluginId, PoliteClient, PopularOptions,
};
use crate::settings::{SettingDef, SettingKind, SettingsStore};
use chrono::{NaiveDate, SecondsFormat};
use scraper::Html;
use serde::Deserialize;

pub const SITE: &str = "https://mynovels.net";

pub const HIDE_LOCKED: &str = "hideLocked";

/// Chapter-list pages fetched concurrently per batch.
const BATCH_SIZE: usize = 4;

const LOCK_PREFIX: &str = "🔒 ";

/// Words in an AJAX `error` that mean the chapter has to be bought or needs a login.
const PURCHASE_GATE_WORDS: &[&str] = &["lock", "purchase", "buy", "coin", "log in", "login"];

pub fn hide_locked_setting() -> SettingDef {
    SettingDef {
        key: HIDE_LOCKED,
        label: "Hide locked chapters",
        description: "Hides chapters that require payment to read. Requires a refresh.",
        kind: SettingKind::Switch { default: false },
    }
}

pub struct MyNovelsPlugin<'a> {
    client: &'a mut PoliteClient,
    hide_locked: bool,
}

/// Tokens the chapter-list endpoint needs, scraped from the novel page.
#[derive(Debug, PartialEq)]
struct ChapterSource {
    csrf_token: String,
    book_id: String,
    total_pages: u32,
}

impl ChapterSource {
    /// AJAX URL for list page `page`, where page 1 holds the oldest chapters.
    /// The endpoint itself counts from the newest.
    fn page_url(&self, page: u32) -> Option<String> {
        if page == 0 || page > self.total_pages {
            return None;
        }
        Some(format!(
            "{}/book/ajax/chapter-pagination?csrfmiddlewaretoken={}&book_id={}&page={}",
            SITE,
            self.csrf_token,
            self.book_id,
            self.total_pages - page + 1
        ))
    }
}

#[derive(Debug, Deserialize)]
struct ChapterListResponse {
    #[serde(default)]
    html: String,
}

#[derive(Debug, Deserialize)]
struct ReadChapterResponse {
    content: Option<String>,
    class: Option<String>,
    error: Option<String>,
}

fn ajax_headers(referer: &str) -> [(&str, &str); 2] {
    [("Referer", referer), ("X-Requested-With", "XMLHttpRequest")]
}

/// Catalogue image paths are site-relative, with or without the leading slash.
fn cover_url(src: Option<&str>) -> String {
    match src.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) if s.starts_with('/') || s.contains("://") => resolve_cover(SITE, Some(s)),
        Some(s) => resolve_cover(SITE, Some(&format!("/{}", s))),
        None => resolve_cover(SITE, None),
    }
}

fn parse_catalog(html: &str) -> Result<Vec<NovelItem>, PluginError> {
    let doc = Html::parse_document(html);
    let item_sel = parse_selector("a.item")?;
    let title_sel = parse_selector("div.title")?;
    let img_sel = parse_selector("img")?;

    let mut items = Vec::new();
    for el in doc.select(&item_sel) {
        let Some(href) = el.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            continue;
        };
        let Some(name) = select_text(el, &title_sel) else {
            continue;
        };
        items.push(NovelItem {
            name,
            path: href.trim_start_matches('/').to_string(),
            cover: cover_url(select_attr(el, &img_sel, "src").as_deref()),
        });
    }
    Ok(items)
}

fn novel_status(status: &str, translation: &str) -> NovelStatus {
    if status.eq_ignore_ascii_case("cancelled") {
        NovelStatus::Cancelled
    } else if status.eq_ignore_ascii_case("releasing") || translation.eq_ignore_ascii_case("ongoing") {
        NovelStatus::Ongoing
    } else if status.eq_ignore_ascii_case("completed") && translation.eq_ignore_ascii_case("completed") {
        NovelStatus::Completed
    } else {
        NovelStatus::Unknown
    }
}

/// Novel metadata without chapters.
fn parse_detail(html: &str, path: &str) -> Result<SourceNovel, PluginError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let h1_sel = parse_selector("h1")?;
    let name = select_text(root, &h1_sel).unwrap_or_else(|| "Untitled".to_string());
    let mut novel = SourceNovel::new(path, name);

    let poster_sel = parse_selector(".poster > img")?;
    novel.cover = cover_url(select_attr(root, &poster_sel, "src").as_deref());

    let summary_sel = parse_selector("section.text-info.section > p")?;
    let summary = select_all_text(root, &summary_sel).join("\n");
    novel.summary = Some(summary).filter(|s| !s.is_empty());

    let row_sel = parse_selector("div.mini-info > .item")?;
    let header_sel = parse_selector(".sub-header")?;
    let info_sel = parse_selector("div.info")?;
    let genre_sel = parse_selector("div.info > a")?;
    let mut status = String::new();
    let mut translation = String::new();
    for row in doc.select(&row_sel) {
        let value = || select_text(row, &info_sel).unwrap_or_default();
        match select_text(row, &header_sel).as_deref() {
            Some("Status") => status = value(),
            Some("Translation") => translation = value(),
            Some("Author") => novel.author = Some(value()).filter(|a| !a.is_empty()),
            Some("Genres") => novel.genres = select_all_text(row, &genre_sel),
            _ => {}
        }
    }
    novel.status = novel_status(&status, &translation);
    Ok(novel)
}

fn parse_chapter_source(html: &str, url: &str) -> Result<ChapterSource, PluginError> {
    let csrf_token = csrf_token(html).ok_or_else(|| PluginError::missing("CSRF token", url))?;
    let book_id = book_id(html).ok_or_else(|| PluginError::missing("book id", url))?;
    let doc = Html::parse_document(html);
    let option_sel = parse_selector("#select-pagination-chapter > option")?;
    // Short lists have no page picker but still have one page.
    let total_pages = (doc.select(&option_sel).count() as u32).max(1);
    Ok(ChapterSource {
        csrf_token,
        book_id,
        total_pages,
    })
}

/// Chapters of one AJAX list page, oldest-first, tagged with `page`.
fn parse_chapter_list(fragment: &str, page: u32, hide_locked: bool) -> Result<Vec<ChapterItem>, PluginError> {
    let doc = Html::parse_document(&format!("<html>{}</html>", fragment));
    let a_sel = parse_selector("a")?;
    let cost_sel = parse_selector(".cost")?;
    let title_sel = parse_selector(".title")?;
    let date_sel = parse_selector(".date")?;

    let mut chapters = Vec::new();
    for a in doc.select(&a_sel) {
        let locked = select_text(a, &cost_sel).is_some();
        if locked && hide_locked {
            continue;
        }
        let Some(href) = a.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            continue;
        };
        let title = select_text(a, &title_sel).unwrap_or_else(|| text_of(a));
        let name = if locked {
            format!("{}{}", LOCK_PREFIX, title)
        } else {
            title
        };
        chapters.push(ChapterItem {
            name,
            path: href.trim_start_matches('/').to_string(),
            release_time: select_text(a, &date_sel).and_then(|d| iso_date(&d)),
            chapter_number: None,
            page: Some(page.to_string()),
        });
    }
    // The endpoint lists newest first.
    chapters.reverse();
    Ok(chapters)
}

/// `DD.MM.YYYY` as an ISO-8601 UTC timestamp at midnight.
fn iso_date(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn is_purchase_gate(message: &str) -> bool {
    let message = message.to_lowercase();
    PURCHASE_GATE_WORDS.iter().any(|w| message.contains(w))
}

/// Chapter text from the read-chapter response: inner HTML of the element carrying the
/// returned class, with ad blocks removed.
fn parse_read_chapter(response: ReadChapterResponse, url: &str) -> Result<String, PluginError> {
    if let Some(error) = response.error.filter(|e| !e.trim().is_empty()) {
        if is_purchase_gate(&error) {
            return Err(PluginError::Locked {
                url: url.to_string(),
            });
        }
        return Err(PluginError::missing(format!("chapter content ({})", error), url));
    }
    let content = response
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| PluginError::missing("chapter content", url))?;
    let class = response
        .class
        .as_deref()
        .and_then(|c| c.split_whitespace().next())
        .ok_or_else(|| PluginError::missing("chapter content class", url))?
        .to_string();

    let mut doc = Html::parse_fragment(&content);
    remove_matching(&mut doc, &[".advertisment"])?;
    let container_sel = parse_selector(&format!(".{}", class))?;
    doc.select(&container_sel)
        .next()
        .map(|e| e.inner_html().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PluginError::missing(format!("element .{}", class), url))
}

impl<'a> MyNovelsPlugin<'a> {
    /// The hide-locked switch is read once; changing it takes effect on the next plugin instance.
    pub fn new(client: &'a mut PoliteClient, settings: &dyn SettingsStore) -> Self {
        let hide_locked = settings
            .get_bool(PluginId::MyNovels.as_str(), HIDE_LOCKED)
            .unwrap_or(false);
        Self {
            client,
            hide_locked,
        }
    }

    /// Every chapter-list page, fetched in batches. Pages that fail are logged and left out.
    fn all_chapters(&mut self, source: &ChapterSource, referer: &str) -> Vec<ChapterItem> {
        let pages: Vec<(u32, String)> = (1..=source.total_pages)
            .filter_map(|p| source.page_url(p).map(|url| (p, url)))
            .collect();
        let headers = ajax_headers(referer);
        let mut fetched = Vec::with_capacity(pages.len());
        for batch in pages.chunks(BATCH_SIZE) {
            let urls: Vec<String> = batch.iter().map(|(_, url)| url.clone()).collect();
            let results = self.client.get_batch(&urls, &headers);
            fetched.extend(batch.iter().map(|(p, _)| *p).zip(results));
        }
        merge_chapter_pages(fetched, self.hide_locked)
    }
}

/// Chapters of fetched list pages (page number, JSON body), in page order.
/// Pages that failed to fetch or parse are logged and left out.
fn merge_chapter_pages(
    pages: Vec<(u32, Result<String, PluginError>)>,
    hide_locked: bool,
) -> Vec<ChapterItem> {
    let mut chapters = Vec::new();
    for (page, result) in pages {
        let parsed = result.and_then(|body| {
            let list: ChapterListResponse = serde_json::from_str(&body)
                .map_err(|e| PluginError::parse("chapter list JSON", e))?;
            parse_chapter_list(&list.html, page, hide_locked)
        });
        match parsed {
            Ok(mut items) => chapters.append(&mut items),
            Err(e) => tracing::warn!(page, error = %e, "dropping chapter list page"),
        }
    }
    chapters
}

/// Chapter id from a chapter page. Pages without one are locked when they say so.
fn chapter_id_or_lock(html: &str, url: &str) -> Result<String, PluginError> {
    match chapter_id(html) {
        Some(id) => Ok(id),
        None if html.to_lowercase().contains("chapter is locked") => Err(PluginError::Locked {
            url: url.to_string(),
        }),
        None => Err(PluginError::missing("chapter id", url)),
    }
}

impl Plugin for MyNovelsPlugin<'_> {
    fn id(&self) -> PluginId {
        PluginId::MyNovels
    }

    fn popular_novels(
        &mut self,
        page: u32,
        _options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError> {
        let url = format!("{}/catalog/?ordering=popularity&page={}", SITE, page);
        let html = fetch_text(self.client, &url, &[])?;
        parse_catalog(&html)
    }

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        let mut novel = parse_detail(&html, path)?;
        let source = parse_chapter_source(&html, &url)?;
        novel.chapters = self.all_chapters(&source, &url);
        Ok(novel)
    }

    fn parse_page(&mut self, path: &str, page: u32) -> Result<SourcePage, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        let source = parse_chapter_source(&html, &url)?;
        let Some(list_url) = source.page_url(page) else {
            return Ok(SourcePage::default());
        };
        let list: ChapterListResponse = fetch_json(self.client, &list_url, &ajax_headers(&url))?;
        Ok(SourcePage {
            chapters: parse_chapter_list(&list.html, page, self.hide_locked)?,
        })
    }

    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        let id = chapter_id_or_lock(&html, &url)?;
        let api = format!("{}/book/ajax/read-chapter/{}", SITE, id);
        let response: ReadChapterResponse = fetch_json(self.client, &api, &ajax_headers(&url))?;
        parse_read_chapter(response, &url)
    }

    /// The catalogue search has a single page.
    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError> {
        if page > 1 {
            return Ok(Vec::new());
        }
        let url = format!("{}/catalog/?search={}", SITE, encode_query(term));
        let html = fetch_text(self.client, &url, &[])?;
        parse_catalog(&html)
    }
}
