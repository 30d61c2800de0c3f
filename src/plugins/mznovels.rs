//! MzNovels. Unfiltered first pages come from the home page slider, everything else from the
//! advanced search. Chapter lists are paginated and fetched in bounded batches.

use crate::filters::FilterSet;
use crate::model::{ChapterItem, NovelItem, NovelStatus, SourceNovel};
use crate::plugins::extract::page_param;
use crate::plugins::html::{parse_selector, select_attr, select_text, text_of};
use crate::plugins::url::{encode_query, resolve_cover, with_query};
use crate::plugins::{
    fetch_text, Plugin, PluginError, PluginId, PoliteClient, PopularOptions,
};
use scraper::{Html, Selector};

pub const SITE: &str = "https://mznovels.com";

/// The site serves a bot wall to non-browser agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const HEADERS: &[(&str, &str)] = &[("User-Agent", USER_AGENT)];

/// Chapter-list pages fetched concurrently per batch.
const BATCH_SIZE: usize = 4;

const STATUS_VOCABULARY: &[(&str, NovelStatus)] = &[
    ("ongoing", NovelStatus::Ongoing),
    ("completed", NovelStatus::Completed),
];

const PREMIUM_GATES: &[&str] = &[".premium-lock", ".locked-chapter", ".chapter-locked"];

pub struct MzNovelsPlugin<'a> {
    client: &'a mut PoliteClient,
}

struct ResultLayout {
    item: Selector,
    link: Selector,
    title: Selector,
    cover: Selector,
}

fn parse_results(html: &str, layout: &ResultLayout) -> Vec<NovelItem> {
    let doc = Html::parse_document(html);
    doc.select(&layout.item)
        .filter_map(|el| {
            let path = select_attr(el, &layout.link, "href")?;
            let name = select_text(el, &layout.title)?;
            let cover = select_attr(el, &layout.cover, "src");
            Some(NovelItem {
                name,
                path,
                cover: resolve_cover(SITE, cover.as_deref()),
            })
        })
        .collect()
}

/// Home page slider shown for the default ordering.
fn parse_slider(html: &str) -> Result<Vec<NovelItem>, PluginError> {
    let layout = ResultLayout {
        item: parse_selector("div.novel-slide")?,
        link: parse_selector(".title-info-v1 > a")?,
        title: parse_selector(".title-info-v1 > a > h3")?,
        cover: parse_selector(".popular_title_image img")?,
    };
    Ok(parse_results(html, &layout))
}

/// Advanced search and keyword search share the result markup.
fn parse_search_results(html: &str) -> Result<Vec<NovelItem>, PluginError> {
    let layout = ResultLayout {
        item: parse_selector("li.search-result-item")?,
        link: parse_selector("a.search-result-title-link")?,
        title: parse_selector("h2.search-result-title")?,
        cover: parse_selector("img.search-result-image")?,
    };
    Ok(parse_results(html, &layout))
}

/// Novel metadata without chapters. The title is the one required field.
fn parse_detail(html: &str, path: &str, url: &str) -> Result<SourceNovel, PluginError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title_sel = parse_selector("h1.novel-title")?;
    let name = select_text(root, &title_sel).ok_or_else(|| PluginError::missing("novel title", url))?;
    let mut novel = SourceNovel::new(path, name);

    let cover_sel = parse_selector("img#novel-cover-image")?;
    novel.cover = resolve_cover(SITE, select_attr(root, &cover_sel, "src").as_deref());
    novel.summary = select_text(root, &parse_selector(".summary-text")?);
    novel.author = select_text(root, &parse_selector(".novel-author a")?);

    let genre_sel = parse_selector(".genres-container a.genre, .tags-container a.tag")?;
    novel.genres = doc
        .select(&genre_sel)
        .map(text_of)
        .filter(|g| !g.is_empty())
        .collect();

    let status_sel = parse_selector(".novel-status .status-indicator")?;
    novel.status = select_text(root, &status_sel)
        .map(|s| NovelStatus::from_site_text(&s, STATUS_VOCABULARY))
        .unwrap_or_default();
    Ok(novel)
}

/// Chapter entries of one list page, in site order (newest first).
fn parse_chapter_items(html: &str) -> Result<Vec<ChapterItem>, PluginError> {
    let doc = Html::parse_document(html);
    let item_sel = parse_selector("ul.chapter-list li.chapter-item")?;
    let link_sel = parse_selector("a.chapter-link")?;
    let date_sel = parse_selector("span.chapter-date")?;
    let items = doc
        .select(&item_sel)
        .filter_map(|li| {
            let link = li.select(&link_sel).next()?;
            let href = link.value().attr("href").map(str::trim).filter(|h| !h.is_empty())?;
            let mut chapter = ChapterItem::new(text_of(link), href);
            chapter.release_time = select_text(li, &date_sel);
            Some(chapter)
        })
        .collect();
    Ok(items)
}

/// Last chapter-list page: the `page=` of the "Last" link, else the largest numbered page link.
fn last_page(html: &str) -> Result<u32, PluginError> {
    let doc = Html::parse_document(html);
    let link_sel = parse_selector(".pagination a")?;
    let from_last_link = doc
        .select(&link_sel)
        .find(|a| text_of(*a).contains("Last"))
        .and_then(|a| a.value().attr("href"))
        .and_then(page_param);
    if let Some(page) = from_last_link {
        return Ok(page.max(1));
    }
    let numbered_sel = parse_selector(r#".pagination a[href*="page="]"#)?;
    let max = doc
        .select(&numbered_sel)
        .filter_map(|a| text_of(a).parse::<u32>().ok())
        .max()
        .unwrap_or(1);
    Ok(max.max(1))
}

fn parse_chapter_page(html: &str, url: &str) -> Result<String, PluginError> {
    let doc = Html::parse_document(html);
    for gate in PREMIUM_GATES {
        if doc.select(&parse_selector(gate)?).next().is_some() {
            return Err(PluginError::Locked {
                url: url.to_string(),
            });
        }
    }
    let content_sel = parse_selector(".formatted-content")?;
    doc.select(&content_sel)
        .next()
        .map(|e| e.inner_html().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PluginError::missing("chapter content", url))
}

/// Advanced search URL. Showing latest forces date ordering.
fn advanced_search_url(page: u32, filters: &FilterSet, options: &PopularOptions) -> String {
    let values = &options.filters;
    let sort_by = if options.show_latest {
        "date".to_string()
    } else {
        filters.picker(values, "sort_by")
    };
    let mut pairs: Vec<(&str, String)> = vec![
        ("page", page.to_string()),
        ("sort_by", sort_by),
        ("sort_order", filters.picker(values, "sort_order")),
        ("status_filter", filters.picker(values, "status_filter")),
        ("story_origin", filters.picker(values, "story_origin")),
        ("genre_logic", filters.picker(values, "genre_logic")),
        ("tag_logic", filters.picker(values, "tag_logic")),
        ("story_type_logic", filters.picker(values, "story_type_logic")),
    ];
    let (genres, exclude_genres) = filters.excludable(values, "genres");
    pairs.extend(genres.into_iter().map(|g| ("genres", g)));
    pairs.extend(exclude_genres.into_iter().map(|g| ("exclude_genres", g)));
    let (tags, exclude_tags) = filters.excludable(values, "tags");
    pairs.extend(tags.into_iter().map(|t| ("tags", t)));
    pairs.extend(exclude_tags.into_iter().map(|t| ("exclude_tags", t)));
    pairs.extend(
        filters
            .checkboxes(values, "story_types")
            .into_iter()
            .map(|s| ("story_types", s)),
    );
    with_query(&format!("{}/advanced-search/", SITE), &pairs)
}

fn chapter_page_url(novel_url: &str, page: u32) -> String {
    let sep = if novel_url.contains('?') { '&' } else { '?' };
    format!("{}{}page={}", novel_url, sep, page)
}

impl<'a> MzNovelsPlugin<'a> {
    pub fn new(client: &'a mut PoliteClient) -> Self {
        Self { client }
    }

    /// Raw list pages `2..=last`, in page order.
    fn remaining_pages(&mut self, novel_url: &str, last: u32) -> Vec<Result<String, PluginError>> {
        let urls: Vec<String> = (2..=last).map(|p| chapter_page_url(novel_url, p)).collect();
        let mut pages = Vec::with_capacity(urls.len());
        for batch in urls.chunks(BATCH_SIZE) {
            pages.extend(self.client.get_batch(batch, HEADERS));
        }
        pages
    }
}

/// Oldest-first chapters from the first list page plus the bodies of the following pages.
/// Any failed page fails the whole list, since a partial list would shift chapter order.
fn merge_chapter_pages(
    first_page: &str,
    rest: Vec<Result<String, PluginError>>,
) -> Result<Vec<ChapterItem>, PluginError> {
    let mut chapters = parse_chapter_items(first_page)?;
    for body in rest {
        chapters.extend(parse_chapter_items(&body?)?);
    }
    // Page 1 holds the newest chapters.
    chapters.reverse();
    Ok(chapters)
}

impl Plugin for MzNovelsPlugin<'_> {
    fn id(&self) -> PluginId {
        PluginId::MzNovels
    }

    fn popular_novels(
        &mut self,
        page: u32,
        options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError> {
        let filters = self.filters();
        if page == 1 && !options.show_latest && filters.all_default(&options.filters) {
            let html = fetch_text(self.client, SITE, HEADERS)?;
            return parse_slider(&html);
        }
        let url = advanced_search_url(page, &filters, options);
        let html = fetch_text(self.client, &url, HEADERS)?;
        parse_search_results(&html)
    }

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, HEADERS)?;
        let mut novel = parse_detail(&html, path, &url)?;
        let last = last_page(&html)?;
        if last > 1 {
            tracing::debug!(pages = last, "fetching paginated chapter list");
        }
        let rest = self.remaining_pages(&url, last);
        novel.chapters = merge_chapter_pages(&html, rest)?;
        Ok(novel)
    }

    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, HEADERS)?;
        parse_chapter_page(&html, &url)
    }

    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError> {
        let url = format!("{}/search/?q={}&page={}", SITE, encode_query(term), page);
        let html = fetch_text(self.client, &url, HEADERS)?;
        parse_search_results(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterValue, FilterValues};
    use crate::model::DEFAULT_COVER;

    #[test]
    fn slider_items_need_a_link() -> Result<(), PluginError> {
        let html = r#"
            <div class="novel-slide">
              <div class="popular_title_image"><img src="/media/a.jpg"></div>
              <div class="title-info-v1"><a href="/novel/a/"><h3>Alpha</h3></a></div>
            </div>
            <div class="novel-slide">
              <div class="title-info-v1"><span><h3>Unlinked</h3></span></div>
            </div>
            <div class="novel-slide">
              <div class="title-info-v1"><a href="https://mznovels.com/novel/b/"><h3>Beta</h3></a></div>
            </div>"#;
        let items = parse_slider(html)?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cover, "https://mznovels.com/media/a.jpg");
        assert_eq!(items[1].path, "https://mznovels.com/novel/b/");
        assert_eq!(items[1].cover, DEFAULT_COVER);
        Ok(())
    }

    #[test]
    fn search_results_skip_nameless_entries() -> Result<(), PluginError> {
        let html = r#"<ul>
            <li class="search-result-item"><a class="search-result-title-link" href="/novel/c/"><h2 class="search-result-title">Gamma</h2></a>
              <img class="search-result-image" src="https://cdn.mznovels.com/c.webp"></li>
            <li class="search-result-item"><a class="search-result-title-link" href="/novel/d/"><h2 class="search-result-title"></h2></a></li>
            </ul>"#;
        let items = parse_search_results(html)?;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Gamma");
        assert_eq!(items[0].cover, "https://cdn.mznovels.com/c.webp");
        Ok(())
    }

    const NOVEL: &str = r#"
        <html><body>
          <img id="novel-cover-image" src="/media/covers/g.jpg">
          <h1 class="novel-title">Gamma</h1>
          <div class="novel-author"><a href="/u/x">Xan</a></div>
          <div class="summary-text"> Story. </div>
          <div class="novel-status"><span class="status-indicator">Completed</span></div>
          <div class="genres-container"><a class="genre">Action</a></div>
          <div class="tags-container"><a class="tag">Magic</a></div>
          <ul class="chapter-list">
            <li class="chapter-item"><a class="chapter-link" href="/novel/g/chapter-10/">Chapter 10</a><span class="chapter-date">2 days ago</span></li>
            <li class="chapter-item"><span>no link</span></li>
            <li class="chapter-item"><a class="chapter-link" href="/novel/g/chapter-9/">Chapter 9</a></li>
          </ul>
          <div class="pagination"><a href="?page=2">2</a><a href="?page=3">3</a><a href="?page=7">Last &raquo;</a></div>
        </body></html>"#;

    #[test]
    fn detail_metadata_and_first_chapter_page() -> Result<(), PluginError> {
        let novel = parse_detail(NOVEL, "/novel/g/", SITE)?;
        assert_eq!(novel.name, "Gamma");
        assert_eq!(novel.cover, "https://mznovels.com/media/covers/g.jpg");
        assert_eq!(novel.author.as_deref(), Some("Xan"));
        assert_eq!(novel.summary.as_deref(), Some("Story."));
        assert_eq!(novel.status, NovelStatus::Completed);
        assert_eq!(novel.genres, vec!["Action", "Magic"]);

        let chapters = parse_chapter_items(NOVEL)?;
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].name, "Chapter 10");
        assert_eq!(chapters[0].release_time.as_deref(), Some("2 days ago"));
        Ok(())
    }

    fn chapter_list_page(items: &[(&str, &str)]) -> String {
        let lis: String = items
            .iter()
            .map(|(href, name)| {
                format!(r#"<li class="chapter-item"><a class="chapter-link" href="{}">{}</a></li>"#, href, name)
            })
            .collect();
        format!(r#"<html><body><ul class="chapter-list">{}</ul></body></html>"#, lis)
    }

    #[test]
    fn merged_chapter_pages_are_oldest_first() -> Result<(), PluginError> {
        let rest = vec![
            Ok(chapter_list_page(&[("/novel/g/chapter-8/", "Chapter 8"), ("/novel/g/chapter-7/", "Chapter 7")])),
            Ok(chapter_list_page(&[("/novel/g/chapter-6/", "Chapter 6")])),
        ];
        let chapters = merge_chapter_pages(NOVEL, rest)?;
        let names: Vec<_> = chapters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Chapter 6", "Chapter 7", "Chapter 8", "Chapter 9", "Chapter 10"]
        );
        assert_eq!(merge_chapter_pages(NOVEL, Vec::new())?.len(), 2);
        Ok(())
    }

    #[test]
    fn failed_chapter_page_fails_the_list() {
        let rest = vec![
            Ok(chapter_list_page(&[("/novel/g/chapter-8/", "Chapter 8")])),
            Err(PluginError::HttpStatus {
                status: 502,
                url: "https://mznovels.com/novel/g/?page=3".into(),
            }),
        ];
        assert!(matches!(
            merge_chapter_pages(NOVEL, rest),
            Err(PluginError::HttpStatus { status: 502, .. })
        ));
    }

    #[test]
    fn missing_title_is_fatal() {
        assert!(matches!(
            parse_detail("<html><body><h1>Other</h1></body></html>", "/novel/x/", SITE),
            Err(PluginError::MissingData { .. })
        ));
    }

    #[test]
    fn last_page_prefers_last_link() -> Result<(), PluginError> {
        assert_eq!(last_page(NOVEL)?, 7);
        let numbered = r#"<div class="pagination"><a href="?page=2">2</a><a href="?page=5">5</a><a href="?page=2">Next</a></div>"#;
        assert_eq!(last_page(numbered)?, 5);
        assert_eq!(last_page("<div></div>")?, 1);
        Ok(())
    }

    #[test]
    fn chapter_content_and_gates() -> Result<(), PluginError> {
        let html = r#"<div class="formatted-content"><p>Once.</p></div>"#;
        assert_eq!(parse_chapter_page(html, SITE)?, "<p>Once.</p>");

        let locked = r#"<div class="premium-lock">Unlock with coins</div><div class="formatted-content"><p>Teaser</p></div>"#;
        assert!(parse_chapter_page(locked, SITE).is_err_and(|e| e.is_locked()));

        assert!(matches!(
            parse_chapter_page("<div class=\"content\"></div>", SITE),
            Err(PluginError::MissingData { .. })
        ));
        Ok(())
    }

    #[test]
    fn advanced_search_url_carries_every_filter() {
        let filters = PluginId::MzNovels.filters();
        let options = PopularOptions {
            show_latest: true,
            filters: FilterValues::new()
                .with("sort_by", FilterValue::Text("views".into()))
                .with(
                    "genres",
                    FilterValue::Excludable {
                        included: vec!["1".into()],
                        excluded: vec!["2".into()],
                    },
                )
                .with("story_types", FilterValue::List(vec!["3".into()])),
        };
        assert_eq!(
            advanced_search_url(3, &filters, &options),
            "https://mznovels.com/advanced-search/?page=3&sort_by=date&sort_order=desc&status_filter=all\
             &story_origin=all&genre_logic=AND&tag_logic=AND&story_type_logic=OR&genres=1&exclude_genres=2\
             &story_types=3"
        );
    }

    #[test]
    fn chapter_page_urls() {
        assert_eq!(
            chapter_page_url("https://mznovels.com/novel/g/", 2),
            "https://mznovels.com/novel/g/?page=2"
        );
        assert_eq!(
            chapter_page_url("https://mznovels.com/novel?id=4", 3),
            "https://mznovels.com/novel?id=4&page=3"
        );
    }
}
