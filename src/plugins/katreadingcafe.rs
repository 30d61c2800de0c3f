//! Kat Reading Cafe (MangaReader-style WordPress theme). Novel and chapter paths are the
//! absolute URLs the site links to.

use crate::filters::FilterSet;
use crate::model::{ChapterItem, NovelItem, NovelStatus, SourceNovel};
use crate::plugins::extract::chapter_number;
use crate::plugins::html::{
    parse_selector, remove_empty_paragraphs, remove_matching, select_attr, select_text, text_of,
};
use crate::plugins::url::{encode_query, resolve_cover, with_query};
use crate::plugins::{
    fetch_text, Plugin, PluginError, PluginId, PoliteClient, PopularOptions,
};
use scraper::Html;

pub const SITE: &str = "https://katreadingcafe.com";

const STATUS_VOCABULARY: &[(&str, NovelStatus)] = &[
    ("ongoing", NovelStatus::Ongoing),
    ("completed", NovelStatus::Completed),
    ("hiatus", NovelStatus::OnHiatus),
];

/// Chapter chrome: the repeated title, the Ko-fi button, and off-screen spans that inject
/// junk text.
const CHAPTER_JUNK: &[&str] = &[
    "h1:first-child",
    ".kofi-button-container",
    r#"span[style*="position: absolute"]"#,
];

pub struct KatReadingCafePlugin<'a> {
    client: &'a mut PoliteClient,
}

fn parse_listing(html: &str) -> Result<Vec<NovelItem>, PluginError> {
    let doc = Html::parse_document(html);
    let item_sel = parse_selector("div.listupd article.maindet")?;
    let link_sel = parse_selector(".mdthumb a")?;
    let name_sel = parse_selector(".mdinfo h2 a")?;
    let cover_sel = parse_selector(".mdthumb a img")?;

    let mut items = Vec::new();
    for el in doc.select(&item_sel) {
        let (Some(path), Some(name)) = (
            select_attr(el, &link_sel, "href"),
            select_text(el, &name_sel),
        ) else {
            tracing::debug!("skipping listing entry without link or title");
            continue;
        };
        let cover = select_attr(el, &cover_sel, "src");
        items.push(NovelItem {
            name,
            path,
            cover: resolve_cover(SITE, cover.as_deref()),
        });
    }
    Ok(items)
}

fn parse_novel_page(html: &str, path: &str) -> Result<SourceNovel, PluginError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title_sel = parse_selector("h1.entry-title")?;
    let name = select_text(root, &title_sel).unwrap_or_else(|| "Untitled".to_string());
    let mut novel = SourceNovel::new(path, name);

    let cover_sel = parse_selector(".sertothumb img")?;
    novel.cover = resolve_cover(SITE, select_attr(root, &cover_sel, "src").as_deref());

    let row_sel = parse_selector(".sertoinfo .sertoauth .serl")?;
    let label_sel = parse_selector(".sername")?;
    let value_sel = parse_selector(".serval")?;
    let value_link_sel = parse_selector(".serval a")?;
    for row in doc.select(&row_sel) {
        if select_text(row, &label_sel).as_deref() == Some("Author") {
            novel.author = select_text(row, &value_link_sel).or_else(|| select_text(row, &value_sel));
        }
    }

    let status_sel = parse_selector(".sertostat span")?;
    novel.status = select_text(root, &status_sel)
        .map(|s| NovelStatus::from_site_text(&s, STATUS_VOCABULARY))
        .unwrap_or_default();

    let genre_sel = parse_selector(".sertogenre a")?;
    novel.genres = doc
        .select(&genre_sel)
        .map(text_of)
        .filter(|g| !g.is_empty())
        .collect();

    let summary_sel = parse_selector(".sersys.entry-content")?;
    novel.summary = select_text(root, &summary_sel);

    let li_sel = parse_selector(".eplister ul li")?;
    let a_sel = parse_selector("a")?;
    let num_sel = parse_selector(".epl-num")?;
    let chapter_title_sel = parse_selector(".epl-title")?;
    let date_sel = parse_selector(".epl-date")?;
    let mut chapters: Vec<ChapterItem> = Vec::new();
    for li in doc.select(&li_sel) {
        let Some(a) = li.select(&a_sel).next() else {
            continue;
        };
        let Some(href) = a.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
            continue;
        };
        let num = select_text(a, &num_sel).unwrap_or_default();
        let name = match select_text(a, &chapter_title_sel) {
            Some(title) if num.is_empty() => title,
            Some(title) => format!("{} - {}", num, title),
            None => num.clone(),
        };
        if name.is_empty() {
            continue;
        }
        chapters.push(ChapterItem {
            name,
            path: href.to_string(),
            release_time: select_text(a, &date_sel),
            chapter_number: chapter_number(&num),
            page: None,
        });
    }
    // Newest first on the site.
    chapters.reverse();
    novel.chapters = chapters;
    Ok(novel)
}

fn parse_chapter_page(html: &str, url: &str) -> Result<String, PluginError> {
    let doc = Html::parse_document(html);
    let content_sel = parse_selector(".epcontent.entry-content")?;
    let content = doc
        .select(&content_sel)
        .next()
        .ok_or_else(|| PluginError::missing("chapter content", url))?;

    let mut fragment = Html::parse_fragment(&content.inner_html());
    remove_matching(&mut fragment, CHAPTER_JUNK)?;
    remove_empty_paragraphs(&mut fragment)?;
    let body = fragment.root_element().inner_html();
    Ok(body.trim().to_string())
}

fn listing_url(page: u32, filters: &FilterSet, options: &PopularOptions) -> String {
    let base = if page > 1 {
        format!("{}/series/page/{}/", SITE, page)
    } else {
        format!("{}/series/", SITE)
    };
    let mut pairs: Vec<(&str, String)> = Vec::new();
    let order = if options.show_latest {
        "update".to_string()
    } else {
        filters.picker(&options.filters, "order")
    };
    if !order.is_empty() {
        pairs.push(("order", order));
    }
    let status = filters.picker(&options.filters, "status");
    if !status.is_empty() {
        pairs.push(("status", status));
    }
    for t in filters.checkboxes(&options.filters, "type") {
        pairs.push(("type[]", t));
    }
    for g in filters.checkboxes(&options.filters, "genre") {
        pairs.push(("genre[]", g));
    }
    with_query(&base, &pairs)
}

impl<'a> KatReadingCafePlugin<'a> {
    pub fn new(client: &'a mut PoliteClient) -> Self {
        Self { client }
    }
}

impl Plugin for KatReadingCafePlugin<'_> {
    fn id(&self) -> PluginId {
        PluginId::KatReadingCafe
    }

    fn popular_novels(
        &mut self,
        page: u32,
        options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError> {
        let url = listing_url(page, &self.filters(), options);
        let html = fetch_text(self.client, &url, &[])?;
        parse_listing(&html)
    }

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        parse_novel_page(&html, path)
    }

    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        parse_chapter_page(&html, &url)
    }

    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError> {
        let url = if page > 1 {
            format!("{}/page/{}/?s={}", SITE, page, encode_query(term))
        } else {
            format!("{}/?s={}", SITE, encode_query(term))
        };
        let html = fetch_text(self.client, &url, &[])?;
        parse_listing(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterValue, FilterValues};
    use crate::model::DEFAULT_COVER;

    const LISTING: &str = r#"
        <div class="listupd">
          <article class="maindet">
            <div class="mdthumb"><a href="https://katreadingcafe.com/series/cat-tea/"><img src="/wp-content/uploads/cat.jpg"></a></div>
            <div class="mdinfo"><h2><a href="https://katreadingcafe.com/series/cat-tea/">Cat Tea</a></h2></div>
          </article>
          <article class="maindet">
            <div class="mdthumb"><a><img src="/x.jpg"></a></div>
            <div class="mdinfo"><h2><a>No link</a></h2></div>
          </article>
          <article class="maindet">
            <div class="mdthumb"><a href="https://katreadingcafe.com/series/nameless/"></a></div>
            <div class="mdinfo"><h2><a href="https://katreadingcafe.com/series/nameless/"> </a></h2></div>
          </article>
          <article class="maindet">
            <div class="mdthumb"><a href="https://katreadingcafe.com/series/dog-days/"></a></div>
            <div class="mdinfo"><h2><a>Dog Days</a></h2></div>
          </article>
        </div>"#;

    #[test]
    fn listing_keeps_well_formed_articles() -> Result<(), PluginError> {
        let items = parse_listing(LISTING)?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Cat Tea");
        assert_eq!(items[0].path, "https://katreadingcafe.com/series/cat-tea/");
        assert_eq!(
            items[0].cover,
            "https://katreadingcafe.com/wp-content/uploads/cat.jpg"
        );
        assert_eq!(items[1].cover, DEFAULT_COVER);
        Ok(())
    }

    const NOVEL: &str = r#"
        <html><body>
          <h1 class="entry-title">Cat Tea</h1>
          <div class="sertothumb"><img src="https://katreadingcafe.com/c.jpg"></div>
          <div class="sertoinfo">
            <div class="sertoauth">
              <div class="serl"><span class="sername">Artist</span><span class="serval">Pen</span></div>
              <div class="serl"><span class="sername">Author</span><span class="serval"><a href="/a">Kat</a></span></div>
            </div>
          </div>
          <div class="sertostat"><span>Hiatus</span></div>
          <div class="sertogenre"><a>Romance</a><a>Comedy</a></div>
          <div class="sersys entry-content"><p>Tea and cats.</p></div>
          <div class="eplister"><ul>
            <li><a href="https://katreadingcafe.com/cat-tea-vol-2-ch-11/">
              <div class="epl-num">Vol. 2 Ch. 11</div><div class="epl-title">Steam</div><div class="epl-date">June 3, 2025</div></a></li>
            <li><a href="https://katreadingcafe.com/cat-tea-ch-10-5/">
              <div class="epl-num">Ch. 10.5</div><div class="epl-title"></div></a></li>
            <li><span>no link</span></li>
            <li><a href="https://katreadingcafe.com/cat-tea-prologue/">
              <div class="epl-title">Prologue</div></a></li>
          </ul></div>
        </body></html>"#;

    #[test]
    fn novel_detail_is_oldest_first() -> Result<(), PluginError> {
        let path = "https://katreadingcafe.com/series/cat-tea/";
        let novel = parse_novel_page(NOVEL, path)?;
        assert_eq!(novel.name, "Cat Tea");
        assert_eq!(novel.author.as_deref(), Some("Kat"));
        assert_eq!(novel.status, NovelStatus::OnHiatus);
        assert_eq!(novel.genres, vec!["Romance", "Comedy"]);
        assert_eq!(novel.summary.as_deref(), Some("Tea and cats."));

        let ch = &novel.chapters;
        assert_eq!(ch.len(), 3);
        assert_eq!(ch[0].name, "Prologue");
        assert_eq!(ch[0].chapter_number, None);
        assert_eq!(ch[1].name, "Ch. 10.5");
        assert_eq!(ch[1].chapter_number, Some(10.5));
        assert_eq!(ch[2].name, "Vol. 2 Ch. 11 - Steam");
        assert_eq!(ch[2].chapter_number, Some(11.0));
        assert_eq!(ch[2].release_time.as_deref(), Some("June 3, 2025"));
        Ok(())
    }

    #[test]
    fn novel_without_title_is_untitled() -> Result<(), PluginError> {
        let novel = parse_novel_page("<html><body></body></html>", "/x")?;
        assert_eq!(novel.name, "Untitled");
        assert_eq!(novel.cover, DEFAULT_COVER);
        assert!(novel.chapters.is_empty());
        Ok(())
    }

    #[test]
    fn chapter_strips_chrome() -> Result<(), PluginError> {
        let html = r#"
            <div class="epcontent entry-content">
              <h1>Ch. 11 Steam</h1>
              <p>The kettle sang.</p>
              <p><span style="position: absolute; left: -9999px">stolen from katreadingcafe</span></p>
              <div class="kofi-button-container"><a>Buy me a coffee</a></div>
              <p>&nbsp;</p>
              <p>It was <b>late</b>.</p>
            </div>"#;
        let body = parse_chapter_page(html, SITE)?;
        assert!(!body.contains("Steam"));
        assert!(!body.contains("stolen"));
        assert!(!body.contains("coffee"));
        assert!(body.contains("<p>The kettle sang.</p>"));
        assert!(body.contains("<p>It was <b>late</b>.</p>"));
        assert_eq!(body.matches("<p>").count(), 2);
        Ok(())
    }

    #[test]
    fn chapter_without_content_is_missing_data() {
        assert!(matches!(
            parse_chapter_page("<div class=\"epcontent\"></div>", SITE),
            Err(PluginError::MissingData { .. })
        ));
    }

    #[test]
    fn listing_url_repeats_array_params() {
        let filters = PluginId::KatReadingCafe.filters();
        let options = PopularOptions {
            show_latest: false,
            filters: FilterValues::new()
                .with("status", FilterValue::Text("ongoing".into()))
                .with(
                    "type",
                    FilterValue::List(vec!["web-novel".into(), "light-novel".into()]),
                ),
        };
        assert_eq!(
            listing_url(2, &filters, &options),
            "https://katreadingcafe.com/series/page/2/?order=popular&status=ongoing&type%5B%5D=web-novel&type%5B%5D=light-novel"
        );
        let latest = PopularOptions {
            show_latest: true,
            ..PopularOptions::default()
        };
        assert_eq!(
            listing_url(1, &filters, &latest),
            "https://katreadingcafe.com/series/?order=update"
        );
    }
}
