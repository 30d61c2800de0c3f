//! Kari Studio and Night Studio run the same WordPress theme. One plugin type drives both,
//! parameterized by a [StudioTheme] that holds the per-site differences.

use crate::filters::FilterSet;
use crate::model::{ChapterItem, NovelItem, NovelStatus, SourceNovel};
use crate::plugins::html::{parse_selector, remove_matching, select_attr, select_text, text_of};
use crate::plugins::url::{encode_query, resolve_cover, url_path, with_query};
use crate::plugins::{
    fetch_text, Plugin, PluginError, PluginId, PoliteClient, PopularOptions,
};
use scraper::{ElementRef, Html, Selector};

/// Per-site differences of the shared theme.
#[derive(Debug)]
pub struct StudioTheme {
    pub id: PluginId,
    pub site: &'static str,
    /// `(query key, filter key)` pairs for the catalogue URL, in URL order.
    pub listing_params: &'static [(&'static str, &'static str)],
    /// Novel title; the first matching element wins.
    pub title_selector: &'static str,
    pub author_selector: Option<&'static str>,
    /// Container the chapter paragraphs must sit in, if the theme wraps them.
    pub content_scope: Option<&'static str>,
    /// myCRED purchase gates. Any of them on the page marks the chapter as locked.
    pub paywall_selectors: &'static [&'static str],
    /// myCRED nodes stripped from an unlocked chapter, e.g. the purchase history banner.
    pub strip_selectors: &'static [&'static str],
}

pub static KARI_STUDIO: StudioTheme = StudioTheme {
    id: PluginId::KariStudio,
    site: "https://karistudio.com",
    listing_params: &[
        ("sort", "order"),
        ("type", "type"),
        ("language", "language"),
        ("status", "status"),
        ("tag", "tag"),
    ],
    title_selector: "h1.title",
    author_selector: None,
    content_scope: None,
    paywall_selectors: &[".mycred-sell-this-wrapper"],
    strip_selectors: &[],
};

pub static NIGHT_STUDIO: StudioTheme = StudioTheme {
    id: PluginId::NightStudio,
    site: "https://nightstudio.site",
    listing_params: &[("sort", "order"), ("status", "status"), ("tag", "tag")],
    title_selector: "h1.entry-title, h1.title, #index_heading",
    author_selector: Some("#novel_author-button"),
    content_scope: Some(".bs-blog-post"),
    paywall_selectors: &[".mycred-sell-this-wrapper", ".myCRED-buy-form"],
    strip_selectors: &[".mycred-sell-this-history"],
};

const STATUS_VOCABULARY: &[(&str, NovelStatus)] = &[
    ("active", NovelStatus::Ongoing),
    ("completed", NovelStatus::Completed),
    ("on hold", NovelStatus::OnHiatus),
    ("dropped", NovelStatus::Cancelled),
];

const RANKING_PREFIX: &str = "ranking-";

pub struct StudioPlugin<'a> {
    client: &'a mut PoliteClient,
    theme: &'static StudioTheme,
}

/// Item nodes of one listing layout: container, link, title, cover image.
struct ItemLayout {
    item: Selector,
    link: Option<Selector>,
    title: Selector,
    cover: Selector,
}

impl ItemLayout {
    fn catalogue() -> Result<Self, PluginError> {
        Ok(Self {
            item: parse_selector(".novel-item")?,
            link: None,
            title: parse_selector(".novel-item-title")?,
            cover: parse_selector(".novel-item-Cover")?,
        })
    }

    fn ranking() -> Result<Self, PluginError> {
        Ok(Self {
            item: parse_selector(".ranking-novel-item")?,
            link: Some(parse_selector("a")?),
            title: parse_selector(".ranking-novel-item-title")?,
            cover: parse_selector(".ranking-novel-item-cover")?,
        })
    }

    fn latest() -> Result<Self, PluginError> {
        Ok(Self {
            item: parse_selector(".latest_chapter_release")?,
            link: Some(parse_selector(".latest_release_novel_title a")?),
            title: parse_selector(".latest_release_novel_title a")?,
            cover: parse_selector(".latest_chapter_cover")?,
        })
    }
}

/// Extract items with `layout`. Items without a link or name are skipped; repeated paths are
/// kept once.
fn parse_items(html: &str, site: &str, layout: &ItemLayout) -> Vec<NovelItem> {
    let doc = Html::parse_document(html);
    let mut items: Vec<NovelItem> = Vec::new();
    for el in doc.select(&layout.item) {
        let href = match &layout.link {
            Some(link) => select_attr(el, link, "href"),
            None => el.value().attr("href").map(str::to_string),
        };
        let Some(path) = href.as_deref().and_then(url_path) else {
            continue;
        };
        let Some(name) = select_text(el, &layout.title) else {
            tracing::debug!(path = path.as_str(), "skipping item without a title");
            continue;
        };
        if items.iter().any(|n| n.path == path) {
            continue;
        }
        let cover = select_attr(el, &layout.cover, "src");
        items.push(NovelItem {
            name,
            path,
            cover: resolve_cover(site, cover.as_deref()),
        });
    }
    items
}

fn parse_novel_page(
    html: &str,
    path: &str,
    theme: &StudioTheme,
    url: &str,
) -> Result<SourceNovel, PluginError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let title_sel = parse_selector(theme.title_selector)?;
    let name = select_text(root, &title_sel).ok_or_else(|| PluginError::missing("novel title", url))?;

    let mut novel = SourceNovel::new(path, name);
    let cover_sel = parse_selector("#novel_cover")?;
    novel.cover = resolve_cover(theme.site, select_attr(root, &cover_sel, "src").as_deref());

    let desc_sel = parse_selector(".desc_div p")?;
    let summary = doc
        .select(&desc_sel)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    novel.summary = Some(summary.trim().to_string()).filter(|s| !s.is_empty());

    if let Some(author) = theme.author_selector {
        novel.author = select_text(root, &parse_selector(author)?);
    }

    let genre_sel = parse_selector("#tags_div a.novel_genre")?;
    novel.genres = doc
        .select(&genre_sel)
        .map(text_of)
        .filter(|g| !g.is_empty())
        .collect();

    let status_sel = parse_selector("#novel_status")?;
    novel.status = select_text(root, &status_sel)
        .map(|s| NovelStatus::from_site_text(&s, STATUS_VOCABULARY))
        .unwrap_or_default();

    let chap_sel = parse_selector(".novel_index a.chap")?;
    let mut chapters: Vec<ChapterItem> = doc
        .select(&chap_sel)
        .filter_map(|a| {
            let path = a.value().attr("href").and_then(url_path)?;
            let name = text_of(a);
            Some(ChapterItem::new(name, path))
        })
        .collect();
    // Index lists newest first.
    chapters.reverse();
    novel.chapters = chapters;
    Ok(novel)
}

/// Chapter paragraphs as `<p>…</p>`.
///
/// A purchase gate locks the chapter even when teaser paragraphs are present.
fn parse_chapter_page(html: &str, theme: &StudioTheme, url: &str) -> Result<String, PluginError> {
    let mut doc = Html::parse_document(html);
    for sel in theme.paywall_selectors {
        if doc.select(&parse_selector(sel)?).next().is_some() {
            return Err(PluginError::Locked {
                url: url.to_string(),
            });
        }
    }
    remove_matching(&mut doc, theme.strip_selectors)?;

    let para_sel = parse_selector("p.chapter_content")?;
    let scope: ElementRef<'_> = match theme.content_scope {
        Some(scope) => doc
            .select(&parse_selector(scope)?)
            .next()
            .ok_or_else(|| PluginError::missing("chapter container", url))?,
        None => doc.root_element(),
    };
    let body: String = scope
        .select(&para_sel)
        .map(|p| format!("<p>{}</p>", p.inner_html()))
        .collect();
    if body.is_empty() {
        return Err(PluginError::missing("chapter paragraphs", url));
    }
    Ok(body)
}

/// `/novels/[page/{n}/]` with non-empty theme parameters.
fn catalogue_url(theme: &StudioTheme, page: u32, filters: &FilterSet, options: &PopularOptions) -> String {
    let pairs: Vec<(&str, String)> = theme
        .listing_params
        .iter()
        .map(|(query_key, filter_key)| (*query_key, filters.picker(&options.filters, filter_key)))
        .filter(|(_, v)| !v.is_empty())
        .collect();
    with_query(&novels_base(theme, page), &pairs)
}

fn novels_base(theme: &StudioTheme, page: u32) -> String {
    if page > 1 {
        format!("{}/novels/page/{}/", theme.site, page)
    } else {
        format!("{}/novels/", theme.site)
    }
}

impl<'a> StudioPlugin<'a> {
    pub fn new(client: &'a mut PoliteClient, theme: &'static StudioTheme) -> Self {
        Self { client, theme }
    }

    fn list(&mut self, url: &str, layout: &ItemLayout) -> Result<Vec<NovelItem>, PluginError> {
        let html = fetch_text(self.client, url, &[])?;
        Ok(parse_items(&html, self.theme.site, layout))
    }
}

impl Plugin for StudioPlugin<'_> {
    fn id(&self) -> PluginId {
        self.theme.id
    }

    fn popular_novels(
        &mut self,
        page: u32,
        options: &PopularOptions,
    ) -> Result<Vec<NovelItem>, PluginError> {
        // The latest feed and the ranking pages are not paginated.
        if options.show_latest {
            if page > 1 {
                return Ok(Vec::new());
            }
            return self.list(self.theme.site, &ItemLayout::latest()?);
        }
        let filters = self.filters();
        let order = filters.picker(&options.filters, "order");
        if let Some(sort) = order.strip_prefix(RANKING_PREFIX) {
            if page > 1 {
                return Ok(Vec::new());
            }
            let url = with_query(
                &format!("{}/ranking", self.theme.site),
                &[("sort", sort.to_string())],
            );
            return self.list(&url, &ItemLayout::ranking()?);
        }
        let url = catalogue_url(self.theme, page, &filters, options);
        self.list(&url, &ItemLayout::catalogue()?)
    }

    fn parse_novel(&mut self, path: &str) -> Result<SourceNovel, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        parse_novel_page(&html, path, self.theme, &url)
    }

    fn parse_chapter(&mut self, path: &str) -> Result<String, PluginError> {
        let url = self.resolve_url(path);
        let html = fetch_text(self.client, &url, &[])?;
        parse_chapter_page(&html, self.theme, &url)
    }

    fn search_novels(&mut self, term: &str, page: u32) -> Result<Vec<NovelItem>, PluginError> {
        let url = format!("{}?search={}", novels_base(self.theme, page), encode_query(term));
        self.list(&url, &ItemLayout::catalogue()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{FilterValue, FilterValues};
    use crate::model::DEFAULT_COVER;

    const CATALOGUE: &str = r#"
        <div class="novels">
          <a class="novel-item" href="https://karistudio.com/novel/moon-sword/">
            <img class="novel-item-Cover" src="https://karistudio.com/wp-content/moon.jpg">
            <div class="novel-item-title"> Moon Sword </div>
          </a>
          <a class="novel-item">
            <div class="novel-item-title">No link</div>
          </a>
          <a class="novel-item" href="https://karistudio.com/novel/empty/">
            <div class="novel-item-title">  </div>
          </a>
          <a class="novel-item" href="/novel/river/">
            <div class="novel-item-title">River</div>
          </a>
        </div>"#;

    #[test]
    fn catalogue_items_skip_broken_entries() -> Result<(), PluginError> {
        let items = parse_items(CATALOGUE, KARI_STUDIO.site, &ItemLayout::catalogue()?);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Moon Sword");
        assert_eq!(items[0].path, "/novel/moon-sword/");
        assert_eq!(items[0].cover, "https://karistudio.com/wp-content/moon.jpg");
        assert_eq!(items[1].path, "/novel/river/");
        assert_eq!(items[1].cover, DEFAULT_COVER);
        Ok(())
    }

    #[test]
    fn latest_feed_is_deduplicated() -> Result<(), PluginError> {
        let html = r#"
            <div class="latest_chapter_release">
              <img class="latest_chapter_cover" src="/c/a.jpg">
              <div class="latest_release_novel_title"><a href="https://nightstudio.site/novel/a/">A</a></div>
            </div>
            <div class="latest_chapter_release">
              <img class="latest_chapter_cover" src="/c/a.jpg">
              <div class="latest_release_novel_title"><a href="https://nightstudio.site/novel/a/">A</a></div>
            </div>
            <div class="latest_chapter_release">
              <div class="latest_release_novel_title"><a href="https://nightstudio.site/novel/b/">B</a></div>
            </div>"#;
        let items = parse_items(html, NIGHT_STUDIO.site, &ItemLayout::latest()?);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].cover, "https://nightstudio.site/c/a.jpg");
        assert_eq!(items[1].path, "/novel/b/");
        Ok(())
    }

    const NOVEL: &str = r#"
        <html><body>
          <h1 class="entry-title">Night Blade</h1>
          <img id="novel_cover" src="https://nightstudio.site/cover.png">
          <button id="novel_author-button"> Someone </button>
          <div class="desc_div"><p>First line.</p><p>Second line.</p></div>
          <div id="tags_div"><a class="novel_genre">Action</a><a class="novel_genre">Drama</a></div>
          <span id="novel_status">On Hold</span>
          <div class="novel_index">
            <a class="chap" href="https://nightstudio.site/novel/night-blade/3/">Chapter 3</a>
            <a class="chap" href="https://nightstudio.site/novel/night-blade/2/">Chapter 2</a>
            <a class="chap">Broken</a>
            <a class="chap" href="https://nightstudio.site/novel/night-blade/1/">Chapter 1</a>
          </div>
        </body></html>"#;

    #[test]
    fn novel_detail_reads_theme_fields() -> Result<(), PluginError> {
        let novel = parse_novel_page(NOVEL, "/novel/night-blade/", &NIGHT_STUDIO, NIGHT_STUDIO.site)?;
        assert_eq!(novel.name, "Night Blade");
        assert_eq!(novel.author.as_deref(), Some("Someone"));
        assert_eq!(novel.summary.as_deref(), Some("First line.\nSecond line."));
        assert_eq!(novel.genres, vec!["Action", "Drama"]);
        assert_eq!(novel.status, NovelStatus::OnHiatus);
        let paths: Vec<_> = novel.chapters.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/novel/night-blade/1/",
                "/novel/night-blade/2/",
                "/novel/night-blade/3/"
            ]
        );
        Ok(())
    }

    #[test]
    fn kari_detail_ignores_other_title_selectors() {
        let result = parse_novel_page(NOVEL, "/novel/night-blade/", &KARI_STUDIO, KARI_STUDIO.site);
        assert!(matches!(result, Err(PluginError::MissingData { .. })));
    }

    #[test]
    fn chapter_paragraphs_are_collected() -> Result<(), PluginError> {
        let html = r#"
            <div class="bs-blog-post">
              <p class="chapter_content">One <em>two</em></p>
              <div class="mycred-sell-this-history">bought</div>
              <p class="chapter_content">Three</p>
            </div>
            <p class="chapter_content">Outside</p>"#;
        let body = parse_chapter_page(html, &NIGHT_STUDIO, NIGHT_STUDIO.site)?;
        assert_eq!(body, "<p>One <em>two</em></p><p>Three</p>");
        Ok(())
    }

    #[test]
    fn paywalled_chapter_is_locked() {
        let html = r#"<div class="bs-blog-post"><div class="mycred-sell-this-wrapper">Buy for 5 coins</div></div>"#;
        let result = parse_chapter_page(html, &NIGHT_STUDIO, NIGHT_STUDIO.site);
        assert!(matches!(result, Err(PluginError::Locked { .. })));

        let html = r#"<div class="mycred-sell-this-wrapper">Buy</div>"#;
        assert!(parse_chapter_page(html, &KARI_STUDIO, KARI_STUDIO.site).is_err_and(|e| e.is_locked()));
    }

    #[test]
    fn teaser_before_paywall_is_still_locked() {
        let html = r#"
            <p class="chapter_content">Free teaser line.</p>
            <div class="mycred-sell-this-wrapper">Buy for 5 coins</div>"#;
        assert!(parse_chapter_page(html, &KARI_STUDIO, KARI_STUDIO.site).is_err_and(|e| e.is_locked()));

        let html = r#"
            <div class="bs-blog-post">
              <p class="chapter_content">Free teaser line.</p>
              <form class="myCRED-buy-form"></form>
            </div>"#;
        assert!(parse_chapter_page(html, &NIGHT_STUDIO, NIGHT_STUDIO.site).is_err_and(|e| e.is_locked()));
    }

    #[test]
    fn chapter_without_content_is_missing_data() {
        let result = parse_chapter_page("<div class=\"bs-blog-post\"></div>", &NIGHT_STUDIO, NIGHT_STUDIO.site);
        assert!(matches!(result, Err(PluginError::MissingData { .. })));
        let result = parse_chapter_page("<p>nothing</p>", &KARI_STUDIO, KARI_STUDIO.site);
        assert!(matches!(result, Err(PluginError::MissingData { .. })));
    }

    #[test]
    fn catalogue_url_keeps_only_set_params() {
        let options = PopularOptions {
            show_latest: false,
            filters: FilterValues::new()
                .with("order", FilterValue::Text("popularity".into()))
                .with("status", FilterValue::Text("On Hold".into()))
                .with("language", FilterValue::Text("Korean".into())),
        };
        assert_eq!(
            catalogue_url(&KARI_STUDIO, 2, &PluginId::KariStudio.filters(), &options),
            "https://karistudio.com/novels/page/2/?sort=popularity&language=Korean&status=On+Hold"
        );
        assert_eq!(
            catalogue_url(&NIGHT_STUDIO, 2, &PluginId::NightStudio.filters(), &options),
            "https://nightstudio.site/novels/page/2/?sort=popularity&status=On+Hold"
        );
        assert_eq!(
            catalogue_url(&NIGHT_STUDIO, 1, &PluginId::NightStudio.filters(), &PopularOptions::default()),
            "https://nightstudio.site/novels/"
        );
    }
}
