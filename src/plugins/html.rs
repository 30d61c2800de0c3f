//! Small helpers over `scraper::Html` shared by the plugins.

use crate::plugins::PluginError;
use scraper::{ElementRef, Html, Selector};

/// Parse a CSS selector or return an error (avoids panics from Selector::parse).
pub(crate) fn parse_selector(sel: &str) -> Result<Selector, PluginError> {
    Selector::parse(sel).map_err(|e| PluginError::InvalidSelector {
        selector: sel.to_string(),
        reason: e.to_string(),
    })
}

/// All text below `el`, trimmed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match under `scope`, if any and non-empty.
pub(crate) fn select_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope
        .select(sel)
        .next()
        .map(text_of)
        .filter(|s| !s.is_empty())
}

/// Attribute of the first match under `scope`, if present and non-empty.
pub(crate) fn select_attr(scope: ElementRef<'_>, sel: &Selector, attr: &str) -> Option<String> {
    scope
        .select(sel)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trimmed text of every match under `scope`, empty strings dropped.
pub(crate) fn select_all_text(scope: ElementRef<'_>, sel: &Selector) -> Vec<String> {
    scope
        .select(sel)
        .map(text_of)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Detach every node matching any of `selectors` from the tree. Returns how many were removed.
pub(crate) fn remove_matching(doc: &mut Html, selectors: &[&str]) -> Result<usize, PluginError> {
    let mut ids = Vec::new();
    for sel in selectors {
        let sel = parse_selector(sel)?;
        ids.extend(doc.select(&sel).map(|el| el.id()));
    }
    let mut removed = 0;
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    Ok(removed)
}

/// Detach `<p>` elements with no text and no embedded image.
pub(crate) fn remove_empty_paragraphs(doc: &mut Html) -> Result<usize, PluginError> {
    let p_sel = parse_selector("p")?;
    let img_sel = parse_selector("img")?;
    let ids: Vec<_> = doc
        .select(&p_sel)
        .filter(|p| {
            p.text().all(|t| t.trim().is_empty())
                && p.select(&img_sel).next().is_none()
        })
        .map(|p| p.id())
        .collect();
    let count = ids.len();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
    Ok(count)
}

/// Inner HTML of the first element matching `sel`, trimmed.
pub(crate) fn inner_html_of(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel).next().map(|e| e.inner_html().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_matching_detaches_nodes() -> Result<(), PluginError> {
        let mut doc = Html::parse_fragment(
            r#"<div class="c"><p>Keep</p><div class="ad-container">Buy now</div><p>Also</p></div>"#,
        );
        let removed = remove_matching(&mut doc, &["div.ad-container"])?;
        assert_eq!(removed, 1);
        let html = inner_html_of(&doc, &parse_selector("div.c")?).unwrap_or_default();
        assert!(html.contains("Keep"));
        assert!(!html.contains("Buy now"));
        Ok(())
    }

    #[test]
    fn remove_empty_paragraphs_keeps_images() -> Result<(), PluginError> {
        let mut doc = Html::parse_fragment(
            "<div><p> </p><p>&nbsp;</p><p><img src=\"x.png\"></p><p>Text</p></div>",
        );
        assert_eq!(remove_empty_paragraphs(&mut doc)?, 2);
        let html = inner_html_of(&doc, &parse_selector("div")?).unwrap_or_default();
        assert!(html.contains("x.png"));
        assert!(html.contains("Text"));
        Ok(())
    }

    #[test]
    fn select_helpers_skip_empty_values() -> Result<(), PluginError> {
        let doc = Html::parse_fragment(r#"<a class="t" href=""> </a><span class="g">A</span><span class="g"></span>"#);
        let root = doc.root_element();
        assert_eq!(select_text(root, &parse_selector("a.t")?), None);
        assert_eq!(select_attr(root, &parse_selector("a.t")?, "href"), None);
        assert_eq!(select_all_text(root, &parse_selector("span.g")?), vec!["A"]);
        Ok(())
    }

    #[test]
    fn invalid_selector_is_an_error() {
        assert!(matches!(
            parse_selector("div[[["),
            Err(PluginError::InvalidSelector { .. })
        ));
    }
}
