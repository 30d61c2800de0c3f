//! Output rendering for the CLI: JSON for model values, and HTML, Markdown, or plain text for
//! chapter bodies.

use scraper::{Html, Selector};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// How the `chapter` command prints a chapter body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChapterFormat {
    #[default]
    Html,
    Markdown,
    Text,
}

impl FromStr for ChapterFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(ChapterFormat::Html),
            "markdown" | "md" => Ok(ChapterFormat::Markdown),
            "text" | "txt" => Ok(ChapterFormat::Text),
            _ => Err(format!(
                "Invalid format value: '{}'. Use html, markdown, or text.",
                s
            )),
        }
    }
}

/// Errors from rendering or writing output.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Cannot render: chapter body is empty.")]
    EmptyBody,

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Strip HTML from a chapter body to plain text using scraper. Paragraphs are separated by a
/// blank line; bodies without `<p>` fall back to all text.
pub(crate) fn body_to_plain_text(body: &str) -> String {
    let fragment = Html::parse_fragment(body);
    if let Ok(p_sel) = Selector::parse("p") {
        let paragraphs: Vec<String> = fragment
            .select(&p_sel)
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n\n");
        }
    }
    let text: String = fragment.root_element().text().collect();
    if text.trim().is_empty() {
        body.trim().to_string()
    } else {
        text.trim().to_string()
    }
}

/// Render a chapter body (HTML fragment) in `format`.
pub fn render_chapter(body: &str, format: ChapterFormat) -> Result<String, FormatError> {
    if body.trim().is_empty() {
        return Err(FormatError::EmptyBody);
    }
    let out = match format {
        ChapterFormat::Html => body.trim().to_string(),
        ChapterFormat::Markdown => html2md::parse_html(body).trim().to_string(),
        ChapterFormat::Text => body_to_plain_text(body),
    };
    Ok(out)
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), FormatError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Write a rendered chapter followed by a newline.
pub fn write_chapter<W: Write>(
    out: &mut W,
    body: &str,
    format: ChapterFormat,
) -> Result<(), FormatError> {
    let rendered = render_chapter(body, format)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NovelItem;

    const BODY: &str = "<p>First paragraph.</p><p>Second <em>paragraph</em>.</p>";

    #[test]
    fn markdown_has_no_raw_p_tags() -> Result<(), FormatError> {
        let md = render_chapter(BODY, ChapterFormat::Markdown)?;
        assert!(md.contains("First paragraph."));
        assert!(md.contains("Second"));
        assert!(!md.contains("<p>"));
        Ok(())
    }

    #[test]
    fn text_separates_paragraphs() -> Result<(), FormatError> {
        let text = render_chapter(BODY, ChapterFormat::Text)?;
        assert_eq!(text, "First paragraph.\n\nSecond paragraph.");
        Ok(())
    }

    #[test]
    fn html_is_passed_through() -> Result<(), FormatError> {
        assert_eq!(render_chapter("  <p>x</p>\n", ChapterFormat::Html)?, "<p>x</p>");
        Ok(())
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(matches!(
            render_chapter("  ", ChapterFormat::Text),
            Err(FormatError::EmptyBody)
        ));
    }

    #[test]
    fn body_to_plain_text_without_paragraphs() {
        assert_eq!(body_to_plain_text("<div>Hello <b>there</b></div>"), "Hello there");
        assert_eq!(body_to_plain_text("No tags here."), "No tags here.");
        assert_eq!(body_to_plain_text("   \n  "), "");
    }

    #[test]
    fn parse_format_names() {
        assert_eq!("md".parse::<ChapterFormat>(), Ok(ChapterFormat::Markdown));
        assert_eq!("TEXT".parse::<ChapterFormat>(), Ok(ChapterFormat::Text));
        assert_eq!("html".parse::<ChapterFormat>(), Ok(ChapterFormat::Html));
        assert!("epub".parse::<ChapterFormat>().is_err());
    }

    #[test]
    fn write_json_and_chapter_to_buffer() -> Result<(), FormatError> {
        let mut buf = Vec::new();
        let items = vec![NovelItem {
            name: "A".into(),
            path: "/a".into(),
            cover: "https://x/c.jpg".into(),
        }];
        write_json(&mut buf, &items)?;
        write_chapter(&mut buf, BODY, ChapterFormat::Text)?;
        let out = String::from_utf8_lossy(&buf);
        assert!(out.contains("\"name\": \"A\""));
        assert!(out.ends_with("Second paragraph.\n"));
        Ok(())
    }
}
