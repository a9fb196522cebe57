//! Heuristic article extraction from arbitrary markup.
//!
//! No two sites share a schema, so every field is recovered by an ordered
//! **fallback chain** of structural probes: the first acceptable match wins.
//! [`extract`] is a total function - a syntactically valid but semantically
//! unhelpful page still yields a fully populated [`ArticleRecord`], with
//! sentinel strings for title/content and empty strings for the optional
//! metadata fields. Degraded extraction is a data state, never an error.
//!
//! Content extraction additionally enforces a 200-character substance
//! threshold: structurally named containers (a nav "content" div, say) that
//! hold no real text are rejected in favor of the next probe.

use crate::models::{ArticleRecord, NO_CONTENT_FOUND, NO_TITLE_FOUND};
use crate::normalize::normalize;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Elements whose text never belongs to article content.
const STRIP_TAGS: &[&str] = &["script", "style", "nav", "footer", "header", "aside", "form"];

/// Minimum normalized character count for a content probe to be accepted.
const SUBSTANCE_THRESHOLD: usize = 200;

/// A single extraction strategy within a fallback chain.
#[derive(Debug, Clone, Copy)]
enum Probe {
    /// Text content of the first element with this tag name.
    Tag(&'static str),
    /// `content` attribute of the first element matching this selector,
    /// falling back to the element's own text.
    Meta(&'static str),
    /// A named attribute of the first element matching this selector.
    Attr(&'static str, &'static str),
    /// Text content of the first element matching this CSS selector.
    Css(&'static str),
}

impl Probe {
    /// Run the probe, yielding trimmed non-empty text or nothing.
    fn run(&self, doc: &Html) -> Option<String> {
        let (selector, attr) = match self {
            Probe::Tag(sel) | Probe::Css(sel) => (*sel, None),
            Probe::Meta(sel) => (*sel, Some("content")),
            Probe::Attr(sel, attr) => (*sel, Some(*attr)),
        };
        let parsed = Selector::parse(selector).ok()?;
        let element = doc.select(&parsed).next()?;

        let text = match attr {
            Some(name) => match element.value().attr(name) {
                Some(value) => value.to_string(),
                None => element.text().collect::<String>(),
            },
            None => element.text().collect::<String>(),
        };
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Evaluate probes in priority order; first non-empty match wins.
fn first_match(doc: &Html, probes: &[Probe]) -> Option<String> {
    probes.iter().find_map(|p| p.run(doc))
}

const TITLE_PROBES: &[Probe] = &[
    Probe::Tag("h1"),
    Probe::Tag("title"),
    Probe::Meta(r#"[property="og:title"]"#),
    Probe::Meta(r#"[name="twitter:title"]"#),
    Probe::Css(".article-title"),
    Probe::Css(".post-title"),
    Probe::Css(".entry-title"),
    Probe::Css("h1.title"),
    Probe::Css("h1.headline"),
];

const AUTHOR_PROBES: &[Probe] = &[
    Probe::Meta(r#"[rel="author"]"#),
    Probe::Meta(r#"[property="article:author"]"#),
    Probe::Meta(r#"[name="author"]"#),
    Probe::Css(".author"),
    Probe::Css(".byline"),
    Probe::Css(".post-author"),
    Probe::Css(".article-author"),
];

const DATE_PROBES: &[Probe] = &[
    Probe::Meta(r#"[property="article:published_time"]"#),
    Probe::Meta(r#"[name="publish_date"]"#),
    Probe::Attr("[datetime]", "datetime"),
    Probe::Css(".publish-date"),
    Probe::Css(".date"),
    Probe::Css(".post-date"),
    Probe::Css(".article-date"),
];

const DESCRIPTION_PROBES: &[Probe] = &[
    Probe::Meta(r#"[name="description"]"#),
    Probe::Meta(r#"[property="og:description"]"#),
    Probe::Meta(r#"[name="twitter:description"]"#),
];

/// Structural containers probed for article content, in priority order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    r#"[role="main"]"#,
    ".article-content",
    ".post-content",
    ".entry-content",
    ".content",
    ".article-body",
    ".story-body",
    ".post-body",
    "main",
    ".main-content",
];

/// Extract a best-effort article record from raw markup.
///
/// Never fails; the `url` field is left empty for the caller to fill.
/// Text cleanup via [`normalize`] is applied to the content field only.
pub fn extract(html: &str) -> ArticleRecord {
    let doc = Html::parse_document(html);

    let title = first_match(&doc, TITLE_PROBES).unwrap_or_else(|| NO_TITLE_FOUND.to_string());
    let content = extract_content(&doc);
    let author = first_match(&doc, AUTHOR_PROBES).unwrap_or_default();
    let publish_date = first_match(&doc, DATE_PROBES).unwrap_or_default();
    let description = first_match(&doc, DESCRIPTION_PROBES).unwrap_or_default();

    debug!(
        title_len = title.len(),
        content_len = content.len(),
        has_author = !author.is_empty(),
        "Extracted article fields"
    );

    ArticleRecord {
        url: String::new(),
        title,
        content,
        author,
        publish_date,
        description,
    }
}

/// Extract the article body through the content fallback chain.
///
/// Noise subtrees ([`STRIP_TAGS`]) are excluded before any probe runs, so no
/// probe ever sees script, style, or chrome text. Structural probes must
/// clear [`SUBSTANCE_THRESHOLD`] on the normalized text; the paragraph
/// fallback is held to the same bar; all-document text is accepted at any
/// length as the last resort.
fn extract_content(doc: &Html) -> String {
    for selector in CONTENT_SELECTORS {
        let Ok(parsed) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = doc.select(&parsed).next() {
            let content = normalize(&text_excluding_noise(element));
            if content.chars().count() > SUBSTANCE_THRESHOLD {
                debug!(selector, chars = content.chars().count(), "Content probe accepted");
                return content;
            }
        }
    }

    // Fallback: every paragraph on the page, joined.
    let p = Selector::parse("p").unwrap();
    let paragraphs: Vec<String> = doc
        .select(&p)
        .filter(|el| !has_noise_ancestor(*el))
        .map(text_excluding_noise)
        .collect();
    if !paragraphs.is_empty() {
        let content = normalize(&paragraphs.join(" "));
        if content.chars().count() > SUBSTANCE_THRESHOLD {
            debug!(chars = content.chars().count(), "Paragraph fallback accepted");
            return content;
        }
    }

    // Last resort: all document text, regardless of length.
    let content = normalize(&text_excluding_noise(doc.root_element()));
    if content.is_empty() {
        NO_CONTENT_FOUND.to_string()
    } else {
        content
    }
}

/// Collect descendant text while skipping [`STRIP_TAGS`] subtrees.
fn text_excluding_noise(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) => {
                if STRIP_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn has_noise_ancestor(element: ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| STRIP_TAGS.contains(&a.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_never_fails_on_empty_page() {
        let record = extract("<html><head></head><body></body></html>");
        assert_eq!(record.title, NO_TITLE_FOUND);
        assert_eq!(record.content, NO_CONTENT_FOUND);
        assert_eq!(record.author, "");
        assert_eq!(record.publish_date, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_h1_wins_over_title_tag() {
        let html = "<html><head><title>Site Name</title></head>\
                    <body><h1>Actual Headline</h1></body></html>";
        assert_eq!(extract(html).title, "Actual Headline");
    }

    #[test]
    fn test_title_falls_back_to_meta() {
        let html = r#"<html><head><meta property="og:title" content="Social Title">
                      </head><body></body></html>"#;
        assert_eq!(extract(html).title, "Social Title");
    }

    #[test]
    fn test_empty_h1_does_not_shadow_title_tag() {
        let html = "<html><head><title>Fallback</title></head>\
                    <body><h1>  </h1></body></html>";
        assert_eq!(extract(html).title, "Fallback");
    }

    #[test]
    fn test_substance_threshold_rejects_199_chars() {
        let short = "a".repeat(199);
        let long = "b".repeat(300);
        let html = format!(
            "<html><body><article>{short}</article>\
             <div class=\"post-content\">{long}</div></body></html>"
        );
        let record = extract(&html);
        assert_eq!(record.content, long);
    }

    #[test]
    fn test_substance_threshold_accepts_201_chars() {
        let text = "a".repeat(201);
        let html = format!("<html><body><article>{text}</article></body></html>");
        assert_eq!(extract(&html).content, text);
    }

    #[test]
    fn test_script_and_nav_text_excluded_from_content() {
        let body = "c".repeat(250);
        let html = format!(
            "<html><body><article><script>var x = 1;</script>\
             <nav>Home News Sports</nav>{body}</article></body></html>"
        );
        let record = extract(&html);
        assert!(!record.content.contains("var x"));
        assert!(!record.content.contains("Home News"));
        assert!(record.content.contains(&body));
    }

    #[test]
    fn test_paragraph_fallback_when_no_container_matches() {
        let sentence = "word ".repeat(60);
        let html = format!(
            "<html><body><div><p>{sentence}</p><p>{sentence}</p></div></body></html>"
        );
        let record = extract(&html);
        assert!(record.content.starts_with("word word"));
        assert!(record.content.chars().count() > SUBSTANCE_THRESHOLD);
    }

    #[test]
    fn test_script_inside_paragraph_excluded_from_fallback() {
        let sentence = "word ".repeat(60);
        let html = format!(
            "<html><body><div><p>{sentence}<script>var leaked = 1;</script></p>\
             <p>{sentence}</p></div></body></html>"
        );
        let record = extract(&html);
        assert!(!record.content.contains("var leaked"));
        assert!(record.content.starts_with("word word"));
    }

    #[test]
    fn test_all_text_fallback_accepts_short_content() {
        let html = "<html><body><div>Just a short note.</div></body></html>";
        assert_eq!(extract(html).content, "Just a short note.");
    }

    #[test]
    fn test_author_from_meta_then_class() {
        let html = r#"<html><head><meta name="author" content="Jane Doe"></head>
                      <body></body></html>"#;
        assert_eq!(extract(html).author, "Jane Doe");

        let html = r#"<html><body><span class="byline">By John Smith</span></body></html>"#;
        assert_eq!(extract(html).author, "By John Smith");
    }

    #[test]
    fn test_publish_date_from_meta_and_datetime_attr() {
        let html = r#"<html><head>
            <meta property="article:published_time" content="2026-08-01T10:00:00Z">
            </head><body></body></html>"#;
        assert_eq!(extract(html).publish_date, "2026-08-01T10:00:00Z");

        let html = r#"<html><body><time datetime="2026-08-02">Aug 2</time></body></html>"#;
        assert_eq!(extract(html).publish_date, "2026-08-02");
    }

    #[test]
    fn test_description_from_meta() {
        let html = r#"<html><head><meta name="description" content="A short blurb."></head>
                      <body></body></html>"#;
        assert_eq!(extract(html).description, "A short blurb.");
    }

    #[test]
    fn test_content_is_normalized() {
        let body = format!("{} Advertisement trailing noise", "real text ".repeat(30));
        let html = format!("<html><body><article>{body}</article></body></html>");
        let record = extract(&html);
        assert!(!record.content.contains("Advertisement"));
    }

    #[test]
    fn test_url_left_for_caller() {
        let record = extract("<html><body></body></html>");
        assert_eq!(record.url, "");
    }
}
