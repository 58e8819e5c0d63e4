//! Readability-style article extraction.
//!
//! Two independent steps, mirroring the reader-mode flow:
//!
//! 1. [`is_probably_readerable`]: a cheap heuristic over the document's text
//!    blocks that decides whether reader extraction is worth attempting.
//!    Blocks shorter than 140 characters are ignored; longer blocks
//!    contribute `sqrt(len - 140)` to a running score, and the document is
//!    readerable once the score passes 20.
//! 2. [`extract`]: when the check passes, pick the best content container
//!    and return both its inner HTML and its plain text.
//!
//! Container choice prefers semantic markup (`<article>`, `<main>`,
//! `[role=main]`), then the `<div>` with the most direct paragraph text, then
//! the whole `<body>`.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Text blocks sampled by the readerability check.
static TEXT_BLOCKS: Lazy<Selector> = Lazy::new(|| Selector::parse("p, pre").unwrap());
/// Semantic containers tried first during extraction.
static CONTAINERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, main, [role=main]").unwrap());
static DIVS: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Minimum text length for a block to count toward the readerability score.
const MIN_CONTENT_LENGTH: usize = 140;
/// Score a document must accumulate to be considered readerable.
const MIN_SCORE: f64 = 20.0;

/// Result of the article-extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleExtraction {
    /// The document is readerable and a content container was found.
    Readable {
        /// Inner HTML of the chosen container.
        content: String,
        /// Concatenated text of the chosen container.
        text: String,
    },
    /// The readerability check rejected the document.
    NotReadable,
    /// Extraction was attempted but produced nothing usable (also the state
    /// reported when the document could not be fetched at all).
    Failed,
}

/// Run the readerability check and, when it passes, extract the article.
pub fn extract(html: &str) -> ArticleExtraction {
    let document = Html::parse_document(html);
    if !is_probably_readerable(&document) {
        return ArticleExtraction::NotReadable;
    }
    match extract_article(&document) {
        Some((content, text)) => ArticleExtraction::Readable { content, text },
        None => ArticleExtraction::Failed,
    }
}

/// Heuristic check that the document carries enough body text to be worth
/// running reader extraction on.
pub fn is_probably_readerable(document: &Html) -> bool {
    let mut score = 0.0;
    for block in document.select(&TEXT_BLOCKS) {
        let text = block.text().collect::<String>();
        let len = text.trim().len();
        if len < MIN_CONTENT_LENGTH {
            continue;
        }
        score += ((len - MIN_CONTENT_LENGTH) as f64).sqrt();
        if score > MIN_SCORE {
            return true;
        }
    }
    false
}

/// Pick the best content container and return `(inner HTML, plain text)`.
fn extract_article(document: &Html) -> Option<(String, String)> {
    best_semantic_container(document)
        .or_else(|| densest_div(document))
        .or_else(|| {
            document
                .select(&BODY)
                .next()
                .filter(|body| !body.text().collect::<String>().trim().is_empty())
        })
        .and_then(|node| {
            let content = node.inner_html();
            let text = node.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some((content, text))
            }
        })
}

/// The semantic container with the most text, if any holds a plausible
/// amount of it.
fn best_semantic_container(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&CONTAINERS)
        .map(|node| (text_len(node), node))
        .filter(|(len, _)| *len >= MIN_CONTENT_LENGTH)
        .max_by_key(|(len, _)| *len)
        .map(|(_, node)| node)
}

/// The `<div>` with the most text in its direct `<p>` children.
///
/// Scoring direct children only keeps outer wrapper divs (which contain the
/// navigation and footer along with everything else) from winning.
fn densest_div(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&DIVS)
        .map(|div| {
            let paragraph_len: usize = div
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "p")
                .map(text_len)
                .sum();
            (paragraph_len, div)
        })
        .filter(|(len, _)| *len >= MIN_CONTENT_LENGTH)
        .max_by_key(|(len, _)| *len)
        .map(|(_, div)| div)
}

fn text_len(node: ElementRef<'_>) -> usize {
    node.text().collect::<String>().trim().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_paragraph(marker: &str) -> String {
        format!("<p>{} {}</p>", marker, "lorem ipsum dolor sit amet ".repeat(25))
    }

    #[test]
    fn long_article_is_readerable() {
        let html = format!(
            "<html><body><article>{}{}</article></body></html>",
            long_paragraph("first"),
            long_paragraph("second")
        );
        assert!(is_probably_readerable(&Html::parse_document(&html)));
    }

    #[test]
    fn short_page_is_not_readerable() {
        let html = "<html><body><p>Just a stub.</p></body></html>";
        assert!(!is_probably_readerable(&Html::parse_document(html)));
        assert_eq!(extract(html), ArticleExtraction::NotReadable);
    }

    #[test]
    fn extraction_prefers_the_article_container() {
        let html = format!(
            "<html><body><header>Site navigation links</header><article>{}</article><footer>Contact us</footer></body></html>",
            long_paragraph("the story")
        );
        match extract(&html) {
            ArticleExtraction::Readable { content, text } => {
                assert!(content.contains("the story"));
                assert!(text.contains("the story"));
                assert!(!text.contains("navigation"));
            }
            other => panic!("expected readable extraction, got {other:?}"),
        }
    }

    #[test]
    fn densest_div_wins_without_semantic_markup() {
        let html = format!(
            "<html><body><div><p>short sidebar</p></div><div>{}{}</div></body></html>",
            long_paragraph("main column"),
            long_paragraph("continues")
        );
        match extract(&html) {
            ArticleExtraction::Readable { text, .. } => {
                assert!(text.contains("main column"));
                assert!(!text.contains("short sidebar"));
            }
            other => panic!("expected readable extraction, got {other:?}"),
        }
    }

    #[test]
    fn body_is_the_final_fallback() {
        let html = format!(
            "<html><body>{}</body></html>",
            long_paragraph("bare paragraphs")
        );
        match extract(&html) {
            ArticleExtraction::Readable { text, .. } => {
                assert!(text.contains("bare paragraphs"));
            }
            other => panic!("expected readable extraction, got {other:?}"),
        }
    }

    #[test]
    fn wrapper_div_does_not_beat_the_content_div() {
        // The outer div holds everything; direct-children scoring keeps the
        // inner content div in front.
        let html = format!(
            "<html><body><div><div><p>tiny nav</p></div><div>{}</div></div></body></html>",
            long_paragraph("real content")
        );
        match extract(&html) {
            ArticleExtraction::Readable { text, .. } => {
                assert!(text.contains("real content"));
                assert!(!text.contains("tiny nav"));
            }
            other => panic!("expected readable extraction, got {other:?}"),
        }
    }
}
