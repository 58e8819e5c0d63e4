//! Single-shot page metadata extraction.
//!
//! The `extract` subcommand fetches one URL and prints a fixed-format report
//! to standard output: publication date, author, title, readability-extracted
//! article HTML, and the article's plain text, in that order, separated by a
//! two-line `split` delimiter token. The downstream date processor splits the
//! stream on that token positionally, so the layout and the sentinel values
//! are a wire contract and must not change.
//!
//! Every failure degrades instead of propagating: an unreachable URL, an
//! unresolvable metadata field, or a page the readability heuristic rejects
//! each produce their sentinel in place, and the command still exits 0.

pub mod metadata;
pub mod readability;

use metadata::PageMetadata;
use readability::ArticleExtraction;
use tracing::{info, instrument, warn};

/// Delimiter token between report fields. Two lines, matched positionally by
/// the downstream processor.
const SEGMENT_DELIMITER: &str = "split\nsplit";

/// Sentinel for an unresolved date, author, or title field.
const FIELD_FALLBACK: &str = "N/A";

/// Sentinel pair emitted when the document fails the readerability check.
const NOT_READABLE: &str = "not readable";

/// Placeholders emitted when article extraction produced nothing usable
/// (also used for the content fields of the network-failure report).
const CONTENT_PLACEHOLDER: &str = "article.content";
const TEXT_PLACEHOLDER: &str = "article.textContent";

/// Fetch a URL and print its extraction report to standard output.
///
/// Never fails: network and extraction errors collapse into sentinel output.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn run(url: &str) {
    print!("{}", report_for(url).await);
}

/// Produce the full delimited report for one URL.
pub async fn report_for(url: &str) -> String {
    match fetch(url).await {
        Ok((final_url, html)) => {
            info!(%final_url, bytes = html.len(), "Fetched document");
            let meta = metadata::extract(&html);
            let article = readability::extract(&html);
            render_report(&meta, &article)
        }
        Err(e) => {
            warn!(error = %e, "Fetch failed; emitting fallback report");
            render_report(&PageMetadata::default(), &ArticleExtraction::Failed)
        }
    }
}

/// Fetch the document body, following redirects.
///
/// HTTP error statuses are treated as failures so that an error page is
/// never mistaken for an article.
async fn fetch(url: &str) -> Result<(String, String), reqwest::Error> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let final_url = response.url().to_string();
    let html = response.text().await?;
    Ok((final_url, html))
}

/// Render the five report fields in wire order.
pub fn render_report(meta: &PageMetadata, article: &ArticleExtraction) -> String {
    let (content, text) = match article {
        ArticleExtraction::Readable { content, text } => (content.as_str(), text.as_str()),
        ArticleExtraction::NotReadable => (NOT_READABLE, NOT_READABLE),
        ArticleExtraction::Failed => (CONTENT_PLACEHOLDER, TEXT_PLACEHOLDER),
    };

    let fields = [
        meta.date.as_deref().unwrap_or(FIELD_FALLBACK),
        meta.author.as_deref().unwrap_or(FIELD_FALLBACK),
        meta.title.as_deref().unwrap_or(FIELD_FALLBACK),
        content,
        text,
    ];

    let mut report = fields.join(&format!("\n{SEGMENT_DELIMITER}\n"));
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_layout_is_bit_exact() {
        let meta = PageMetadata {
            date: Some("2020-01-01T00:00:00+00:00".to_string()),
            author: Some("Jane Doe".to_string()),
            title: Some("A Headline".to_string()),
        };
        let article = ArticleExtraction::Readable {
            content: "<p>Body</p>".to_string(),
            text: "Body".to_string(),
        };

        assert_eq!(
            render_report(&meta, &article),
            "2020-01-01T00:00:00+00:00\nsplit\nsplit\nJane Doe\nsplit\nsplit\nA Headline\nsplit\nsplit\n<p>Body</p>\nsplit\nsplit\nBody\n"
        );
    }

    #[test]
    fn unresolved_fields_render_their_sentinels() {
        let report = render_report(&PageMetadata::default(), &ArticleExtraction::Failed);

        assert_eq!(
            report,
            "N/A\nsplit\nsplit\nN/A\nsplit\nsplit\nN/A\nsplit\nsplit\narticle.content\nsplit\nsplit\narticle.textContent\n"
        );
        // Five fields and four two-line delimiters.
        assert_eq!(report.lines().count(), 13);
    }

    #[test]
    fn not_readable_pages_keep_their_metadata() {
        let meta = PageMetadata {
            date: None,
            author: None,
            title: Some("Still a Title".to_string()),
        };
        let report = render_report(&meta, &ArticleExtraction::NotReadable);

        assert_eq!(
            report,
            "N/A\nsplit\nsplit\nN/A\nsplit\nsplit\nStill a Title\nsplit\nsplit\nnot readable\nsplit\nsplit\nnot readable\n"
        );
    }

    #[tokio::test]
    async fn unreachable_url_yields_the_full_fallback_report() {
        // Port 1 on loopback: connection refused without any DNS dependency.
        let report = report_for("http://127.0.0.1:1/").await;

        assert_eq!(
            report,
            render_report(&PageMetadata::default(), &ArticleExtraction::Failed)
        );
    }
}
