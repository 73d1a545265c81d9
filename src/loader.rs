use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{header::CONTENT_TYPE, Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// Substituted for the document text when retrieval yields no segments.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content found.";

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .user_agent(concat!("web-summarizer/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMetadata {
    pub source: String,
    pub title: Option<String>,
}

/// One unit of extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSegment {
    pub page_content: String,
    pub metadata: SegmentMetadata,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub segments: Vec<DocumentSegment>,
}

impl Document {
    pub fn new(segments: Vec<DocumentSegment>) -> Self {
        Document { segments }
    }

    pub fn empty() -> Self {
        Document::default()
    }

    /// Text of the first segment, or the placeholder when nothing was extracted.
    pub fn first_text(&self) -> &str {
        self.segments
            .first()
            .map(|segment| segment.page_content.as_str())
            .unwrap_or(NO_CONTENT_PLACEHOLDER)
    }

    pub fn first_title(&self) -> Option<&str> {
        self.segments
            .first()
            .and_then(|segment| segment.metadata.title.as_deref())
    }
}

#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Document>;
}

/// Fetches a URL over HTTP and extracts its readable text.
#[derive(Clone, Default)]
pub struct WebLoader;

impl WebLoader {
    pub fn new() -> Self {
        WebLoader
    }
}

#[async_trait]
impl DocumentLoader for WebLoader {
    async fn load(&self, url: &str) -> Result<Document> {
        let fetch_start = std::time::Instant::now();
        let response = CLIENT.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!("{} returned HTTP {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let kind = ContentKind::classify(content_type.as_deref());
        if let ContentKind::Unsupported(mime) = &kind {
            return Err(AppError::UnsupportedContent(format!(
                "{} is not a text document ({})",
                url, mime
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ParseError(format!("Failed to decode response body: {}", e)))?;
        info!(url, bytes = body.len(), elapsed = ?fetch_start.elapsed(), "Fetched document");

        if looks_binary(&body) {
            return Err(AppError::UnsupportedContent(format!(
                "{} returned binary data",
                url
            )));
        }

        let segment = match kind {
            ContentKind::Html => extract_segment(url, &body),
            _ => DocumentSegment {
                page_content: normalize_whitespace(&body),
                metadata: SegmentMetadata {
                    source: url.to_string(),
                    ..Default::default()
                },
            },
        };

        if segment.page_content.is_empty() {
            debug!(url, "No text extracted");
            return Ok(Document::empty());
        }

        Ok(Document::new(vec![segment]))
    }
}

#[derive(Debug, PartialEq)]
enum ContentKind {
    Html,
    Text,
    Unsupported(String),
}

impl ContentKind {
    fn classify(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return ContentKind::Html;
        };
        let mime = raw.split(';').next().unwrap_or("").trim().to_ascii_lowercase();

        match mime.as_str() {
            "" | "text/html" | "application/xhtml+xml" => ContentKind::Html,
            "application/json" | "application/xml" => ContentKind::Text,
            m if m.starts_with("text/") || m.ends_with("+xml") || m.ends_with("+json") => {
                ContentKind::Text
            }
            _ => ContentKind::Unsupported(mime),
        }
    }
}

fn looks_binary(body: &str) -> bool {
    body.contains('\0')
}

/// Builds a segment from an HTML page: visible text plus its title.
pub fn extract_segment(url: &str, html: &str) -> DocumentSegment {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    DocumentSegment {
        page_content: extract_text(&document),
        metadata: SegmentMetadata {
            source: url.to_string(),
            title,
        },
    }
}

fn extract_text(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    collect_text(root, &mut raw);
    normalize_whitespace(&raw)
}

/// Appends the visible text under `element`, with block elements on their own lines.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
    if block {
        out.push('\n');
    }
}

/// Trims every line and drops the blank ones.
pub fn normalize_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
        }
        result.push_str(trimmed);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> DocumentSegment {
        DocumentSegment {
            page_content: text.to_string(),
            metadata: SegmentMetadata::default(),
        }
    }

    #[test]
    fn first_text_uses_first_segment_only() {
        let doc = Document::new(vec![segment("first"), segment("second")]);
        assert_eq!(doc.first_text(), "first");
    }

    #[test]
    fn first_text_falls_back_to_placeholder() {
        assert_eq!(Document::empty().first_text(), "No content found.");
    }

    #[test]
    fn extracts_visible_text_and_metadata() {
        let html = r#"<!DOCTYPE html>
            <html lang="en">
              <head><title> Rust Blog </title><style>body { color: red; }</style></head>
              <body>
                <h1>Announcing Rust</h1>
                <script>var tracking = true;</script>
                <p>The <b>Rust</b> team is happy.</p>
                <noscript>Enable JavaScript</noscript>
                <ul><li>One</li><li>Two</li></ul>
              </body>
            </html>"#;

        let segment = extract_segment("https://blog.rust-lang.org", html);

        assert_eq!(
            segment.page_content,
            "Announcing Rust\nThe Rust team is happy.\nOne\nTwo"
        );
        assert_eq!(segment.metadata.source, "https://blog.rust-lang.org");
        assert_eq!(segment.metadata.title.as_deref(), Some("Rust Blog"));
    }

    #[test]
    fn text_after_a_closed_block_starts_a_new_line() {
        let segment = extract_segment(
            "https://example.com",
            "<html><body><div>Intro<p>First paragraph.</p>Trailing text</div><span>after</span></body></html>",
        );

        assert_eq!(segment.page_content, "Intro\nFirst paragraph.\nTrailing text\nafter");
    }

    #[test]
    fn inline_elements_do_not_break_lines() {
        let segment = extract_segment(
            "https://example.com",
            "<body><p>Rust <em>is</em> <a href=\"/\">fast</a>.</p></body>",
        );
        assert_eq!(segment.page_content, "Rust is fast.");
    }

    #[test]
    fn first_title_comes_from_first_segment() {
        let doc = Document::new(vec![extract_segment(
            "https://example.com",
            "<html><head><title>Ferris</title></head><body><p>crab</p></body></html>",
        )]);
        assert_eq!(doc.first_title(), Some("Ferris"));
        assert_eq!(Document::empty().first_title(), None);
    }

    #[test]
    fn page_without_text_extracts_nothing() {
        let segment = extract_segment("https://example.com", "<html><body><script>x()</script></body></html>");
        assert!(segment.page_content.is_empty());
        assert_eq!(segment.metadata.title, None);
    }

    #[test]
    fn normalize_whitespace_drops_blank_lines() {
        assert_eq!(normalize_whitespace("  a  \n\n \t\n b\n"), "a\nb");
        assert_eq!(normalize_whitespace("\n\n"), "");
    }

    #[test]
    fn classifies_content_types() {
        assert_eq!(ContentKind::classify(None), ContentKind::Html);
        assert_eq!(ContentKind::classify(Some("text/html; charset=utf-8")), ContentKind::Html);
        assert_eq!(ContentKind::classify(Some("text/plain")), ContentKind::Text);
        assert_eq!(ContentKind::classify(Some("application/rss+xml")), ContentKind::Text);
        assert_eq!(
            ContentKind::classify(Some("application/pdf")),
            ContentKind::Unsupported("application/pdf".to_string())
        );
        assert_eq!(
            ContentKind::classify(Some("IMAGE/PNG")),
            ContentKind::Unsupported("image/png".to_string())
        );
    }

    #[test]
    fn nul_bytes_mark_binary_bodies() {
        assert!(looks_binary("GIF89a\0\0"));
        assert!(!looks_binary("plain text"));
    }
}
