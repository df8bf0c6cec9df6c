// src/crawl/page.rs
// =============================================================================
// This module pulls the two things we need out of a fetched HTML page:
// - the visible text (what the tagger reads)
// - the outgoing links (one of which we may follow)
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Rust concepts:
// - Enums: scraper's Node tells us whether a node is text, an element, ...
// - Recursion: the text walk visits each element's children in order
// =============================================================================

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

// Elements whose text content never shows up on screen
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

// Elements a browser lays out on their own line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "option", "p", "pre", "section", "table", "td", "th", "title",
    "tr", "ul",
];

// Collects the text a reader would see, one line per block
//
// Inline markup is transparent: "<p>我们<b>喜</b>欢</p>" reads "我们喜欢",
// so the segmenter still sees the whole word. Block elements start a new
// line, so text from neighbouring paragraphs never gets glued together.
//
// Example:
//   html = "<p>你好</p><script>var x = 1;</script><p>世界</p>"
//   result = "你好\n世界\n"
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);

    let mut text = String::new();
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn collect_text(element: ElementRef, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_ELEMENTS.contains(&name) {
        return;
    }

    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(fragment) => out.push_str(fragment),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push('\n');
    }
}

// Extracts every followable link from a page
//
// Parameters:
//   html: the HTML content to parse
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: absolute http/https URLs, in document order
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return links,
    };

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    let document = Html::parse_document(html);
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(&base, href.trim()) {
                links.push(url);
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute http/https URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    // Same page with a different fragment is not a new page
    url.set_fragment(None);
    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does ElementRef::wrap do?
//    - children() yields plain tree nodes (text, comments, elements)
//    - wrap() gives back an ElementRef only when the node is an element,
//      which is what collect_text needs to recurse
//
// 2. Why not one newline per text node?
//    - Chinese has no spaces between words; "<b>喜</b>" inside "我们喜欢"
//      is still part of one word
//    - Only block elements (p, div, li, ...) end a line
//
// 3. What does base.join(href) do?
//    - Resolves href the way a browser would
//    - "https://example.com/a/b" + "../c" = "https://example.com/c"
//    - Absolute hrefs replace the base entirely
// -----------------------------------------------------------------------------
