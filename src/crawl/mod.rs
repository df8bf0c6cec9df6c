// src/crawl/mod.rs
// =============================================================================
// This module harvests vocabulary from the web.
//
// Features:
// - Random walk: one random outgoing link per page, bounded by depth
// - Polite crawling with a random delay before every request
// - Rotating browser User-Agent, optional proxy
// - Part-of-speech tagging with jieba, filed into verb/adjective/noun
//
// Submodules:
// - fetch: HTTP side (PageFetcher trait, reqwest implementation)
// - page: visible text and link extraction from HTML
// - tagger: Tagger trait, jieba implementation, classification
// - walker: the Crawler that ties it all together
// =============================================================================

mod fetch;
mod page;
mod tagger;
mod walker;

pub use fetch::{normalize_url, HttpFetcher, PageFetcher, DEFAULT_USER_AGENTS};
pub use page::{extract_links, extract_visible_text};
pub use tagger::{classify, is_chinese_word, JiebaTagger, Tagger};
pub use walker::{CrawlReport, Crawler, CrawlerConfig};

use crate::store::VocabularyStore;

/// One-shot crawl against the real web
///
/// Builds an HTTP crawler (through `proxy` if given), walks from `url`, and
/// merges what it finds into `store`. Returns the number of new words; a
/// client that can't be built is logged and yields 0.
pub async fn crawl(
    store: &mut VocabularyStore,
    url: &str,
    max_depth: usize,
    proxy: Option<&str>,
    config: &CrawlerConfig,
) -> usize {
    let sink = store.sink();
    if max_depth == 0 {
        return 0;
    }

    match Crawler::new(config, proxy, sink.clone()) {
        Ok(mut crawler) => crawler.crawl(store, url, max_depth).await,
        Err(e) => {
            sink.log(&format!("Failed to set up HTTP client: {}", e));
            0
        }
    }
}
