// src/crawl/walker.rs
// =============================================================================
// This module implements the vocabulary crawl.
//
// How it works:
// 1. Start at the given URL with depth 1
// 2. Wait a random polite delay, then fetch the page
// 3. Extract the visible text, tag it, merge the words into the store
// 4. If we're still below max depth, pick ONE outgoing link at random
// 5. Repeat with depth + 1 until max depth or a dead end
//
// Unlike a breadth-first crawler there's no queue and no visited set: each
// page hands over to exactly one successor, so a crawl is a single random
// walk of at most max_depth pages.
//
// Failures never abort the crawl result. A page that can't be fetched ends
// the walk (there's no link to follow), a page that can't be tagged
// contributes nothing but the walk continues. Words from earlier pages are
// already in the store either way.
//
// Text extraction and tagging are CPU-bound (jieba segments the whole page),
// so they run on tokio's blocking pool; only the merge happens on the task.
// =============================================================================

use crate::crawl::fetch::{normalize_url, HttpFetcher, PageFetcher, DEFAULT_USER_AGENTS};
use crate::crawl::page::{extract_links, extract_visible_text};
use crate::crawl::tagger::{classify, JiebaTagger, Tagger};
use crate::error::{Result, VocabError};
use crate::log::SharedSink;
use crate::store::VocabularyStore;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

/// Tunables for a crawl
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Shortest pause before each request
    pub min_delay: Duration,
    /// Longest pause before each request
    pub max_delay: Duration,
    /// Client signatures to rotate through
    pub user_agents: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// What one crawl did, across every depth level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Words that were new to the store
    pub words_added: usize,
    /// Pages fetched with a success status
    pub pages_fetched: usize,
    /// Pages that failed to fetch or tag
    pub failures: usize,
}

pub struct Crawler<F = HttpFetcher, T = JiebaTagger> {
    fetcher: F,
    tagger: Arc<T>,
    min_delay: Duration,
    max_delay: Duration,
    sink: SharedSink,
    rng: StdRng,
}

impl Crawler<HttpFetcher, JiebaTagger> {
    /// A crawler for the real web, optionally through a proxy ("host:port")
    pub fn new(config: &CrawlerConfig, proxy: Option<&str>, sink: SharedSink) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout, &config.user_agents, proxy)?;
        Ok(Self::with_parts(fetcher, JiebaTagger::new(), config, sink))
    }
}

impl<F: PageFetcher, T: Tagger + 'static> Crawler<F, T> {
    /// Assembles a crawler from explicit collaborators
    pub fn with_parts(fetcher: F, tagger: T, config: &CrawlerConfig, sink: SharedSink) -> Self {
        Self {
            fetcher,
            tagger: Arc::new(tagger),
            min_delay: config.min_delay,
            max_delay: config.max_delay,
            sink,
            rng: StdRng::from_entropy(),
        }
    }

    /// Makes link choice and delays reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Crawls from `url` and returns the number of words added to `store`
    ///
    /// max_depth counts pages: 0 = no request at all, 1 = just this page,
    /// 2 = this page and one linked page, and so on.
    pub async fn crawl(&mut self, store: &mut VocabularyStore, url: &str, max_depth: usize) -> usize {
        self.crawl_with_report(store, url, max_depth).await.words_added
    }

    pub async fn crawl_with_report(
        &mut self,
        store: &mut VocabularyStore,
        url: &str,
        max_depth: usize,
    ) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut next = Some(normalize_url(url));
        let mut depth = 1;

        while let Some(current) = next.take() {
            if depth > max_depth {
                break;
            }

            self.pause().await;
            self.sink.log(&format!("Crawling [depth {}]: {}", depth, current));

            let html = match self.fetcher.fetch(&current).await {
                Ok(html) => html,
                Err(e) => {
                    self.sink.log(&format!("Failed to fetch {}: {}", current, e));
                    report.failures += 1;
                    break;
                }
            };
            report.pages_fetched += 1;

            match self.harvest_page(store, &html).await {
                Ok((found, added)) => {
                    report.words_added += added;
                    self.sink.log(&format!(
                        "Found {} words on {} ({} new)",
                        found, current, added
                    ));
                }
                Err(e) => {
                    report.failures += 1;
                    self.sink.log(&format!("Failed to extract words from {}: {}", current, e));
                }
            }

            if depth < max_depth {
                next = self.pick_link(&html, &current);
                if next.is_none() {
                    self.sink.log(&format!("No outgoing links on {}, stopping", current));
                }
            }
            depth += 1;
        }

        self.sink.log(&format!(
            "Crawl finished: {} new words from {} page(s)",
            report.words_added, report.pages_fetched
        ));
        report
    }

    // Returns (words found on the page, words new to the store)
    async fn harvest_page(&self, store: &mut VocabularyStore, html: &str) -> Result<(usize, usize)> {
        let tagger = Arc::clone(&self.tagger);
        let html = html.to_string();
        let harvest = tokio::task::spawn_blocking(move || {
            let text = extract_visible_text(&html);
            classify(tagger.as_ref(), &text)
        })
        .await
        .map_err(|e| VocabError::Tagging(format!("tagging task failed: {}", e)))??;

        let found = harvest.values().map(Vec::len).sum();
        let added = store.merge(&harvest);
        Ok((found, added))
    }

    fn pick_link(&mut self, html: &str, page_url: &str) -> Option<String> {
        let links = extract_links(html, page_url);
        links.choose(&mut self.rng).cloned()
    }

    async fn pause(&mut self) {
        let (low, high) = if self.min_delay <= self.max_delay {
            (self.min_delay, self.max_delay)
        } else {
            (self.max_delay, self.min_delay)
        };
        if high.is_zero() {
            return;
        }
        let millis = self.rng.gen_range(low.as_millis()..=high.as_millis()) as u64;
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a loop instead of recursion?
//    - Each page leads to at most one next page, so the "recursion" is a
//      straight line; `next` carries the URL and `depth` the level
//    - async fns can't call themselves without boxing the future
//
// 2. What are the `F = HttpFetcher, T = JiebaTagger` defaults?
//    - Default type parameters: `Crawler` alone means the real-web crawler
//    - Tests write Crawler<FakeFetcher, FakeTagger> instead
//
// 3. Why StdRng rather than thread_rng()?
//    - StdRng can be seeded, which makes tests repeatable
//    - It is also Send, so the crawler can move between threads
//
// 4. Why is the tagger behind an Arc?
//    - spawn_blocking needs a 'static closure, so it can't borrow self
//    - Cloning the Arc hands the blocking thread its own handle
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemorySink;
    use crate::store::Category;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};
    use tempfile::TempDir;

    // Serves canned pages and records every URL it was asked for
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or(VocabError::Status(404))
        }
    }

    // Treats each whitespace-separated token "word/tag" as one tagged word
    struct SlashTagger;

    impl Tagger for SlashTagger {
        fn tag(&self, text: &str) -> Result<Vec<(String, String)>> {
            Ok(text
                .split_whitespace()
                .filter_map(|token| token.split_once('/'))
                .map(|(w, t)| (w.to_string(), t.to_string()))
                .collect())
        }
    }

    struct FailingTagger;

    impl Tagger for FailingTagger {
        fn tag(&self, _text: &str) -> Result<Vec<(String, String)>> {
            Err(VocabError::Tagging("no dictionary".to_string()))
        }
    }

    // Records which thread did the tagging
    #[derive(Default)]
    struct ThreadTagger {
        thread: Mutex<Option<ThreadId>>,
    }

    impl Tagger for ThreadTagger {
        fn tag(&self, _text: &str) -> Result<Vec<(String, String)>> {
            *self.thread.lock().unwrap() = Some(thread::current().id());
            Ok(vec![("吃".to_string(), "v".to_string())])
        }
    }

    struct PanickingTagger;

    impl Tagger for PanickingTagger {
        fn tag(&self, _text: &str) -> Result<Vec<(String, String)>> {
            panic!("dictionary corrupted")
        }
    }

    fn no_delay() -> CrawlerConfig {
        CrawlerConfig {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..CrawlerConfig::default()
        }
    }

    fn empty_store(dir: &TempDir) -> VocabularyStore {
        VocabularyStore::new(dir.path().join("vocab.json"), Arc::new(MemorySink::new()))
    }

    #[tokio::test]
    async fn test_depth_zero_makes_no_request() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default().page("https://a.test/", "<p>吃/v</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        assert_eq!(crawler.crawl(&mut store, "https://a.test/", 0).await, 0);
        assert!(crawler.fetcher.requests().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_single_page_classifies_words() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default().page(
            "https://a.test/",
            "<p>吃/v 美丽/a 苹果/n 的/uj hello/n</p><script>跑/v</script>",
        );
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        let added = crawler.crawl(&mut store, "https://a.test/", 1).await;
        assert_eq!(added, 3);
        assert!(store.pool().words(Category::Verb).contains("吃"));
        assert!(store.pool().words(Category::Adjective).contains("美丽"));
        assert!(store.pool().words(Category::Noun).contains("苹果"));
        assert!(!store.pool().words(Category::Verb).contains("跑"));
    }

    #[tokio::test]
    async fn test_follows_one_link_per_level() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default()
            .page("https://a.test/", r#"<p>吃/v</p><a href="/b">b</a>"#)
            .page("https://a.test/b", r#"<p>苹果/n</p><a href="https://a.test/c">c</a>"#)
            .page("https://a.test/c", "<p>美丽/a</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        let report = crawler.crawl_with_report(&mut store, "https://a.test/", 3).await;
        assert_eq!(report.words_added, 3);
        assert_eq!(report.pages_fetched, 3);
        assert_eq!(
            crawler.fetcher.requests(),
            vec!["https://a.test/", "https://a.test/b", "https://a.test/c"]
        );
    }

    #[tokio::test]
    async fn test_depth_limits_pages() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default()
            .page("https://a.test/", r#"<p>吃/v</p><a href="/b">b</a>"#)
            .page("https://a.test/b", "<p>苹果/n</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        assert_eq!(crawler.crawl(&mut store, "https://a.test/", 1).await, 1);
        assert_eq!(crawler.fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_child_keeps_parent_words() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default()
            .page("https://a.test/", r#"<p>吃/v 喝/v</p><a href="/missing">x</a>"#);
        let sink = Arc::new(MemorySink::new());
        let mut crawler = Crawler::with_parts(fetcher, SlashTagger, &no_delay(), sink.clone());

        let report = crawler.crawl_with_report(&mut store, "https://a.test/", 5).await;
        assert_eq!(report.words_added, 2);
        assert_eq!(report.failures, 1);
        assert!(sink.contains("HTTP 404"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_tagging_failure_counts_zero_but_walk_continues() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default()
            .page("https://a.test/", r#"<a href="/b">b</a>"#)
            .page("https://a.test/b", "<p>page b</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, FailingTagger, &no_delay(), Arc::new(MemorySink::new()));

        let report = crawler.crawl_with_report(&mut store, "https://a.test/", 2).await;
        assert_eq!(report.words_added, 0);
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.failures, 2);
    }

    #[tokio::test]
    async fn test_tagging_runs_off_the_async_thread() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default().page("https://a.test/", "<p>吃饭</p>");
        let mut crawler = Crawler::with_parts(
            fetcher,
            ThreadTagger::default(),
            &no_delay(),
            Arc::new(MemorySink::new()),
        );

        assert_eq!(crawler.crawl(&mut store, "https://a.test/", 1).await, 1);
        let tagged_on = crawler.tagger.thread.lock().unwrap().expect("tagger was called");
        assert_ne!(tagged_on, thread::current().id());
    }

    #[tokio::test]
    async fn test_tagger_panic_counts_as_failed_page() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default()
            .page("https://a.test/", r#"<a href="/b">b</a>"#)
            .page("https://a.test/b", "<p>page b</p>");
        let sink = Arc::new(MemorySink::new());
        let mut crawler = Crawler::with_parts(fetcher, PanickingTagger, &no_delay(), sink.clone());

        let report = crawler.crawl_with_report(&mut store, "https://a.test/", 2).await;
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.failures, 2);
        assert!(sink.contains("tagging task failed"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_scheme_defaults_to_https() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default().page("https://a.test/", "<p>吃/v</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        crawler.crawl(&mut store, "a.test/", 1).await;
        assert_eq!(crawler.fetcher.requests(), vec!["https://a.test/"]);
    }

    #[tokio::test]
    async fn test_dedup_against_loaded_pool() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let fetcher = FakeFetcher::default().page("https://a.test/", "<p>吃/v 吃/v 苹果/n</p>");
        let mut crawler =
            Crawler::with_parts(fetcher, SlashTagger, &no_delay(), Arc::new(MemorySink::new()));

        assert_eq!(crawler.crawl(&mut store, "https://a.test/", 1).await, 2);
        assert_eq!(crawler.crawl(&mut store, "https://a.test/", 1).await, 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stays_within_range() {
        let config = CrawlerConfig {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            ..CrawlerConfig::default()
        };
        let mut crawler = Crawler::with_parts(
            FakeFetcher::default(),
            SlashTagger,
            &config,
            Arc::new(MemorySink::new()),
        )
        .with_seed(7);

        let start = tokio::time::Instant::now();
        crawler.pause().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(1000));
        assert!(waited <= Duration::from_millis(3100));
    }
}
