// src/lib.rs
// =============================================================================
// vocab-forge core.
//
// Typical use:
//
//   let mut store = VocabularyStore::new("vocabularies.json", log::default_sink());
//   store.load();
//   crawl::crawl(&mut store, "www.example.cn", 2, None, &CrawlerConfig::default()).await;
//   store.save();
//   let lines = generate::generate(store.pool(), &GenerationRequest::default())?;
//
// Modules:
// - store: categorized vocabulary pool and its JSON document
// - crawl: fetch, extract, tag, merge, follow one link
// - generate: pattern-driven random lines
// - log: injectable message sinks
// - error: VocabError
// =============================================================================

pub mod crawl;
pub mod error;
pub mod generate;
pub mod log;
pub mod store;

pub use self::crawl::{CrawlReport, Crawler, CrawlerConfig};
pub use self::error::{Result, VocabError};
pub use self::generate::{GenerationRequest, JoinMode};
pub use self::log::{LogSink, SharedSink};
pub use self::store::{Category, VocabularyPool, VocabularyStore};
