// src/crawl/tagger.rs
// =============================================================================
// Part-of-speech tagging and classification.
//
// The tagger splits Chinese text into words and labels each one with a
// jieba-style tag ("n", "v", "a", "vn", "nr", "x", ...). classify() keeps
// the words whose tag starts with v / a / n and files them under the
// matching category. A word tagged more than once may land in several
// categories.
// =============================================================================

use crate::error::{Result, VocabError};
use crate::store::{Category, Harvest};
use jieba_rs::Jieba;
use std::panic::{self, AssertUnwindSafe};

/// Splits text into (word, tag) pairs
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<(String, String)>>;
}

/// jieba-rs with its bundled dictionary
pub struct JiebaTagger {
    jieba: Jieba,
}

impl JiebaTagger {
    /// Loads the default dictionary (takes a moment, so build it once)
    pub fn new() -> Self {
        Self { jieba: Jieba::new() }
    }
}

impl Default for JiebaTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger for JiebaTagger {
    fn tag(&self, text: &str) -> Result<Vec<(String, String)>> {
        // jieba indexes into the text by byte offsets; a panic on odd input
        // must not take the whole crawl down with it
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.jieba
                .tag(text, true)
                .into_iter()
                .map(|t| (t.word.to_string(), t.tag.to_string()))
                .collect()
        }))
        .map_err(|_| VocabError::Tagging("jieba panicked while tagging page text".to_string()))
    }
}

/// True if every character is a CJK unified ideograph (U+4E00..=U+9FA5)
pub fn is_chinese_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| ('\u{4e00}'..='\u{9fa5}').contains(&c))
}

/// Tags `text` and groups the verb/adjective/noun words by category
///
/// Words outside the three categories and words containing anything but
/// Chinese characters are dropped.
pub fn classify(tagger: &dyn Tagger, text: &str) -> Result<Harvest> {
    let mut harvest = Harvest::new();

    for (word, tag) in tagger.tag(text)? {
        let Some(category) = Category::from_tag(&tag) else {
            continue;
        };
        if is_chinese_word(&word) {
            harvest.entry(category).or_default().push(word);
        }
    }

    Ok(harvest)
}
