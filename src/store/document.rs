// src/store/document.rs
// =============================================================================
// Decoding and encoding of the persisted vocabulary document.
//
// Two shapes exist on disk:
//
//   categorized (current):
//     { "verb": ["吃"], "adjective": ["美丽"], "noun": ["苹果"] }
//
//   legacy (flat list written by the first version of the tool):
//     ["吃", "美丽", "苹果"]
//
// Legacy words carry no part of speech, so they are imported as nouns.
// The next save rewrites the file in the categorized shape.
// =============================================================================

use crate::error::Result;
use crate::store::pool::{Category, VocabularyPool};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Categorized(BTreeMap<String, Vec<String>>),
    Legacy(Vec<String>),
}

/// What came out of a document besides the pool itself
#[derive(Debug)]
pub struct Decoded {
    pub pool: VocabularyPool,
    /// The file used the old flat-list shape
    pub legacy: bool,
    /// Top-level keys that are not a known category
    pub ignored_keys: Vec<String>,
}

pub fn decode(text: &str) -> Result<Decoded> {
    let document: StoredDocument = serde_json::from_str(text)?;
    let mut pool = VocabularyPool::new();
    let mut ignored_keys = Vec::new();

    let legacy = match document {
        StoredDocument::Categorized(map) => {
            for (key, words) in map {
                match Category::from_name(&key) {
                    Some(category) => {
                        for word in words {
                            pool.insert(category, word);
                        }
                    }
                    None => ignored_keys.push(key),
                }
            }
            false
        }
        StoredDocument::Legacy(words) => {
            for word in words {
                pool.insert(Category::Noun, word);
            }
            true
        }
    };

    Ok(Decoded { pool, legacy, ignored_keys })
}

/// Pretty JSON; serde_json keeps non-ASCII characters literal
pub fn encode(pool: &VocabularyPool) -> Result<String> {
    Ok(serde_json::to_string_pretty(pool)?)
}
