// src/store/pool.rs
// =============================================================================
// The in-memory vocabulary pool.
//
// Three buckets of words, one per coarse part of speech. Each bucket is a
// BTreeSet, which gives us:
// - no duplicates inside a category (set semantics)
// - a stable, sorted order when the pool is written to disk
//
// A word may live in several buckets at once; the tagger decides.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Coarse part-of-speech bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Verb,
    Adjective,
    Noun,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Verb, Category::Adjective, Category::Noun];

    /// Classifies a tagger label by its first letter
    ///
    /// Examples (jieba tag set):
    ///   "v", "vn", "vd" -> Verb
    ///   "a", "ad", "an" -> Adjective
    ///   "n", "nr", "ns" -> Noun
    ///   "x", "m", "uj"  -> None
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.chars().next() {
            Some('v') => Some(Category::Verb),
            Some('a') => Some(Category::Adjective),
            Some('n') => Some(Category::Noun),
            _ => None,
        }
    }

    /// Maps one character of a pattern string to a category
    pub fn from_pattern_char(c: char) -> Option<Self> {
        match c {
            'v' | 'V' | '动' => Some(Category::Verb),
            'a' | 'A' | '形' => Some(Category::Adjective),
            'n' | 'N' | '名' => Some(Category::Noun),
            _ => None,
        }
    }

    /// Parses the key used in the persisted document
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "verb" => Some(Category::Verb),
            "adjective" => Some(Category::Adjective),
            "noun" => Some(Category::Noun),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Verb => "verb",
            Category::Adjective => "adjective",
            Category::Noun => "noun",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Words freshly harvested from one page, grouped by category
///
/// Duplicates are allowed here; the pool removes them on merge.
pub type Harvest = BTreeMap<Category, Vec<String>>;

/// The categorized word pool
///
/// Serializes as {"verb": [...], "adjective": [...], "noun": [...]}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyPool {
    #[serde(default)]
    verb: BTreeSet<String>,
    #[serde(default)]
    adjective: BTreeSet<String>,
    #[serde(default)]
    noun: BTreeSet<String>,
}

impl VocabularyPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn words(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Verb => &self.verb,
            Category::Adjective => &self.adjective,
            Category::Noun => &self.noun,
        }
    }

    fn words_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Verb => &mut self.verb,
            Category::Adjective => &mut self.adjective,
            Category::Noun => &mut self.noun,
        }
    }

    /// Adds one word; returns false if it was already in that category
    pub fn insert(&mut self, category: Category, word: impl Into<String>) -> bool {
        let word = word.into();
        if word.is_empty() {
            return false;
        }
        self.words_mut(category).insert(word)
    }

    /// Appends every harvested word to its category, dropping duplicates
    ///
    /// Returns how many words were actually new.
    pub fn merge(&mut self, harvest: &Harvest) -> usize {
        let mut added = 0;
        for (category, words) in harvest {
            for word in words {
                if self.insert(*category, word.as_str()) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Total number of entries across categories
    ///
    /// A word filed under two categories counts twice.
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.words(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-category sizes, in Category::ALL order
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.words(*c).len()))
            .collect()
    }

    /// Union of all categories, each word once
    pub fn combined(&self) -> BTreeSet<&str> {
        Category::ALL
            .iter()
            .flat_map(|c| self.words(*c).iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest(category: Category, words: &[&str]) -> Harvest {
        let mut h = Harvest::new();
        h.insert(category, words.iter().map(|w| w.to_string()).collect());
        h
    }

    #[test]
    fn test_from_tag_prefixes() {
        assert_eq!(Category::from_tag("vn"), Some(Category::Verb));
        assert_eq!(Category::from_tag("ad"), Some(Category::Adjective));
        assert_eq!(Category::from_tag("nr"), Some(Category::Noun));
        assert_eq!(Category::from_tag("x"), None);
        assert_eq!(Category::from_tag(""), None);
    }

    #[test]
    fn test_pattern_chars() {
        assert_eq!(Category::from_pattern_char('V'), Some(Category::Verb));
        assert_eq!(Category::from_pattern_char('形'), Some(Category::Adjective));
        assert_eq!(Category::from_pattern_char('n'), Some(Category::Noun));
        assert_eq!(Category::from_pattern_char('-'), None);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let h = harvest(Category::Noun, &["苹果", "香蕉", "苹果"]);
        let mut once = VocabularyPool::new();
        assert_eq!(once.merge(&h), 2);

        let mut twice = VocabularyPool::new();
        twice.merge(&h);
        assert_eq!(twice.merge(&h), 0);
        assert_eq!(twice.words(Category::Noun).len(), once.words(Category::Noun).len());
    }

    #[test]
    fn test_word_can_live_in_two_categories() {
        let mut pool = VocabularyPool::new();
        assert!(pool.insert(Category::Verb, "学习"));
        assert!(pool.insert(Category::Noun, "学习"));
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.combined().len(), 1);
    }

    #[test]
    fn test_empty_words_are_ignored() {
        let mut pool = VocabularyPool::new();
        assert!(!pool.insert(Category::Verb, ""));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_serialized_shape_has_all_categories() {
        let mut pool = VocabularyPool::new();
        pool.insert(Category::Noun, "香蕉");
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["verb"], serde_json::json!([]));
        assert_eq!(json["adjective"], serde_json::json!([]));
        assert_eq!(json["noun"], serde_json::json!(["香蕉"]));
    }
}
