// src/generate/request.rs
// =============================================================================
// The parameters of one generation run.
// =============================================================================

use crate::store::Category;

/// How the words of a line are put together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinMode {
    /// "吃苹果"
    #[default]
    Concatenate,
    /// "吃 苹果"
    Space,
}

impl JoinMode {
    pub fn separator(&self) -> &'static str {
        match self {
            JoinMode::Concatenate => "",
            JoinMode::Space => " ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Category per position, e.g. "van"; empty = free sampling
    pub pattern: String,
    pub line_count: usize,
    /// Upper bound on words per line (the exact count in pattern mode)
    pub words_per_line: usize,
    /// Free mode only: draw each line's length from min..=words_per_line
    pub min_words_per_line: Option<usize>,
    pub join: JoinMode,
    /// Replace every chosen word with one of its characters
    pub single_char: bool,
    /// Word dropped at a random position of every non-empty line
    pub insert_word: Option<String>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            line_count: 5,
            words_per_line: 3,
            min_words_per_line: None,
            join: JoinMode::Concatenate,
            single_char: false,
            insert_word: None,
        }
    }
}

impl GenerationRequest {
    /// Recognized categories of the pattern, unrecognized characters dropped
    pub fn categories(&self) -> Vec<Category> {
        self.pattern
            .chars()
            .filter_map(Category::from_pattern_char)
            .collect()
    }

    /// Inclusive range of free-mode line lengths
    ///
    /// A minimum above words_per_line is clamped down to it.
    pub fn word_count_range(&self) -> (usize, usize) {
        let max = self.words_per_line;
        let min = self.min_words_per_line.map_or(max, |min| min.min(max));
        (min, max)
    }

    /// The insertion word, if one was given and it isn't blank
    pub fn insert_word(&self) -> Option<&str> {
        self.insert_word
            .as_deref()
            .map(str::trim)
            .filter(|w| !w.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_drop_unknown_chars() {
        let request = GenerationRequest {
            pattern: "v-a?n名".to_string(),
            ..GenerationRequest::default()
        };
        assert_eq!(
            request.categories(),
            vec![Category::Verb, Category::Adjective, Category::Noun, Category::Noun]
        );
    }

    #[test]
    fn test_word_count_range() {
        let mut request = GenerationRequest { words_per_line: 6, ..GenerationRequest::default() };
        assert_eq!(request.word_count_range(), (6, 6));
        request.min_words_per_line = Some(3);
        assert_eq!(request.word_count_range(), (3, 6));
        request.min_words_per_line = Some(9);
        assert_eq!(request.word_count_range(), (6, 6));
    }

    #[test]
    fn test_blank_insert_word_is_none() {
        let mut request = GenerationRequest::default();
        assert_eq!(request.insert_word(), None);
        request.insert_word = Some("  ".to_string());
        assert_eq!(request.insert_word(), None);
        request.insert_word = Some("的".to_string());
        assert_eq!(request.insert_word(), Some("的"));
    }
}
