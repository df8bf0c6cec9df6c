// src/error.rs
// =============================================================================
// Error types for the vocabulary core.
//
// Most of these never reach the caller: store and crawler catch them where
// they happen, log them, and carry on with an empty/zero result. The one
// that does surface is InsufficientVocabulary, which the generator returns
// so the front-end can show it as a message.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabError {
    /// Reading or writing the vocabulary document failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The vocabulary document is not valid JSON in either known shape
    #[error("could not parse vocabulary document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request could not be sent or the body could not be read
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("request failed with HTTP {0}")]
    Status(u16),

    /// The part-of-speech tagger failed on the page text
    #[error("tagging failed: {0}")]
    Tagging(String),

    /// More distinct words were requested than the pool holds
    #[error("insufficient vocabulary: requested {requested} words but only {available} available")]
    InsufficientVocabulary { requested: usize, available: usize },
}

impl From<reqwest::Error> for VocabError {
    fn from(error: reqwest::Error) -> Self {
        VocabError::Network(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VocabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_vocabulary_message() {
        let err = VocabError::InsufficientVocabulary { requested: 5, available: 2 };
        assert_eq!(
            err.to_string(),
            "insufficient vocabulary: requested 5 words but only 2 available"
        );
    }

    #[test]
    fn test_status_message() {
        assert_eq!(VocabError::Status(404).to_string(), "request failed with HTTP 404");
    }
}
