// src/store/disk.rs
// =============================================================================
// VocabularyStore: the pool plus the file it lives in.
//
// load() and save() never fail loudly. The vocabulary is a best-effort cache,
// so a missing or broken file just means we start from an empty pool, and a
// failed save is reported through the log sink and otherwise ignored.
// try_load() / try_save() expose the underlying Result for callers that care.
// =============================================================================

use crate::error::{Result, VocabError};
use crate::log::SharedSink;
use crate::store::document;
use crate::store::pool::{Harvest, VocabularyPool};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name used when the caller does not choose one
pub const DEFAULT_FILE: &str = "vocabularies.json";

pub struct VocabularyStore {
    path: PathBuf,
    pool: VocabularyPool,
    sink: SharedSink,
}

impl VocabularyStore {
    /// Creates a store with an empty pool bound to `path`
    ///
    /// Nothing is read until load() is called.
    pub fn new(path: impl Into<PathBuf>, sink: SharedSink) -> Self {
        Self {
            path: path.into(),
            pool: VocabularyPool::new(),
            sink,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The sink this store logs to, for collaborators that should log alongside it
    pub fn sink(&self) -> SharedSink {
        self.sink.clone()
    }

    pub fn pool(&self) -> &VocabularyPool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Loads the document into the pool, falling back to an empty pool
    ///
    /// Returns the number of entries loaded.
    pub fn load(&mut self) -> usize {
        if !self.path.exists() {
            self.pool = VocabularyPool::new();
            self.sink.log(&format!(
                "{} does not exist, starting with an empty vocabulary",
                self.path.display()
            ));
            return 0;
        }

        match self.try_load() {
            Ok(count) => {
                self.sink.log(&format!(
                    "Loaded {} words from {}",
                    count,
                    self.path.display()
                ));
                count
            }
            Err(e) => {
                self.pool = VocabularyPool::new();
                self.sink.log(&format!("Failed to load vocabulary: {}", e));
                0
            }
        }
    }

    pub fn try_load(&mut self) -> Result<usize> {
        let text = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        let decoded = document::decode(&text)?;

        if decoded.legacy {
            self.sink.log(&format!(
                "{} uses the old flat list format; imported {} words as nouns",
                self.path.display(),
                decoded.pool.len()
            ));
        }
        for key in &decoded.ignored_keys {
            self.sink.log(&format!("Ignoring unknown category '{}'", key));
        }

        self.pool = decoded.pool;
        Ok(self.pool.len())
    }

    /// Writes the whole pool to disk; returns false (after logging) on failure
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => {
                self.sink.log(&format!(
                    "Saved {} words to {}",
                    self.pool.len(),
                    self.path.display()
                ));
                true
            }
            Err(e) => {
                self.sink.log(&format!("Failed to save vocabulary: {}", e));
                false
            }
        }
    }

    /// Writes to a temp file next to the target, then persists it over the target
    pub fn try_save(&self) -> Result<()> {
        let text = document::encode(&self.pool)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(|source| self.io_error(source))?;
        temp_file
            .write_all(text.as_bytes())
            .map_err(|source| self.io_error(source))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    /// Merges harvested words into the pool; returns how many were new
    pub fn merge(&mut self, harvest: &Harvest) -> usize {
        self.pool.merge(harvest)
    }

    fn io_error(&self, source: std::io::Error) -> VocabError {
        VocabError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
