// src/store/mod.rs
// =============================================================================
// This module holds the categorized vocabulary and its on-disk document.
//
// Submodules:
// - pool: Category enum and the in-memory word sets
// - document: the JSON shapes we read and write (including the legacy list)
// - disk: VocabularyStore, which ties a pool to a file and a log sink
// =============================================================================

mod disk;
mod document;
mod pool;

pub use disk::{VocabularyStore, DEFAULT_FILE};
pub use pool::{Category, Harvest, VocabularyPool};
