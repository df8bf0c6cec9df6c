// src/generate/mod.rs
// =============================================================================
// This module turns the vocabulary pool into random lines of words.
//
// Submodules:
// - request: GenerationRequest and JoinMode
// - lines: the sampling itself
// =============================================================================

mod lines;
mod request;

pub use lines::{generate, generate_with_rng};
pub use request::{GenerationRequest, JoinMode};
