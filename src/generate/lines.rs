// src/generate/lines.rs
// =============================================================================
// This module composes random lines of words from the vocabulary pool.
//
// Two modes:
// - pattern: each pattern position names a category ("van" = verb,
//   adjective, noun) and one word is drawn from that category. A category
//   with no words is skipped, so the line just comes out shorter.
// - free (empty pattern): words are drawn from all categories together,
//   without repeats inside a line. Each line's length is words_per_line, or
//   a random draw from min_words_per_line..=words_per_line when a minimum is
//   set. Drawing more words than exist is an InsufficientVocabulary error.
//
// Afterwards each line may be reduced to one character per word, joined
// with or without spaces, and get an extra word inserted at a random spot.
// =============================================================================

use crate::error::{Result, VocabError};
use crate::generate::request::{GenerationRequest, JoinMode};
use crate::store::{Category, VocabularyPool};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Generates `request.line_count` lines using the thread-local RNG
pub fn generate(pool: &VocabularyPool, request: &GenerationRequest) -> Result<Vec<String>> {
    generate_with_rng(pool, request, &mut rand::thread_rng())
}

/// Same as generate(), with the caller's RNG
pub fn generate_with_rng<R: Rng + ?Sized>(
    pool: &VocabularyPool,
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<Vec<String>> {
    let lines = if request.pattern.trim().is_empty() {
        free_lines(pool, request, rng)?
    } else {
        pattern_lines(pool, request, rng)
    };

    let separator = request.join.separator();
    let mut output = Vec::with_capacity(lines.len());

    for words in lines {
        let words: Vec<String> = if request.single_char {
            words.iter().map(|w| pick_char(w, &mut *rng)).collect()
        } else {
            words.iter().map(|w| w.to_string()).collect()
        };

        let mut line = words.join(separator);
        if let Some(extra) = request.insert_word() {
            if !line.is_empty() {
                line = insert_at_random(&line, extra, request.join, rng);
            }
        }
        output.push(line);
    }

    Ok(output)
}

fn pattern_lines<'p, R: Rng + ?Sized>(
    pool: &'p VocabularyPool,
    request: &GenerationRequest,
    rng: &mut R,
) -> Vec<Vec<&'p str>> {
    let categories = request.categories();
    let choices: BTreeMap<Category, Vec<&str>> = Category::ALL
        .iter()
        .map(|c| (*c, pool.words(*c).iter().map(String::as_str).collect()))
        .collect();

    (0..request.line_count)
        .map(|_| {
            categories
                .iter()
                .take(request.words_per_line)
                .filter_map(|c| choices.get(c).and_then(|words| words.choose(&mut *rng)).copied())
                .collect()
        })
        .collect()
}

fn free_lines<'p, R: Rng + ?Sized>(
    pool: &'p VocabularyPool,
    request: &GenerationRequest,
    rng: &mut R,
) -> Result<Vec<Vec<&'p str>>> {
    let combined: Vec<&str> = pool.combined().into_iter().collect();
    let (min, max) = request.word_count_range();

    // Draw every length up front so a too-large draw fails before any line exists
    let counts: Vec<usize> = (0..request.line_count)
        .map(|_| rng.gen_range(min..=max))
        .collect();
    let requested = counts.iter().copied().max().unwrap_or(min);
    if requested > combined.len() {
        return Err(VocabError::InsufficientVocabulary {
            requested,
            available: combined.len(),
        });
    }

    Ok(counts
        .into_iter()
        .map(|count| combined.choose_multiple(&mut *rng, count).copied().collect())
        .collect())
}

// One uniformly random character of `word`
fn pick_char<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let chars: Vec<char> = word.chars().collect();
    chars.choose(rng).map(|c| c.to_string()).unwrap_or_default()
}

// Splits `line` back into units, inserts `extra` at a position in 0..=len,
// and joins again
//
// Units are space-separated words in Space mode and single characters
// otherwise, so "AB" + "X" gives one of "XAB", "AXB", "ABX".
fn insert_at_random<R: Rng + ?Sized>(line: &str, extra: &str, join: JoinMode, rng: &mut R) -> String {
    let mut units: Vec<String> = match join {
        JoinMode::Space => line.split(' ').map(String::from).collect(),
        JoinMode::Concatenate => line.chars().map(String::from).collect(),
    };
    let position = rng.gen_range(0..=units.len());
    units.insert(position, extra.to_string());
    units.join(join.separator())
}
