// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Three subcommands:
// - crawl: harvest words from a website into the vocabulary file
// - generate: print random lines built from the vocabulary
// - stats: show how many words each category holds
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use vocab_forge::{CrawlerConfig, GenerationRequest, JoinMode};

#[derive(Parser, Debug)]
#[command(
    name = "vocab-forge",
    version,
    about = "Harvest Chinese vocabulary from the web and compose random word lines",
    long_about = "vocab-forge crawls web pages, tags the Chinese words it finds as verbs, \
                  adjectives or nouns, keeps them in a JSON vocabulary file, and composes \
                  random lines from them following a pattern such as 'van'."
)]
pub struct Cli {
    /// Vocabulary file to load and save
    #[arg(long, global = true, env = "VOCAB_FILE", default_value = vocab_forge::store::DEFAULT_FILE)]
    pub file: PathBuf,

    /// Don't print progress messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and add its words to the vocabulary
    ///
    /// Example: vocab-forge crawl www.sina.com.cn --depth 3
    Crawl {
        /// Starting URL; https:// is assumed when no scheme is given
        url: String,

        /// How many pages to visit (1 = only the starting page)
        #[arg(long, short, default_value_t = 1)]
        depth: usize,

        /// Proxy as host:port
        #[arg(long)]
        proxy: Option<String>,

        /// Shortest pause before each request, in milliseconds
        #[arg(long, default_value_t = 1000)]
        min_delay_ms: u64,

        /// Longest pause before each request, in milliseconds
        #[arg(long, default_value_t = 3000)]
        max_delay_ms: u64,

        /// Per-request timeout, in seconds
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },

    /// Print random lines of words
    ///
    /// Example: vocab-forge generate --pattern van --lines 10
    Generate {
        /// Category per position: v = verb, a = adjective, n = noun
        /// (动/形/名 work too); leave out to draw from all words
        #[arg(long, short, default_value = "")]
        pattern: String,

        /// Number of lines
        #[arg(long, short, default_value_t = 5)]
        lines: usize,

        /// Words per line (the maximum when --min-words is given)
        #[arg(long, short, default_value_t = 3)]
        words: usize,

        /// Without a pattern, pick each line's length at random
        /// between this and --words
        #[arg(long)]
        min_words: Option<usize>,

        /// Separate words with spaces
        #[arg(long)]
        space: bool,

        /// Use one random character of each word
        #[arg(long)]
        single_char: bool,

        /// Extra word inserted at a random position in every line
        #[arg(long)]
        insert: Option<String>,

        /// Output a JSON array instead of one line per row
        #[arg(long)]
        json: bool,
    },

    /// Show per-category word counts
    Stats,
}

/// Crawler settings from the crawl subcommand's flags
pub fn crawler_config(min_delay_ms: u64, max_delay_ms: u64, timeout_secs: u64) -> CrawlerConfig {
    CrawlerConfig {
        timeout: Duration::from_secs(timeout_secs),
        min_delay: Duration::from_millis(min_delay_ms),
        max_delay: Duration::from_millis(max_delay_ms),
        ..CrawlerConfig::default()
    }
}

/// Generation parameters from the generate subcommand's flags
pub fn generation_request(
    pattern: String,
    lines: usize,
    words: usize,
    min_words: Option<usize>,
    space: bool,
    single_char: bool,
    insert: Option<String>,
) -> GenerationRequest {
    GenerationRequest {
        pattern,
        line_count: lines,
        words_per_line: words,
        min_words_per_line: min_words,
        join: if space { JoinMode::Space } else { JoinMode::Concatenate },
        single_char,
        insert_word: insert,
    }
}
