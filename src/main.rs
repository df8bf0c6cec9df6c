// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, to stderr so stdout only carries results)
// 2. Parse command-line arguments using clap
// 3. Load the vocabulary file and dispatch to the subcommand
// 4. Exit with proper code (0 = success, 1 = not enough words, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vocab_forge::log::{self, NullSink, SharedSink};
use vocab_forge::{crawl, generate, VocabError, VocabularyStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocab_forge=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let sink: SharedSink = if cli.quiet {
        Arc::new(NullSink)
    } else {
        log::default_sink()
    };

    let mut store = VocabularyStore::new(cli.file, sink);
    store.load();

    match cli.command {
        Commands::Crawl {
            url,
            depth,
            proxy,
            min_delay_ms,
            max_delay_ms,
            timeout_secs,
        } => {
            let config = cli::crawler_config(min_delay_ms, max_delay_ms, timeout_secs);
            handle_crawl(&mut store, &url, depth, proxy.as_deref(), &config).await
        }
        Commands::Generate {
            pattern,
            lines,
            words,
            min_words,
            space,
            single_char,
            insert,
            json,
        } => {
            let request =
                cli::generation_request(pattern, lines, words, min_words, space, single_char, insert);
            handle_generate(&store, &request, json)
        }
        Commands::Stats => {
            print_stats(&store);
            Ok(0)
        }
    }
}

// Crawls, saves, and reports how many new words arrived
async fn handle_crawl(
    store: &mut VocabularyStore,
    url: &str,
    depth: usize,
    proxy: Option<&str>,
    config: &vocab_forge::CrawlerConfig,
) -> Result<i32> {
    let added = crawl::crawl(store, url, depth, proxy, config).await;
    store.save();
    println!("Added {} new word(s); vocabulary now holds {}", added, store.len());
    Ok(0)
}

fn handle_generate(
    store: &VocabularyStore,
    request: &vocab_forge::GenerationRequest,
    json: bool,
) -> Result<i32> {
    match generate::generate(store.pool(), request) {
        Ok(lines) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            } else {
                for line in lines {
                    println!("{}", line);
                }
            }
            Ok(0)
        }
        Err(e @ VocabError::InsufficientVocabulary { .. }) => {
            eprintln!("{}. Crawl some pages first.", e);
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_stats(store: &VocabularyStore) {
    println!("{:<12} {:>8}", "CATEGORY", "WORDS");
    println!("{}", "=".repeat(21));
    for (category, count) in store.pool().counts() {
        println!("{:<12} {:>8}", category, count);
    }
    println!("{:<12} {:>8}", "total", store.len());
}
