// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages.
//
// Every request goes out with a browser-like identity picked at random from
// a small pool of User-Agent strings, plus the Accept / Accept-Language /
// Referer headers a real browser would send. Some sites serve an empty page
// (or a block page) to clients that look like scripts.
//
// The PageFetcher trait is the seam between the crawler and the network:
// HttpFetcher talks to the real web, tests plug in a map of canned pages.
// =============================================================================

use crate::error::{Result, VocabError};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Client signatures we rotate through
pub const DEFAULT_USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0.3 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.0 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 10; SM-G975F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.120 Mobile Safari/537.36",
];

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_CHINESE: &str = "zh-CN,zh;q=0.9,en;q=0.8";

/// Anything that can turn a URL into an HTML body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP(S) with reqwest
pub struct HttpFetcher {
    client: Client,
    user_agents: Vec<String>,
}

impl HttpFetcher {
    /// Builds the HTTP client
    ///
    /// Parameters:
    ///   timeout: per-request timeout
    ///   user_agents: pool to pick from (falls back to DEFAULT_USER_AGENTS if empty)
    ///   proxy: optional "host:port" or full proxy URL, used for all schemes
    pub fn new(timeout: Duration, user_agents: &[String], proxy: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(proxy) = proxy {
            builder = builder.proxy(Proxy::all(proxy_url(proxy))?);
        }

        let user_agents = if user_agents.is_empty() {
            DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect()
        } else {
            user_agents.to_vec()
        };

        Ok(Self {
            client: builder.build()?,
            user_agents,
        })
    }

    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_USER_AGENTS[0])
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let user_agent = self.pick_user_agent().to_string();

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, ACCEPT_CHINESE)
            .header(REFERER, url)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VocabError::Status(response.status().as_u16()));
        }

        // Decode as UTF-8 regardless of the declared charset; bad bytes
        // become U+FFFD and are filtered out by the tagger step
        let body = response.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Adds https:// when the user typed a bare host like "www.sina.com.cn"
pub fn normalize_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Turns "host:port" into "http://host:port"; full URLs pass through
fn proxy_url(proxy: &str) -> String {
    let proxy = proxy.trim();
    if proxy.contains("://") {
        proxy.to_string()
    } else {
        format!("http://{}", proxy)
    }
}
