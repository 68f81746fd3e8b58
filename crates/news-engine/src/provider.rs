use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use thiserror::Error;

use crate::models::RawEntry;
use crate::timestamp::parse_timestamp;
use crate::window::kst;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed feed: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Network(err.to_string())
    }
}

/// Anything that can turn a feed URL into raw entries
#[async_trait]
pub trait FeedProvider: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, FeedError>;
}

/// Fetches RSS/Atom feeds over HTTP. One attempt per call, no retry.
pub struct HttpFeedProvider {
    client: Client,
}

impl HttpFeedProvider {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (compatible; MorningBrief/1.0)")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedProvider for HttpFeedProvider {
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        parse_feed(&body)
    }
}

/// feed-rs only understands RFC 2822/3339 on its own; route every date through our parser
fn feed_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(raw, &kst()).map(|dt| dt.with_timezone(&Utc))
}

/// Parse an RSS or Atom document into raw entries
pub fn parse_feed(body: &[u8]) -> Result<Vec<RawEntry>, FeedError> {
    let feed = feed_rs::parser::Builder::new()
        .timestamp_parser(feed_timestamp)
        .build()
        .parse(body)
        .map_err(|e| FeedError::Parse(e.to_string()))?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| RawEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.first().map(|l| l.href.clone()),
            // feed-rs folds RSS pubDate into `published`
            published: entry.published.map(|dt| dt.to_rfc3339()),
            pub_date: None,
            updated: entry.updated.map(|dt| dt.to_rfc3339()),
        })
        .collect();

    Ok(entries)
}
