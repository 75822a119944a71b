use crate::config::HttpConfig;
use crate::sources::FeedSource;
use crate::traits::EntrySource;
use crate::types::{FeedEntry, PipelineError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info};

/// Fetches one syndication feed and yields its entries normalized and
/// sorted newest-first.
pub struct FeedPoller {
    client: Client,
}

impl FeedPoller {
    pub fn new(http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&http.user_agent)
            .timeout(http.timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EntrySource for FeedPoller {
    async fn poll(&self, source: &FeedSource) -> Result<Vec<FeedEntry>> {
        debug!("Fetching feed for {}: {}", source.name, source.url);

        let response = self.client.get(&source.url).send().await?;
        let response = response.error_for_status()?;
        let body = response.bytes().await?;

        let entries = parse_entries(&body, &source.name)?;
        info!("Parsed {} entries from {}", entries.len(), source.name);
        Ok(entries)
    }
}

/// Parses raw feed bytes into normalized entries, newest first.
///
/// Feeds are not guaranteed pre-sorted, so the sort is explicit. The best
/// available timestamp is used (`published`, then `updated`); entries with
/// neither get the Unix epoch, which puts them at the tail rather than the
/// head of the walk.
pub fn parse_entries(content: &[u8], source_name: &str) -> Result<Vec<FeedEntry>> {
    let feed = parser::parse(content)
        .map_err(|e| PipelineError::FeedParse(format!("{}: {}", source_name, e)))?;

    let mut entries: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let link = entry.links.first()?.href.clone();
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());
            let published_at = best_timestamp(entry.published, entry.updated);

            Some(FeedEntry {
                title,
                link,
                published_at,
                source_name: source_name.to_string(),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    Ok(entries)
}

fn best_timestamp(
    published: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    published.or(updated).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
