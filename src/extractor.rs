use crate::config::HttpConfig;
use crate::traits::TextExtractor;
use crate::types::Result;
use async_trait::async_trait;
use readability::extractor;
use reqwest::Client;
use std::io::Cursor;
use tracing::{debug, warn};
use url::Url;

/// Retrieves an article page and extracts its main readable text,
/// discarding navigation, ads, and other boilerplate markup.
pub struct ContentExtractor {
    client: Client,
}

impl ContentExtractor {
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
impl TextExtractor for ContentExtractor {
    async fn extract(&self, url: &str) -> Option<String> {
        debug!("Downloading content from: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Page fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Page fetch for {} returned HTTP {}", url, status);
            return None;
        }

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Page body read failed for {}: {}", url, e);
                return None;
            }
        };

        let text = extract_text(&html, url);
        if text.is_none() {
            warn!("No extractable text at {}", url);
        }
        text
    }
}

/// Runs readability extraction over fetched markup. Returns `None` when the
/// URL is unparseable or nothing readable survives boilerplate removal.
pub fn extract_text(html: &str, url: &str) -> Option<String> {
    let base = Url::parse(url).ok()?;
    let product = extractor::extract(&mut Cursor::new(html.as_bytes()), &base).ok()?;

    let text = product.text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
