use crate::sources::FeedSource;
use crate::types::{AnalysisOutcome, FeedEntry, InsertOutcome, NewArticle, Result};
use async_trait::async_trait;

/// Yields the normalized, newest-first entries of one feed.
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn poll(&self, source: &FeedSource) -> Result<Vec<FeedEntry>>;
}

/// Retrieves a page and extracts its primary readable text. `None` covers
/// network failure, a non-success status, and empty extraction alike.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Option<String>;
}

/// Turns extracted article text into a structured analysis.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> AnalysisOutcome;
}

/// URL-keyed article persistence with explicit duplicate detection.
#[async_trait]
pub trait Store: Send + Sync {
    async fn exists(&self, url: &str) -> Result<bool>;
    async fn insert(&self, article: &NewArticle) -> Result<InsertOutcome>;
}
