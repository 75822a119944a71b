use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized item pulled from a syndication feed. Transient: either it
/// becomes an [`Article`] this run or it is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Best-effort publication time. Entries whose feed carried no usable
    /// timestamp get the Unix epoch so they sort behind everything else.
    pub published_at: DateTime<Utc>,
    pub source_name: String,
}

/// Structured output of the analysis step for a single article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub innovation: String,
    pub impact: String,
    pub future: String,
    pub key_info: Vec<String>,
    /// Raw category label as returned by the model. Expected to match one of
    /// [`Category::ALL`]; an unknown label is persisted verbatim and flagged
    /// in the logs.
    pub category: String,
}

/// The fixed set of category labels the analyzer instructs the model to
/// choose from. Downstream display ordering depends on these exact strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    NewModelRelease,
    NewResearchPaper,
    IndustryNews,
    EthicalAnalysis,
    CommunityUpdate,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NewModelRelease,
        Category::NewResearchPaper,
        Category::IndustryNews,
        Category::EthicalAnalysis,
        Category::CommunityUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::NewModelRelease => "New Model Release",
            Category::NewResearchPaper => "New Research Paper",
            Category::IndustryNews => "Industry News",
            Category::EthicalAnalysis => "Ethical Analysis",
            Category::CommunityUpdate => "Community Update",
        }
    }

    /// Exact-match lookup. Returns `None` for anything outside the fixed set.
    pub fn parse(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insert payload for a freshly analyzed article.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub url: String,
    pub title: String,
    pub source_name: String,
    pub published_at: DateTime<Utc>,
    pub analysis: Analysis,
}

impl NewArticle {
    pub fn from_entry(entry: &FeedEntry, analysis: Analysis) -> Self {
        Self {
            url: entry.link.clone(),
            title: entry.title.clone(),
            source_name: entry.source_name.clone(),
            published_at: entry.published_at,
            analysis,
        }
    }
}

/// A persisted row from the `articles` table, as read back by the digest
/// and listing collaborators.
#[derive(Debug, Clone)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub source_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub innovation: Option<String>,
    pub impact: Option<String>,
    pub future: Option<String>,
    pub key_info: Vec<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of an insert attempt. A unique-constraint hit on the URL column
/// is an expected result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Result of one analyzer invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analyzed(Analysis),
    /// Input below the minimum useful length; nothing was sent to the model.
    TooShort { len: usize },
    /// The model responded, but the payload did not parse against the
    /// expected shape.
    MalformedPayload { reason: String },
    /// Transport, auth, quota, or an otherwise unusable response.
    ServiceError { reason: String },
}

/// Terminal state of one feed entry within a run. No retries: every state
/// here is final until a later run re-discovers the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Persisted,
    DuplicateSkipped,
    /// Published before the recency cutoff; the driver stops the source here.
    StaleBoundary,
    ExtractFailed,
    AnalyzeFailed,
    PersistFailed,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
