pub mod analyzer;
pub mod config;
pub mod extractor;
pub mod pipeline;
pub mod poller;
pub mod sources;
pub mod store;
pub mod traits;
pub mod types;

pub use analyzer::GeminiAnalyzer;
pub use config::{Config, HttpConfig};
pub use extractor::ContentExtractor;
pub use pipeline::{Pipeline, PipelineOptions, RunReport, SourceReport};
pub use poller::FeedPoller;
pub use sources::{default_sources, FeedSource};
pub use store::ArticleStore;
pub use traits::{Analyzer, EntrySource, Store, TextExtractor};
pub use types::*;
