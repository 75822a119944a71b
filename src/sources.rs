/// A named syndication endpoint. The registry is plain data: the pipeline
/// never mutates it, and components receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The default source registry: the AI research and industry feeds the
/// digest tracks out of the box.
pub fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource::new("arXiv: AI", "https://arxiv.org/rss/cs.AI"),
        FeedSource::new(
            "arXiv: Computation and Language",
            "https://arxiv.org/rss/cs.CL",
        ),
        FeedSource::new("arXiv: Machine Learning", "https://arxiv.org/rss/cs.LG"),
        FeedSource::new("Google AI Blog", "https://blog.google/technology/ai/rss/"),
        FeedSource::new("DeepMind Blog", "https://deepmind.google/blog/rss/"),
        FeedSource::new("OpenAI Blog", "https://openai.com/blog/rss.xml"),
        FeedSource::new(
            "Microsoft AI Blog",
            "https://blogs.microsoft.com/ai/feed/",
        ),
        FeedSource::new("Meta AI Blog", "https://ai.meta.com/blog/rss/"),
        FeedSource::new(
            "Anthropic Blog",
            "https://www.anthropic.com/news/rss.xml",
        ),
        FeedSource::new(
            "VentureBeat AI",
            "https://feeds.feedburner.com/venturebeat/SZYF",
        ),
    ]
}
