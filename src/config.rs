use clap::Parser;
use std::time::Duration;

/// Process-level configuration, parsed once at startup and passed by
/// reference into each component. Credentials come from the environment (or
/// a `.env` file) via the `env` fallbacks; everything else has a default
/// matching the production schedule.
#[derive(Debug, Parser)]
#[command(name = "ai-digest", about = "Poll AI news feeds, analyze new articles, and persist them for the daily digest")]
pub struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// API key for the generative-model service.
    #[arg(long, env = "GOOGLE_API_KEY")]
    pub google_api_key: String,

    /// Model resource name passed to the generateContent endpoint.
    #[arg(long, default_value = "models/gemini-1.5-pro-latest")]
    pub model: String,

    /// Sliding recency window, in days, measured from run start.
    #[arg(long, default_value_t = 3)]
    pub window_days: i64,

    /// Maximum number of newly inserted articles per source per run.
    #[arg(long, default_value_t = 5)]
    pub max_per_source: usize,

    /// Timeout for article page fetches, in seconds.
    #[arg(long, default_value_t = 15)]
    pub fetch_timeout_secs: u64,

    /// Timeout for model invocations, in seconds.
    #[arg(long, default_value_t = 120)]
    pub model_timeout_secs: u64,

    /// List the models available to the configured API key and exit.
    #[arg(long)]
    pub list_models: bool,
}

/// Settings for the outbound HTTP clients (feed and page fetches).
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            // Some publishers refuse obviously non-browser clients.
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/58.0.3029.110 Safari/537.36"
                .to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl Config {
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            ..HttpConfig::default()
        }
    }
}
