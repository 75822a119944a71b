use ai_digest::{
    default_sources, ArticleStore, Config, ContentExtractor, FeedPoller, GeminiAnalyzer,
    Pipeline, PipelineOptions,
};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    let analyzer = GeminiAnalyzer::new(
        config.google_api_key.clone(),
        config.model.clone(),
        Duration::from_secs(config.model_timeout_secs),
    )
    .context("failed to build model client")?;

    if config.list_models {
        let models = analyzer
            .list_models()
            .await
            .context("failed to list models")?;
        for model in models {
            println!("{}", model);
        }
        return Ok(());
    }

    let store = ArticleStore::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    store
        .setup_schema()
        .await
        .context("failed to set up database schema")?;

    let http = config.http();
    let poller = FeedPoller::new(&http).context("failed to build feed client")?;
    let extractor = ContentExtractor::new(&http).context("failed to build page client")?;

    let pipeline = Pipeline::new(
        Box::new(poller),
        Box::new(extractor),
        Box::new(analyzer),
        Box::new(store),
        PipelineOptions {
            window_days: config.window_days,
            max_per_source: config.max_per_source,
        },
    );

    let report = pipeline.run(&default_sources()).await;
    info!(
        "All sources processed: {} articles persisted, {} failures",
        report.total_persisted(),
        report.total_failures()
    );

    Ok(())
}
