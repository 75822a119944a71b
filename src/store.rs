use crate::traits::Store;
use crate::types::{Article, InsertOutcome, NewArticle, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::info;

/// PostgreSQL-backed article store. Each insert is its own transaction:
/// one article, one commit.
pub struct ArticleStore {
    pool: PgPool,
}

impl ArticleStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Creates the `articles` and `subscribers` tables if they are missing.
    /// This schema is the contract the listing page and digest sender read.
    pub async fn setup_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id SERIAL PRIMARY KEY,
                url TEXT UNIQUE,
                title TEXT,
                source_name TEXT,
                published_at TIMESTAMPTZ,
                summary TEXT,
                innovation TEXT,
                impact TEXT,
                future TEXT,
                key_info TEXT,
                category TEXT,
                created_at TIMESTAMPTZ DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                id SERIAL PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                subscribed_at TIMESTAMPTZ DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database tables verified and set up");
        Ok(())
    }

    /// Articles inserted at or after `since`, in the digest generator's
    /// display order (categories grouped, newest first within each).
    pub async fn recent_articles(&self, since: DateTime<Utc>) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT url, title, source_name, published_at, summary, innovation,
                   impact, future, key_info, category, created_at
            FROM articles
            WHERE created_at >= $1
            ORDER BY category, published_at DESC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            let key_info_json: Option<String> = row.try_get("key_info")?;
            let key_info = key_info_json
                .as_deref()
                .and_then(|json| serde_json::from_str(json).ok())
                .unwrap_or_default();

            articles.push(Article {
                url: row.try_get("url")?,
                title: row.try_get("title")?,
                source_name: row.try_get("source_name")?,
                published_at: row.try_get("published_at")?,
                summary: row.try_get("summary")?,
                innovation: row.try_get("innovation")?,
                impact: row.try_get("impact")?,
                future: row.try_get("future")?,
                key_info,
                category: row.try_get("category")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(articles)
    }

    /// The broadcast recipient list for the digest sender.
    pub async fn subscriber_emails(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT email FROM subscribers ORDER BY subscribed_at")
            .fetch_all(&self.pool)
            .await?;

        let mut emails = Vec::with_capacity(rows.len());
        for row in rows {
            emails.push(row.try_get("email")?);
        }
        Ok(emails)
    }
}

#[async_trait]
impl Store for ArticleStore {
    async fn exists(&self, url: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM articles WHERE url = $1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn insert(&self, article: &NewArticle) -> Result<InsertOutcome> {
        let key_info = serde_json::to_string(&article.analysis.key_info)?;

        let result = sqlx::query(
            r#"
            INSERT INTO articles (url, title, source_name, published_at,
                                  summary, innovation, impact, future,
                                  key_info, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&article.url)
        .bind(&article.title)
        .bind(&article.source_name)
        .bind(article.published_at)
        .bind(&article.analysis.summary)
        .bind(&article.analysis.innovation)
        .bind(&article.analysis.impact)
        .bind(&article.analysis.future)
        .bind(&key_info)
        .bind(&article.analysis.category)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }
}
