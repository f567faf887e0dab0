use std::sync::Arc;

use uuid::Uuid;

use crate::config::AppConfig;
use crate::news::{Article, HeadlineFetcher};
use crate::storage::{Database, SavedArticleStore};
use crate::{Error, Result};

/// The fetched headlines and the saved articles, wired from one configuration
pub struct Session {
    fetcher: Arc<HeadlineFetcher>,
    saved: Arc<SavedArticleStore>,
}

impl Session {
    /// Open the database, load the saved articles and prepare the fetcher
    pub async fn open(config: &AppConfig) -> Result<Self> {
        let db = Database::new(config).await?;
        Self::with_database(config, db).await
    }

    pub async fn with_database(config: &AppConfig, db: Database) -> Result<Self> {
        let fetcher = HeadlineFetcher::new(config)?;
        let saved = SavedArticleStore::open(db).await;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            saved: Arc::new(saved),
        })
    }

    pub fn saved(&self) -> &Arc<SavedArticleStore> {
        &self.saved
    }

    /// Fetch headlines and wait for the published list to be updated
    pub async fn refresh_headlines(&self) -> Vec<Article> {
        if let Err(e) = self.fetcher.spawn_fetch().await {
            tracing::error!("Headline fetch task failed: {}", e);
        }
        self.fetcher.articles().snapshot()
    }

    /// Save one of the fetched headlines
    pub async fn bookmark(&self, article: &Article) {
        self.saved.save(article).await;
    }

    /// Remove a saved article
    pub async fn remove(&self, article: &Article) {
        self.saved.delete(article).await;
    }

    /// Find a saved article by id
    pub fn saved_article(&self, id: Uuid) -> Result<Article> {
        self.saved
            .find(id)
            .ok_or_else(|| Error::ArticleNotFound(id.to_string()))
    }
}
