use uuid::Uuid;

use super::{Database, SavedArticleRepository};
use crate::news::{Article, PublishedList};
use crate::Result;

/// Bookmarked articles kept for offline reading.
///
/// After every successful mutation the whole table is re-read and published;
/// subscribers always see a full snapshot, never a diff.
pub struct SavedArticleStore {
    db: Database,
    articles: PublishedList,
}

impl SavedArticleStore {
    /// Open the store and publish its current contents
    pub async fn open(db: Database) -> Self {
        let store = Self {
            db,
            articles: PublishedList::new(),
        };
        store.refresh().await;
        store
    }

    /// The list this store publishes into
    pub fn articles(&self) -> &PublishedList {
        &self.articles
    }

    /// Look up a saved article in the published snapshot
    pub fn find(&self, id: Uuid) -> Option<Article> {
        self.articles.snapshot().into_iter().find(|a| a.id == id)
    }

    /// Save an article and republish. Failures are logged and swallowed.
    pub async fn save(&self, article: &Article) {
        if let Err(e) = self.try_save(article).await {
            tracing::error!("Failed to save article '{}': {}", article.title, e);
        }
    }

    /// Delete the saved row carrying this article's id and republish.
    ///
    /// An unknown id is a no-op. Failures are logged and swallowed.
    pub async fn delete(&self, article: &Article) {
        if let Err(e) = self.try_delete(article).await {
            tracing::error!("Failed to delete article {}: {}", article.id, e);
        }
    }

    /// Re-read every saved row and publish it. Failures are logged and swallowed.
    pub async fn refresh(&self) {
        if let Err(e) = self.try_refresh().await {
            tracing::error!("Failed to load saved articles: {}", e);
        }
    }

    pub async fn try_save(&self, article: &Article) -> Result<()> {
        let repo = SavedArticleRepository::new(&self.db);

        if repo.insert(article).await? {
            tracing::info!("Saved article: {}", article.title);
        } else {
            tracing::debug!("Article {} is already saved", article.id);
        }

        self.try_refresh().await
    }

    /// Returns whether a row was removed
    pub async fn try_delete(&self, article: &Article) -> Result<bool> {
        let repo = SavedArticleRepository::new(&self.db);

        if repo.find_by_id(article.id).await?.is_none() {
            tracing::debug!("No saved article with id {}, nothing to delete", article.id);
            return Ok(false);
        }

        repo.delete_by_id(article.id).await?;
        tracing::info!("Deleted saved article: {}", article.title);

        self.try_refresh().await?;
        Ok(true)
    }

    /// Read the full collection without publishing it
    pub async fn try_list(&self) -> Result<Vec<Article>> {
        SavedArticleRepository::new(&self.db).list_all().await
    }

    async fn try_refresh(&self) -> Result<()> {
        let articles = self.try_list().await?;
        self.articles.replace(articles);
        Ok(())
    }
}
