use chrono::Utc;
use sqlx::FromRow;
use uuid::Uuid;

use super::Database;
use crate::news::Article;
use crate::Result;

/// Repository for saved-article CRUD operations
pub struct SavedArticleRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct ArticleEntityRow {
    id: Option<String>,
    title: Option<String>,
    #[sqlx(rename = "descriptionText")]
    description_text: Option<String>,
    #[sqlx(rename = "urlToImage")]
    url_to_image: Option<String>,
    url: Option<String>,
}

impl From<ArticleEntityRow> for Article {
    fn from(row: ArticleEntityRow) -> Self {
        let id = match row.id.as_deref().map(Uuid::parse_str) {
            Some(Ok(id)) => id,
            stored => {
                let fresh = Uuid::new_v4();
                tracing::warn!(
                    stored_id = ?row.id,
                    parse_error = ?stored.and_then(|r| r.err()).map(|e| e.to_string()),
                    %fresh,
                    "Saved article has no usable id, substituting a fresh one"
                );
                fresh
            }
        };

        Article {
            id,
            title: row.title.unwrap_or_default(),
            description: row.description_text,
            url_to_image: row.url_to_image,
            url: row.url.unwrap_or_default(),
        }
    }
}

impl<'a> SavedArticleRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert a row from the article's fields.
    ///
    /// Returns false when a row with the same id already exists; content is
    /// never used for deduplication.
    pub async fn insert(&self, article: &Article) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO ArticleEntity
            (id, title, descriptionText, urlToImage, url, savedAt)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.id.to_string())
        .bind(&article.title)
        .bind(&article.description)
        .bind(&article.url_to_image)
        .bind(&article.url)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find a saved article by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let row: Option<ArticleEntityRow> = sqlx::query_as(
            r#"
            SELECT id, title, descriptionText, urlToImage, url
            FROM ArticleEntity
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Article::from))
    }

    /// Delete the row with the given ID, returning the number of rows removed
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM ArticleEntity WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }

    /// Every saved article, oldest save first
    pub async fn list_all(&self) -> Result<Vec<Article>> {
        let rows: Vec<ArticleEntityRow> = sqlx::query_as(
            r#"
            SELECT id, title, descriptionText, urlToImage, url
            FROM ArticleEntity
            ORDER BY savedAt ASC, rowid ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Article::from).collect())
    }
}
