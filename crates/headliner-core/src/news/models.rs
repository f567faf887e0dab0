use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single news item, either fetched from the headline feed or restored
/// from the saved-article store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Local identity; never read from the feed, minted on every decode
    #[serde(skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    pub url: String,
}

/// Top-headlines response envelope
#[derive(Debug, Deserialize)]
pub struct HeadlinesResponse {
    pub articles: Vec<Article>,
}

/// Error body returned by the News API on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Article {
    /// Create an article with a freshly minted id
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        url_to_image: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, url_to_image, url)
    }

    /// Rebuild an article with a known id
    pub fn with_id(
        id: Uuid,
        title: impl Into<String>,
        description: Option<String>,
        url_to_image: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description,
            url_to_image,
            url: url.into(),
        }
    }

    /// Same content, ignoring identity
    pub fn same_content(&self, other: &Article) -> bool {
        self.title == other.title
            && self.description == other.description
            && self.url_to_image == other.url_to_image
            && self.url == other.url
    }

    /// Items handed to a share action: the title and the link
    pub fn share_items(&self) -> [&str; 2] {
        [&self.title, &self.url]
    }

    /// Share items joined into a single block of text
    pub fn share_text(&self) -> String {
        self.share_items().join("\n")
    }
}
