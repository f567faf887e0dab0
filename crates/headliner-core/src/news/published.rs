use tokio::sync::watch;

use super::models::Article;

/// Observable list of articles, replaced wholesale on every update.
///
/// Subscribers hold a `watch::Receiver`; the list never holds anything that
/// points back at them.
pub struct PublishedList {
    tx: watch::Sender<Vec<Article>>,
}

impl PublishedList {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Replace the whole list and notify subscribers
    pub fn replace(&self, articles: Vec<Article>) {
        tracing::debug!("Publishing {} articles", articles.len());
        self.tx.send_replace(articles);
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<Article> {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Register a subscriber; `changed()` fires on every replacement
    pub fn subscribe(&self) -> watch::Receiver<Vec<Article>> {
        self.tx.subscribe()
    }
}

impl Default for PublishedList {
    fn default() -> Self {
        Self::new()
    }
}
