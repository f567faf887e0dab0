mod article_repo;
mod database;
mod saved_store;

pub use article_repo::SavedArticleRepository;
pub use database::Database;
pub use saved_store::SavedArticleStore;
