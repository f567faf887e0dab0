use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("News API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response too large: {0} bytes")]
    ResponseTooLarge(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
