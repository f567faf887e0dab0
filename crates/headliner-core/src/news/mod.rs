mod fetcher;
mod models;
mod parser;
mod published;

pub use fetcher::HeadlineFetcher;
pub use models::{ApiErrorBody, Article, HeadlinesResponse};
pub use parser::{parse_api_error, parse_headlines};
pub use published::PublishedList;
