pub mod config;
pub mod error;
pub mod news;
pub mod session;
pub mod storage;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use news::Article;
pub use session::Session;
