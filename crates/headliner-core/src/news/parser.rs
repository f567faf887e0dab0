use super::models::{ApiErrorBody, Article, HeadlinesResponse};
use crate::{Error, Result};

/// Parse a top-headlines response body into articles, in source order.
///
/// A single undecodable element rejects the whole body.
pub fn parse_headlines(content: &[u8]) -> Result<Vec<Article>> {
    let response: HeadlinesResponse = serde_json::from_slice(content)?;
    Ok(response.articles)
}

/// Build an error for a non-2xx response, using the API's own message when
/// the body carries one
pub fn parse_api_error(status: u16, content: &[u8]) -> Error {
    let message = serde_json::from_slice::<ApiErrorBody>(content)
        .ok()
        .and_then(|body| match (body.code, body.message) {
            (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
            (None, Some(message)) => Some(message),
            (Some(code), None) => Some(code),
            (None, None) => None,
        })
        .unwrap_or_else(|| String::from_utf8_lossy(&content[..content.len().min(200)]).into_owned());

    Error::Api { status, message }
}
