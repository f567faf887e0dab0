use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use tokio::task::JoinHandle;
use url::Url;

use super::models::Article;
use super::parser::{parse_api_error, parse_headlines};
use super::published::PublishedList;
use crate::config::AppConfig;
use crate::{Error, Result};

const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";
const MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;
const CLIENT_USER_AGENT: &str = concat!("headliner/", env!("CARGO_PKG_VERSION"));

/// Fetches top headlines and publishes them as the current article list
pub struct HeadlineFetcher {
    client: Client,
    base_url: String,
    country: String,
    api_key: Option<String>,
    articles: PublishedList,
}

impl HeadlineFetcher {
    /// Create a new headline fetcher with configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.news.request_timeout_secs)?;

        Ok(Self {
            client,
            base_url: config.news.base_url.clone(),
            country: config.news.country.clone(),
            api_key: config.news.api_key.clone(),
            articles: PublishedList::new(),
        })
    }

    /// Build HTTP client; no timeout unless one is configured
    fn build_client(timeout_secs: Option<u64>) -> Result<Client> {
        let mut builder = Client::builder()
            .default_headers(Self::build_headers())
            .gzip(true)
            .deflate(true)
            .brotli(true);

        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build().map_err(Error::Http)
    }

    /// The News API rejects requests that carry no User-Agent
    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers
    }

    /// The list this fetcher publishes into
    pub fn articles(&self) -> &PublishedList {
        &self.articles
    }

    /// Top-headlines endpoint with `country` and `apiKey` as the only query parameters
    pub fn endpoint(&self) -> Result<Url> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("news.api_key is not set".to_string()))?;

        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, TOP_HEADLINES_PATH))?;
        url.query_pairs_mut()
            .append_pair("country", &self.country)
            .append_pair("apiKey", api_key);

        Ok(url)
    }

    /// Fetch and decode the current headlines without publishing them
    pub async fn try_fetch(&self) -> Result<Vec<Article>> {
        let url = self.endpoint()?;

        tracing::info!("Fetching top headlines for country '{}'", self.country);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content = response.bytes().await?;

        if content.len() > MAX_RESPONSE_BYTES {
            return Err(Error::ResponseTooLarge(content.len()));
        }

        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &content));
        }

        parse_headlines(&content)
    }

    /// Fetch headlines and replace the published list.
    ///
    /// Failures are logged and leave the published list as it was.
    pub async fn fetch(&self) {
        match self.try_fetch().await {
            Ok(articles) => {
                tracing::info!("Fetched {} headlines", articles.len());
                self.articles.replace(articles);
            }
            Err(e) => {
                tracing::error!("Failed to fetch headlines: {}", e);
            }
        }
    }

    /// Run `fetch` on a background task.
    ///
    /// Earlier fetches still in flight are not cancelled; whichever
    /// completes last wins.
    pub fn spawn_fetch(self: &Arc<Self>) -> JoinHandle<()> {
        let fetcher = Arc::clone(self);
        tokio::spawn(async move { fetcher.fetch().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SCENARIO_BODY: &str =
        r#"{"articles":[{"title":"T1","description":null,"urlToImage":null,"url":"https://x/1"}]}"#;

    fn config_for(base_url: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.news.base_url = base_url.to_string();
        config.news.api_key = Some("test-key".to_string());
        config
    }

    fn headline_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("country".into(), "us".into()),
            Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
        ])
    }

    #[test]
    fn test_endpoint_has_only_country_and_key() {
        let fetcher = HeadlineFetcher::new(&config_for("https://newsapi.org/")).unwrap();
        let url = fetcher.endpoint().unwrap();

        assert_eq!(
            url.as_str(),
            "https://newsapi.org/v2/top-headlines?country=us&apiKey=test-key"
        );
    }

    #[test]
    fn test_endpoint_requires_api_key() {
        let fetcher = HeadlineFetcher::new(&AppConfig::default()).unwrap();
        assert!(matches!(fetcher.endpoint(), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_publishes_articles() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SCENARIO_BODY)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        fetcher.fetch().await;

        mock.assert_async().await;
        let articles = fetcher.articles().snapshot();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "T1");
        assert_eq!(articles[0].description, None);
        assert_eq!(articles[0].url_to_image, None);
        assert_eq!(articles[0].url, "https://x/1");
    }

    #[tokio::test]
    async fn test_refetch_mints_new_ids_and_replaces_list() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(SCENARIO_BODY)
            .expect(2)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        fetcher.fetch().await;
        let first = fetcher.articles().snapshot();
        fetcher.fetch().await;
        let second = fetcher.articles().snapshot();

        assert_eq!(second.len(), 1);
        assert_ne!(first[0].id, second[0].id);
        assert!(first[0].same_content(&second[0]));
    }

    #[tokio::test]
    async fn test_malformed_response_keeps_previous_list() {
        let mut server = Server::new_async().await;
        let good = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(SCENARIO_BODY)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        fetcher.fetch().await;
        let before = fetcher.articles().snapshot();
        good.remove_async().await;

        let _bad = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(r#"{"articles":[{"title":1,"url":"https://x/1"}]}"#)
            .create_async()
            .await;

        fetcher.fetch().await;
        assert_eq!(fetcher.articles().snapshot(), before);
    }

    #[tokio::test]
    async fn test_missing_articles_field_leaves_list_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(r#"{"status":"ok","totalResults":0}"#)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        assert!(matches!(fetcher.try_fetch().await, Err(Error::Json(_))));

        fetcher.fetch().await;
        assert!(fetcher.articles().is_empty());
    }

    #[tokio::test]
    async fn test_api_error_status_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(401)
            .with_body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        match fetcher.try_fetch().await {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 401);
                assert!(message.contains("apiKeyInvalid"));
            }
            other => panic!("expected API error, got {:?}", other.map(|a| a.len())),
        }

        fetcher.fetch().await;
        assert!(fetcher.articles().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        // Nothing listens on port 9 locally
        let fetcher = HeadlineFetcher::new(&config_for("http://127.0.0.1:9")).unwrap();
        assert!(matches!(fetcher.try_fetch().await, Err(Error::Http(_))));

        fetcher.fetch().await;
        assert!(fetcher.articles().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_fetch_publishes_to_subscribers() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(SCENARIO_BODY)
            .create_async()
            .await;

        let fetcher = Arc::new(HeadlineFetcher::new(&config_for(&server.url())).unwrap());
        let mut rx = fetcher.articles().subscribe();

        fetcher.spawn_fetch().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut server = Server::new_async().await;
        let body = format!(
            r#"{{"articles":[],"pad":"{}"}}"#,
            "x".repeat(MAX_RESPONSE_BYTES)
        );
        let _mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body(body)
            .expect(2)
            .create_async()
            .await;

        let fetcher = HeadlineFetcher::new(&config_for(&server.url())).unwrap();
        let existing = vec![Article::new("Kept", None, None, "https://x/kept")];
        fetcher.articles().replace(existing.clone());

        match fetcher.try_fetch().await {
            Err(Error::ResponseTooLarge(size)) => assert!(size > MAX_RESPONSE_BYTES),
            other => panic!("expected oversized response, got {:?}", other.map(|a| a.len())),
        }

        fetcher.fetch().await;
        assert_eq!(fetcher.articles().snapshot(), existing);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_both_complete_last_one_wins() {
        let mut server = Server::new_async().await;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mock = server
            .mock("GET", TOP_HEADLINES_PATH)
            .match_query(headline_query())
            .with_status(200)
            .with_body_from_request(move |_| {
                let body = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    r#"{"articles":[{"title":"A1","url":"https://x/a1"}]}"#
                } else {
                    r#"{"articles":[{"title":"B1","url":"https://x/b1"},{"title":"B2","url":"https://x/b2"}]}"#
                };
                body.as_bytes().to_vec()
            })
            .expect(2)
            .create_async()
            .await;

        let fetcher = Arc::new(HeadlineFetcher::new(&config_for(&server.url())).unwrap());

        let first = fetcher.spawn_fetch();
        let second = fetcher.spawn_fetch();
        let (first, second) = tokio::join!(first, second);
        first.unwrap();
        second.unwrap();

        mock.assert_async().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let titles: Vec<String> = fetcher
            .articles()
            .snapshot()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert!(
            titles == ["A1"] || titles == ["B1", "B2"],
            "published list mixes responses: {:?}",
            titles
        );
    }
}
