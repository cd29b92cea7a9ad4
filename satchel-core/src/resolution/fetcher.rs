use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;

use super::types::{FetcherBuilder, ResolverError};

/// `HttpFetcher` is the plain network fetch capability built on
/// [`reqwest::Client`]. Non-2xx responses and bodies that fail to parse as
/// structured data are both reported as errors, the resolver treats either
/// as a soft failure
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FetcherBuilder for HttpFetcher {
    async fn fetch_json(&self, url: String) -> Result<Value, ResolverError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ResolverError::FetchError(err.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|err| ResolverError::FetchError(err.to_string()))?;

        response
            .json::<Value>()
            .await
            .map_err(|err| ResolverError::ParseError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockito::Server;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    #[tokio::test]
    async fn test_fetch_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/contexts/v1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"@context": {"id": "@id"}}"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let document = fetcher
            .fetch_json(format!("{}/contexts/v1", server.url()))
            .await
            .unwrap();

        assert_eq!(document, json!({"@context": {"id": "@id"}}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_json_non_2xx() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let result = fetcher
            .fetch_json(format!("{}/missing", server.url()))
            .await;

        assert!(matches!(result, Err(ResolverError::FetchError(_))));
    }

    #[tokio::test]
    async fn test_fetch_json_invalid_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new();
        let result = fetcher.fetch_json(format!("{}/broken", server.url())).await;

        assert!(matches!(result, Err(ResolverError::ParseError(_))));
    }
}
