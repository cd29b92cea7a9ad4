use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;

use super::types::{
    DidResolution, DidResolverBuilder, FetcherBuilder, ResolverError,
};

const METHOD_WEB: &str = "web";

/// `WebDidResolver` resolves `did:web` identifiers by mapping them onto a
/// https location and fetching the DID document from there:
///
/// ```text
/// did:web:example.com              -> https://example.com/.well-known/did.json
/// did:web:example.com:keys:alice   -> https://example.com/keys/alice/did.json
/// did:web:example.com%3A8443       -> https://example.com:8443/.well-known/did.json
/// ```
///
/// A malformed identifier or a foreign method is reported through the
/// resolution metadata, only transport failures surface as `Err`
pub struct WebDidResolver<TFetch>
where
    TFetch: FetcherBuilder + Send + Sync,
{
    fetcher: TFetch,
    scheme: &'static str,
}

impl<TFetch> WebDidResolver<TFetch>
where
    TFetch: FetcherBuilder + Send + Sync,
{
    pub fn new(fetcher: TFetch) -> Self {
        Self {
            fetcher,
            scheme: "https",
        }
    }

    /// `insecure` serves test deployments that publish DID documents over
    /// plain http
    pub fn insecure(fetcher: TFetch) -> Self {
        Self {
            fetcher,
            scheme: "http",
        }
    }

    pub(crate) fn did_url(&self, did: &str) -> Result<String, ResolverError> {
        let mut parts = did.split(':');
        match (parts.next(), parts.next()) {
            (Some("did"), Some(METHOD_WEB)) => {}
            _ => {
                return Err(ResolverError::DIDResolutionError(format!(
                    "unsupported did method: {}",
                    did
                )))
            }
        }

        let host = parts
            .next()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| {
                ResolverError::DIDResolutionError(format!("missing host: {}", did))
            })?;
        let host = host.replace("%3A", ":").replace("%3a", ":");

        let path: Vec<&str> = parts.collect();
        let url = if path.is_empty() {
            format!("{}://{}/.well-known/did.json", self.scheme, host)
        } else {
            format!("{}://{}/{}/did.json", self.scheme, host, path.join("/"))
        };

        Ok(url)
    }
}

#[async_trait]
impl<TFetch> DidResolverBuilder for WebDidResolver<TFetch>
where
    TFetch: FetcherBuilder + Send + Sync,
{
    async fn resolve_did(
        &self,
        did: String,
        hint: Option<Value>,
    ) -> Result<DidResolution, ResolverError> {
        if let Some(document) = hint {
            if document.get("id").and_then(Value::as_str) == Some(did.as_str()) {
                return Ok(DidResolution::resolved(document));
            }
        }

        let url = match self.did_url(&did) {
            Ok(url) => url,
            Err(err) => {
                return Ok(DidResolution::failed(
                    "invalidDid".to_string(),
                    err.to_string(),
                ))
            }
        };

        let document = self.fetcher.fetch_json(url).await?;
        Ok(DidResolution::resolved(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockall::mock;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;
    use table_test::table_test;

    mock!(
        FakeFetcher{}

        #[async_trait]
        impl FetcherBuilder for FakeFetcher {
            async fn fetch_json(&self, url: String) -> Result<Value, ResolverError>;
        }
    );

    #[test]
    fn test_did_url_mapping() {
        let resolver = WebDidResolver::new(MockFakeFetcher::new());

        let table = vec![
            (
                "did:web:example.com",
                "https://example.com/.well-known/did.json",
            ),
            (
                "did:web:example.com:keys:alice",
                "https://example.com/keys/alice/did.json",
            ),
            (
                "did:web:example.com%3A8443",
                "https://example.com:8443/.well-known/did.json",
            ),
            (
                "did:web:example.com%3a8443:issuer",
                "https://example.com:8443/issuer/did.json",
            ),
        ];

        for (validator, input, expected) in table_test!(table) {
            let url = resolver.did_url(input);

            validator
                .given(input)
                .when("mapped to a fetch location")
                .then("it points at the did.json document")
                .assert_eq(expected.to_string(), url.unwrap());
        }
    }

    #[test]
    fn test_did_url_rejects_foreign_method() {
        let resolver = WebDidResolver::new(MockFakeFetcher::new());
        assert!(resolver.did_url("did:key:z6Mk").is_err());
        assert!(resolver.did_url("https://example.com").is_err());
        assert!(resolver.did_url("did:web:").is_err());
    }

    #[test]
    fn test_insecure_scheme() {
        let resolver = WebDidResolver::insecure(MockFakeFetcher::new());
        let url = resolver.did_url("did:web:127.0.0.1%3A9900").unwrap();
        assert_eq!(url, "http://127.0.0.1:9900/.well-known/did.json");
    }

    #[tokio::test]
    async fn test_resolve_did_fetches_document() {
        let did = "did:web:issuer.example.com".to_string();
        let doc = json!({"id": did, "verificationMethod": []});

        let mut fetcher = MockFakeFetcher::new();
        let fetched = doc.clone();
        fetcher
            .expect_fetch_json()
            .withf(|url| url.as_str() == "https://issuer.example.com/.well-known/did.json")
            .times(1)
            .returning(move |_| Ok(fetched.clone()));

        let resolver = WebDidResolver::new(fetcher);
        let resolution = resolver.resolve_did(did, None).await.unwrap();
        assert_eq!(resolution.did_document, Some(doc));
        assert!(resolution.metadata.error.is_none());
    }

    #[tokio::test]
    async fn test_resolve_did_hint_short_circuits() {
        let did = "did:web:unpublished.example.com".to_string();
        let hint = json!({"id": did});

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = WebDidResolver::new(fetcher);
        let resolution = resolver
            .resolve_did(did, Some(hint.clone()))
            .await
            .unwrap();
        assert_eq!(resolution.did_document, Some(hint));
    }

    #[tokio::test]
    async fn test_resolve_did_reports_malformed_did_via_metadata() {
        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = WebDidResolver::new(fetcher);
        let resolution = resolver
            .resolve_did("did:key:z6Mk".to_string(), None)
            .await
            .unwrap();
        assert!(resolution.did_document.is_none());
        assert_eq!(resolution.metadata.error, Some("invalidDid".to_string()));
    }
}
