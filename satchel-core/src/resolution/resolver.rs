use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, warn};

use super::store::ContextStore;
use super::types::{
    DidResolverBuilder, DocumentOrigin, FetcherBuilder, Resolution, ResolvedDocument,
};

/// `Resolver` turns a url into a document by walking an ordered list of
/// sources, first match wins and nothing gets merged:
///
/// 1. the [`ContextStore`]
/// 2. the caller supplied public document, matched by its `id`
/// 3. the DID resolution capability, for `did:` identifiers (memoized into
///    the store on success)
/// 4. a plain network fetch, for http(s) urls (never memoized)
///
/// Synthetic and controlled contexts take precedence over authoritative
/// identity documents, which in turn take precedence over arbitrary network
/// content. A url that matches no source is a normal [`Resolution::Missing`]
/// outcome, the caller is expected to handle it without treating it as an
/// error
pub struct Resolver<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    store: ContextStore,
    did_resolver: TDid,
    fetcher: TFetch,
}

impl<TDid, TFetch> Resolver<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    pub fn new(store: ContextStore, did_resolver: TDid, fetcher: TFetch) -> Self {
        Self {
            store,
            did_resolver,
            fetcher,
        }
    }

    pub fn store(&self) -> &ContextStore {
        &self.store
    }

    pub async fn resolve(&self, url: String, hint: Option<Value>) -> Resolution {
        if let Some(document) = self.store.lookup(&url) {
            debug!("[resolver] cache hit: {}", url);
            return Resolution::Found(ResolvedDocument {
                url,
                document,
                origin: DocumentOrigin::Cache,
                cacheable: false,
            });
        }

        if let Some(injected) = hint.as_ref() {
            if injected.get("id").and_then(Value::as_str) == Some(url.as_str()) {
                debug!("[resolver] injected document used for: {}", url);
                return Resolution::Found(ResolvedDocument {
                    url,
                    document: injected.clone(),
                    origin: DocumentOrigin::Injected,
                    cacheable: false,
                });
            }
        }

        if url.starts_with("did:") {
            return self.resolve_did_url(url, hint).await;
        }

        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_url(url).await;
        }

        debug!("[resolver] unsupported url: {}", url);
        Resolution::Missing
    }

    async fn resolve_did_url(&self, url: String, hint: Option<Value>) -> Resolution {
        match self.did_resolver.resolve_did(url.clone(), hint).await {
            Ok(resolution) => {
                if let Some(error) = resolution.metadata.error {
                    warn!(
                        "[resolver] did resolution reported an error for {}: {} {}",
                        url,
                        error,
                        resolution.metadata.message.unwrap_or_default()
                    );
                }

                match resolution.did_document {
                    Some(document) => {
                        self.store.insert_resolved(url.clone(), document.clone());
                        Resolution::Found(ResolvedDocument {
                            url,
                            document,
                            origin: DocumentOrigin::Resolved,
                            cacheable: true,
                        })
                    }
                    None => Resolution::Missing,
                }
            }
            Err(err) => {
                warn!("[resolver] did resolution failed for {}: {}", url, err);
                Resolution::Unreachable(err.to_string())
            }
        }
    }

    async fn fetch_url(&self, url: String) -> Resolution {
        match self.fetcher.fetch_json(url.clone()).await {
            Ok(document) => Resolution::Found(ResolvedDocument {
                url,
                document,
                origin: DocumentOrigin::Fetched,
                cacheable: false,
            }),
            Err(err) => {
                warn!("[resolver] fetch failed for {}: {}", url, err);
                Resolution::Unreachable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockall::mock;
    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    use crate::resolution::contexts::CONTEXT_CREDENTIALS_V1;
    use crate::resolution::types::{DidResolution, DidResolutionMetadata, ResolverError};

    mock!(
        FakeDidResolver{}

        #[async_trait]
        impl DidResolverBuilder for FakeDidResolver {
            async fn resolve_did(
                &self,
                did: String,
                hint: Option<Value>,
            ) -> Result<DidResolution, ResolverError>;
        }
    );

    mock!(
        FakeFetcher{}

        #[async_trait]
        impl FetcherBuilder for FakeFetcher {
            async fn fetch_json(&self, url: String) -> Result<Value, ResolverError>;
        }
    );

    fn build_resolver(
        did_resolver: MockFakeDidResolver,
        fetcher: MockFakeFetcher,
    ) -> Resolver<MockFakeDidResolver, MockFakeFetcher> {
        Resolver::new(ContextStore::new(), did_resolver, fetcher)
    }

    #[tokio::test]
    async fn test_cache_precedence_over_capabilities() {
        let mut did_resolver = MockFakeDidResolver::new();
        did_resolver.expect_resolve_did().never();

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);
        resolver.store().insert_static(
            "did:web:cached.example.com".to_string(),
            json!({"id": "did:web:cached.example.com"}),
        );

        let resolution = resolver
            .resolve("did:web:cached.example.com".to_string(), None)
            .await;
        let document = resolution.into_document().unwrap();
        assert_eq!(document.origin, DocumentOrigin::Cache);
        assert!(!document.cacheable);

        let resolution = resolver.resolve(CONTEXT_CREDENTIALS_V1.to_string(), None).await;
        assert!(resolution.is_found());
    }

    #[tokio::test]
    async fn test_did_resolution_memoized() {
        let did = "did:web:issuer.example.com".to_string();
        let doc = json!({"id": did, "verificationMethod": []});

        let mut did_resolver = MockFakeDidResolver::new();
        let resolved = doc.clone();
        did_resolver
            .expect_resolve_did()
            .times(1)
            .returning(move |_, _| Ok(DidResolution::resolved(resolved.clone())));

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);

        let first = resolver.resolve(did.clone(), None).await;
        let first = first.into_document().unwrap();
        assert_eq!(first.origin, DocumentOrigin::Resolved);
        assert!(first.cacheable);
        assert_eq!(first.document, doc);

        let second = resolver.resolve(did.clone(), None).await;
        let second = second.into_document().unwrap();
        assert_eq!(second.origin, DocumentOrigin::Cache);
        assert_eq!(second.document, doc);
    }

    #[tokio::test]
    async fn test_fetch_never_memoized() {
        let url = "https://example.com/contexts/v1".to_string();

        let mut did_resolver = MockFakeDidResolver::new();
        did_resolver.expect_resolve_did().never();

        let mut fetcher = MockFakeFetcher::new();
        fetcher
            .expect_fetch_json()
            .times(2)
            .returning(|url| Ok(json!({"id": url})));

        let resolver = build_resolver(did_resolver, fetcher);

        let first = resolver.resolve(url.clone(), None).await;
        let first = first.into_document().unwrap();
        assert_eq!(first.origin, DocumentOrigin::Fetched);
        assert!(!first.cacheable);

        let second = resolver.resolve(url.clone(), None).await;
        assert_eq!(
            second.into_document().unwrap().origin,
            DocumentOrigin::Fetched
        );
    }

    #[tokio::test]
    async fn test_injected_document_short_circuits() {
        let url = "did:web:unpublished.example.com#key-1".to_string();
        let injected = json!({"id": url, "publicKeyBase58": "4zvwRjXUKGfvwnParsHAS3H"});

        let mut did_resolver = MockFakeDidResolver::new();
        did_resolver.expect_resolve_did().never();

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);
        let resolution = resolver.resolve(url.clone(), Some(injected.clone())).await;
        let document = resolution.into_document().unwrap();
        assert_eq!(document.origin, DocumentOrigin::Injected);
        assert_eq!(document.document, injected);
    }

    #[tokio::test]
    async fn test_did_transport_failure_is_soft() {
        let mut did_resolver = MockFakeDidResolver::new();
        did_resolver.expect_resolve_did().times(1).returning(|_, _| {
            Err(ResolverError::DIDResolutionError(
                "connection refused".to_string(),
            ))
        });

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);
        let resolution = resolver
            .resolve("did:web:down.example.com".to_string(), None)
            .await;

        assert!(matches!(resolution, Resolution::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_did_metadata_error_still_returns_document() {
        let did = "did:web:flaky.example.com".to_string();
        let doc = json!({"id": did});

        let mut did_resolver = MockFakeDidResolver::new();
        let resolved = doc.clone();
        did_resolver.expect_resolve_did().times(1).returning(move |_, _| {
            Ok(DidResolution {
                did_document: Some(resolved.clone()),
                metadata: DidResolutionMetadata {
                    error: Some("notFound".to_string()),
                    message: Some("stale registry entry".to_string()),
                },
            })
        });

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);
        let resolution = resolver.resolve(did, None).await;
        assert_eq!(resolution.into_document().unwrap().document, doc);
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_missing() {
        let mut did_resolver = MockFakeDidResolver::new();
        did_resolver.expect_resolve_did().never();

        let mut fetcher = MockFakeFetcher::new();
        fetcher.expect_fetch_json().never();

        let resolver = build_resolver(did_resolver, fetcher);
        let resolution = resolver.resolve("urn:uuid:1234".to_string(), None).await;
        assert!(matches!(resolution, Resolution::Missing));
    }
}
