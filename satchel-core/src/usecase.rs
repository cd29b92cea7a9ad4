use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use crate::codec::bridge::Bridge;
use crate::codec::template::{Template, TemplateCache};
use crate::codec::types::TemplateRef;
use crate::resolution::fetcher::HttpFetcher;
use crate::resolution::resolver::Resolver;
use crate::resolution::store::ContextStore;
use crate::resolution::types::{DidResolverBuilder, FetcherBuilder, ResolvedDocument};
use crate::resolution::did_web::WebDidResolver;
use crate::signature::keypair::KeyPairDescriptor;
use crate::signature::pipeline::Pipeline;
use crate::signature::suite::Ed25519Suite;
use crate::signature::types::VerificationResult;
use crate::types::{SatchelError, Unpacked, UsecaseBuilder};

/// `Usecase` is base logic implementation for the [`UsecaseBuilder`],
/// composing the signature pipeline and the codec bridge. The suite is pinned
/// to [`Ed25519Suite`], the resolution capabilities stay generic
pub struct Usecase<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    pipeline: Pipeline<TDid, TFetch>,
    bridge: Bridge,
}

impl<TDid, TFetch> Usecase<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    pub fn new(resolver: Resolver<TDid, TFetch>, bridge: Bridge) -> Self {
        Self {
            pipeline: Pipeline::new(resolver),
            bridge,
        }
    }

    pub fn templates(&self) -> &TemplateCache {
        self.bridge.templates()
    }

    pub fn store(&self) -> &ContextStore {
        self.pipeline.resolver().store()
    }
}

impl Usecase<WebDidResolver<HttpFetcher>, HttpFetcher> {
    /// `standard` wires the default stack: `did:web` resolution and plain
    /// https fetching, both over the same client
    pub fn standard() -> Self {
        let resolver = Resolver::new(
            ContextStore::new(),
            WebDidResolver::new(HttpFetcher::new()),
            HttpFetcher::new(),
        );

        Usecase::new(resolver, Bridge::new())
    }
}

#[async_trait]
impl<TDid, TFetch> UsecaseBuilder for Usecase<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    fn add_cache(&self, keypair: &KeyPairDescriptor) {
        self.store().insert_key_context(keypair)
    }

    async fn document_loader(
        &self,
        url: String,
        hint: Option<Value>,
    ) -> Option<ResolvedDocument> {
        self.pipeline
            .resolver()
            .resolve(url, hint)
            .await
            .into_document()
    }

    async fn sign(
        &self,
        credential: &Value,
        keypair: &KeyPairDescriptor,
        hint: Option<Value>,
    ) -> Result<Value, SatchelError> {
        self.pipeline
            .issue::<Ed25519Suite>(credential, keypair, hint)
            .await
            .map_err(|err| SatchelError::SignatureError(err.to_string()))
    }

    async fn verify(
        &self,
        credential: &Value,
        hint: Option<Value>,
    ) -> Result<VerificationResult, SatchelError> {
        self.pipeline
            .verify::<Ed25519Suite>(credential, hint)
            .await
            .map_err(|err| SatchelError::SignatureError(err.to_string()))
    }

    fn pack(&self, credential: &Value, template: &TemplateRef) -> Result<String, SatchelError> {
        self.bridge
            .pack(credential, template)
            .map_err(|err| SatchelError::CodecError(err.to_string()))
    }

    fn unpack(
        &self,
        envelope: &str,
        template: Option<&Template>,
    ) -> Result<Value, SatchelError> {
        self.bridge
            .unpack(envelope, template)
            .map_err(|err| SatchelError::CodecError(err.to_string()))
    }

    async fn sign_and_pack(
        &self,
        payload: &Value,
        keypair: &KeyPairDescriptor,
        domain: String,
        name: String,
        version: String,
        hint: Option<Value>,
    ) -> Result<String, SatchelError> {
        let signed = self.sign(payload, keypair, hint).await?;
        self.pack(&signed, &TemplateRef::cached(&name, &version, &domain))
    }

    async fn unpack_and_verify(
        &self,
        envelope: &str,
        template: Option<&Template>,
        hint: Option<Value>,
    ) -> Result<Unpacked, SatchelError> {
        let credential = self.unpack(envelope, template)?;
        let verification = self.verify(&credential, hint).await?;

        Ok(Unpacked {
            credential,
            verification,
        })
    }

    async fn try_unpack_and_verify(
        &self,
        envelope: &str,
        template: Option<&Template>,
        hint: Option<Value>,
    ) -> Option<Value> {
        match self.unpack_and_verify(envelope, template, hint).await {
            Ok(unpacked) if unpacked.verification.verified => Some(unpacked.credential),
            Ok(unpacked) => {
                debug!(
                    "[usecase] credential did not verify: {:?}",
                    unpacked.verification.error
                );
                None
            }
            Err(err) => {
                debug!("[usecase] unpack_and_verify failed: {}", err);
                None
            }
        }
    }
}
