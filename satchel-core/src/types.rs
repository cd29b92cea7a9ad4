use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

use crate::codec::template::Template;
use crate::codec::types::TemplateRef;
use crate::resolution::types::ResolvedDocument;
use crate::signature::keypair::KeyPairDescriptor;
use crate::signature::types::VerificationResult;

/// `SatchelError` is the top level error, lower layers are wrapped with their
/// message preserved
#[derive(Debug, Error)]
pub enum SatchelError {
    #[error("resolver error: {0}")]
    ResolverError(String),

    #[error("signature error: {0}")]
    SignatureError(String),

    #[error("codec error: {0}")]
    CodecError(String),
}

/// `Unpacked` pairs an unpacked credential with the outcome of its
/// verification, so a caller can tell a codec failure (an `Err`) apart from a
/// credential that unpacked fine but did not verify
#[derive(Debug, Clone)]
pub struct Unpacked {
    pub credential: Value,
    pub verification: VerificationResult,
}

/// `UsecaseBuilder` is the public surface of the crate: key registration,
/// document loading, the sign/verify pipeline, the compact codec, and the
/// two composed convenience operations
#[async_trait]
pub trait UsecaseBuilder {
    /// `add_cache` registers the two documents derived from a key pair
    /// descriptor so signing and verification resolve them without any
    /// network round trip. Calling it again with the same descriptor
    /// overwrites in place
    fn add_cache(&self, keypair: &KeyPairDescriptor);

    /// `document_loader` resolves a url through the ordered fallback chain,
    /// collapsing the miss and transport failure outcomes into `None`
    async fn document_loader(
        &self,
        url: String,
        hint: Option<Value>,
    ) -> Option<ResolvedDocument>;

    async fn sign(
        &self,
        credential: &Value,
        keypair: &KeyPairDescriptor,
        hint: Option<Value>,
    ) -> Result<Value, SatchelError>;

    async fn verify(
        &self,
        credential: &Value,
        hint: Option<Value>,
    ) -> Result<VerificationResult, SatchelError>;

    fn pack(&self, credential: &Value, template: &TemplateRef) -> Result<String, SatchelError>;

    fn unpack(
        &self,
        envelope: &str,
        template: Option<&Template>,
    ) -> Result<Value, SatchelError>;

    /// `sign_and_pack` issues then packs, with no intermediate validation.
    /// Any underlying failure propagates directly
    async fn sign_and_pack(
        &self,
        payload: &Value,
        keypair: &KeyPairDescriptor,
        domain: String,
        name: String,
        version: String,
        hint: Option<Value>,
    ) -> Result<String, SatchelError>;

    /// `unpack_and_verify` unpacks then verifies, keeping the failure modes
    /// apart: codec trouble is an `Err`, a credential that does not verify
    /// comes back as `Ok` with a negative [`VerificationResult`]
    async fn unpack_and_verify(
        &self,
        envelope: &str,
        template: Option<&Template>,
        hint: Option<Value>,
    ) -> Result<Unpacked, SatchelError>;

    /// `try_unpack_and_verify` is the collapsed convenience form: the
    /// credential when everything checked out, `None` on any failure at all
    async fn try_unpack_and_verify(
        &self,
        envelope: &str,
        template: Option<&Template>,
        hint: Option<Value>,
    ) -> Option<Value>;
}
