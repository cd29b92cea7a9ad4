use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

/// `ResolverError` provides all specific error types relate with document
/// resolution activities
#[derive(Debug, Error, Clone)]
pub enum ResolverError {
    #[error("did resolution error: {0}")]
    DIDResolutionError(String),

    #[error("fetch error: {0}")]
    FetchError(String),

    #[error("parse error: {0}")]
    ParseError(String),
}

/// `DidResolutionMetadata` mirrors the metadata block a DID resolver hands back
/// next to the resolved document. A well-formed but unresolvable DID must be
/// reported through the `error` field here, never through [`ResolverError`]
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(crate = "self::serde")]
pub struct DidResolutionMetadata {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct DidResolution {
    pub did_document: Option<Value>,
    pub metadata: DidResolutionMetadata,
}

impl DidResolution {
    pub fn resolved(document: Value) -> Self {
        Self {
            did_document: Some(document),
            metadata: DidResolutionMetadata::default(),
        }
    }

    pub fn failed(error: String, message: String) -> Self {
        Self {
            did_document: None,
            metadata: DidResolutionMetadata {
                error: Some(error),
                message: Some(message),
            },
        }
    }
}

/// `DidResolverBuilder` is a trait behavior for the DID resolution capability.
///
/// Implementers may return `Err` only for transport level failures, the caller
/// treats those as soft failures and keeps going
#[async_trait]
pub trait DidResolverBuilder {
    async fn resolve_did(
        &self,
        did: String,
        hint: Option<Value>,
    ) -> Result<DidResolution, ResolverError>;
}

/// `FetcherBuilder` is a trait behavior for the plain network fetch capability
#[async_trait]
pub trait FetcherBuilder {
    async fn fetch_json(&self, url: String) -> Result<Value, ResolverError>;
}

/// `DocumentOrigin` tells a caller which of the resolution paths produced
/// a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    /// Served from the [`crate::resolution::store::ContextStore`]
    Cache,

    /// Taken from the caller supplied public document
    Injected,

    /// Resolved through the DID capability
    Resolved,

    /// Fetched over plain http(s), re-fetched on every call
    Fetched,
}

#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub url: String,
    pub document: Value,
    pub origin: DocumentOrigin,
    pub cacheable: bool,
}

/// `Resolution` is the outcome of a single resolver pass.
///
/// `Missing` means the url is authoritatively unknown, `Unreachable` means a
/// capability failed in transit and nothing can be said about the document.
/// Callers that do not care about the difference collapse both through
/// [`Resolution::into_document`]
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(ResolvedDocument),
    Missing,
    Unreachable(String),
}

impl Resolution {
    pub fn into_document(self) -> Option<ResolvedDocument> {
        match self {
            Resolution::Found(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}
