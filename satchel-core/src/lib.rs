//! `satchel-core` issues and verifies signed verifiable credentials on top of
//! a caching, extensible document-resolution layer, and round-trips the
//! signed credential through a compact wire encoding.
//!
//! The crate is built out of three layers plus one composition point:
//!
//! - `resolution` turns urls into documents: static vocabularies and
//!   registered key material out of the [`ContextStore`], `did:` identifiers
//!   through a pluggable DID resolver (memoized), plain http(s) urls through
//!   a network fetch (never memoized)
//! - `signature` issues a proof block over the canonical bytes of a
//!   credential and verifies it again, resolving the verification method
//!   through the same resolution layer
//! - `codec` flattens a signed credential into a compact, case folding proof
//!   envelope driven by named and versioned templates
//! - [`Usecase`] wires the three together and exposes the composed
//!   `sign_and_pack` / `unpack_and_verify` operations
//!
//! Nothing here persists beyond the lifetime of the process.

pub mod codec;
pub mod resolution;
pub mod signature;
pub mod types;
pub mod usecase;

pub use codec::{Bridge, FieldKind, Template, TemplateCache, TemplateField};
pub use codec::types::{CodecError, TemplateRef};
pub use resolution::types::{
    DidResolution, DidResolutionMetadata, DidResolverBuilder, DocumentOrigin, FetcherBuilder,
    Resolution, ResolvedDocument, ResolverError,
};
pub use resolution::{ContextStore, HttpFetcher, Resolver, WebDidResolver};
pub use signature::types::{
    ControllerDocument, Proof, SignatureError, SuiteBuilder, VerificationResult,
};
pub use signature::{Ed25519Suite, KeyPairDescriptor, Pipeline};
pub use types::{SatchelError, Unpacked, UsecaseBuilder};
pub use usecase::Usecase;
