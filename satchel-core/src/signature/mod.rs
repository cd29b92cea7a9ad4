//! `signature` module provides the issue and verify pipeline for signed
//! credentials.
//!
//! The [`Pipeline`] pulls every document it needs, contexts, public keys,
//! DID documents, through the resolution layer, and delegates the actual
//! cryptography to an opaque suite behind [`types::SuiteBuilder`]. The
//! shipped suite is [`Ed25519Suite`].

pub mod types;

pub mod keypair;
pub use keypair::KeyPairDescriptor;

pub mod suite;
pub use suite::Ed25519Suite;

pub mod pipeline;
pub use pipeline::Pipeline;
