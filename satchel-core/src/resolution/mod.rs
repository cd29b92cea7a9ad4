//! `resolution` module provides the document resolution and caching layer.
//!
//! Everything a signing or verification pass needs to look at, context
//! vocabularies, public key documents, controller documents and DID documents,
//! flows through the [`Resolver`]. The [`ContextStore`] is the single shared
//! cache behind it, seeded with the well known static vocabularies and
//! populated further by key registration and successful DID resolutions.

pub mod contexts;
pub mod types;

pub mod store;
pub use store::ContextStore;

pub mod resolver;
pub use resolver::Resolver;

pub mod did_web;
pub use did_web::WebDidResolver;

pub mod fetcher;
pub use fetcher::HttpFetcher;
