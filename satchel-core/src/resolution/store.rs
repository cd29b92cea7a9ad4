use std::collections::HashMap;
use std::sync::RwLock;

use rst_common::standard::serde_json::{self, Value};

use crate::signature::keypair::KeyPairDescriptor;

use super::contexts;

/// `ContextStore` owns every cached document for the lifetime of the process.
///
/// It is seeded at construction with the well known static vocabularies and is
/// mutated afterwards only through the explicit insertion operations. Lookups
/// never perform I/O. Concurrent writers for the same url are last-write-wins,
/// the content behind a given url is assumed stable
pub struct ContextStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl ContextStore {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        for (url, doc) in contexts::static_contexts() {
            entries.insert(url, doc);
        }

        Self {
            entries: RwLock::new(entries),
        }
    }

    /// `lookup` is a plain map lookup, an absent url is a normal outcome
    pub fn lookup(&self, url: &str) -> Option<Value> {
        let entries = self.entries.read().ok()?;
        entries.get(url).cloned()
    }

    /// `insert_static` registers an additional non-expiring vocabulary, used by
    /// embedders that ship their own payload contexts
    pub fn insert_static(&self, url: String, document: Value) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(url, document);
        }
    }

    /// `insert_resolved` memoizes a successful DID resolution so repeat lookups
    /// for the same identifier skip the resolver. Overwrites silently
    pub fn insert_resolved(&self, url: String, document: Value) {
        self.insert_static(url, document)
    }

    /// `insert_key_context` derives and stores exactly two documents out of the
    /// given descriptor: a minimal public key document keyed by the key id and
    /// a controller document keyed by the controller id. Prior entries at those
    /// keys are overwritten, calling this twice with the same descriptor leaves
    /// the store unchanged
    pub fn insert_key_context(&self, keypair: &KeyPairDescriptor) {
        let public = keypair.public_document();
        let controller = keypair.controller_document();

        if let (Ok(public), Ok(controller)) = (
            serde_json::to_value(&public),
            serde_json::to_value(&controller),
        ) {
            self.insert_static(keypair.id.clone(), public);
            self.insert_static(keypair.controller.clone(), controller);
        }
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}
