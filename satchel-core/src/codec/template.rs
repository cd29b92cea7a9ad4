use std::collections::HashMap;
use std::sync::RwLock;

use rst_common::standard::serde::{self, Deserialize, Serialize};

/// `FieldKind` fixes how a single template field travels on the wire
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "self::serde", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,

    /// The whole subtree at the path, serialized as JSON text. Used for
    /// fields with open shape, proof blocks and context lists most of all
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct TemplateField {
    pub path: String,
    pub kind: FieldKind,
}

impl TemplateField {
    pub fn new(path: &str, kind: FieldKind) -> Self {
        Self {
            path: path.to_string(),
            kind,
        }
    }
}

/// `Template` is a named, versioned column list describing how a structured
/// document maps onto its compact encoding. Field paths are dotted, numeric
/// segments index into arrays
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Template {
    pub name: String,
    pub version: String,
    pub fields: Vec<TemplateField>,
}

impl Template {
    pub fn new(name: &str, version: &str, fields: Vec<TemplateField>) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            fields,
        }
    }
}

/// Template identity. Envelope headers may arrive case folded, so the key is
/// normalized to lowercase on both registration and lookup
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct TemplateKey {
    name: String,
    version: String,
    domain: String,
}

impl TemplateKey {
    fn new(name: &str, version: &str, domain: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            version: version.to_lowercase(),
            domain: domain.to_lowercase(),
        }
    }
}

/// `TemplateCache` is the shared registry both pack and unpack resolve named
/// templates through
pub struct TemplateCache {
    templates: RwLock<HashMap<TemplateKey, Template>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, domain: &str, template: Template) {
        let key = TemplateKey::new(&template.name, &template.version, domain);
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(key, template);
        }
    }

    pub fn resolve(&self, name: &str, version: &str, domain: &str) -> Option<Template> {
        let key = TemplateKey::new(name, version, domain);
        let templates = self.templates.read().ok()?;
        templates.get(&key).cloned()
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_template() -> Template {
        Template::new(
            "cert",
            "1",
            vec![
                TemplateField::new("issuer", FieldKind::Text),
                TemplateField::new("credentialSubject", FieldKind::Json),
            ],
        )
    }

    #[test]
    fn test_register_and_resolve() {
        let cache = TemplateCache::new();
        cache.register("example.com", fake_template());

        let resolved = cache.resolve("cert", "1", "example.com").unwrap();
        assert_eq!(resolved, fake_template());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let cache = TemplateCache::new();
        cache.register("example.com", fake_template());

        assert!(cache.resolve("CERT", "1", "EXAMPLE.COM").is_some());
    }

    #[test]
    fn test_resolve_miss() {
        let cache = TemplateCache::new();
        cache.register("example.com", fake_template());

        assert!(cache.resolve("cert", "2", "example.com").is_none());
        assert!(cache.resolve("cert", "1", "other.example.com").is_none());
    }

    #[test]
    fn test_register_overwrites() {
        let cache = TemplateCache::new();
        cache.register("example.com", fake_template());

        let mut updated = fake_template();
        updated.fields.push(TemplateField::new("proof", FieldKind::Json));
        cache.register("example.com", updated.clone());

        assert_eq!(cache.resolve("cert", "1", "example.com").unwrap(), updated);
    }
}
