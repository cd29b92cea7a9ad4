use ed25519_dalek::SigningKey;
use rand_core::OsRng;

use rst_common::standard::serde::{self, Deserialize, Serialize};

use crate::resolution::contexts::CONTEXT_SECURITY_V2;

use super::types::ControllerDocument;

/// `KeyPairDescriptor` identifies an Ed25519 key pair together with the
/// controller identity that owns it. The private part is optional, a
/// verification only caller never holds it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct KeyPairDescriptor {
    pub id: String,
    pub controller: String,

    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: String,

    #[serde(rename = "privateKeyBase58", skip_serializing_if = "Option::is_none")]
    pub private_key_base58: Option<String>,
}

/// `PublicKeyDocument` is the minimal resolvable document derived from a
/// descriptor, keyed by the key id
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct PublicKeyDocument {
    pub id: String,
    pub controller: String,

    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: String,
}

impl KeyPairDescriptor {
    pub fn new(
        id: String,
        controller: String,
        public_key_base58: String,
        private_key_base58: Option<String>,
    ) -> Self {
        Self {
            id,
            controller,
            public_key_base58,
            private_key_base58,
        }
    }

    /// `generate` builds a descriptor around a fresh Ed25519 seed
    pub fn generate(id: String, controller: String) -> Self {
        let signing = SigningKey::generate(&mut OsRng);
        let public = bs58::encode(signing.verifying_key().to_bytes()).into_string();
        let private = bs58::encode(signing.to_bytes()).into_string();

        Self {
            id,
            controller,
            public_key_base58: public,
            private_key_base58: Some(private),
        }
    }

    pub fn public_document(&self) -> PublicKeyDocument {
        PublicKeyDocument {
            id: self.id.clone(),
            controller: self.controller.clone(),
            public_key_base58: self.public_key_base58.clone(),
        }
    }

    /// The controller document derived here declares the key as both an
    /// assertion method and an authentication method
    pub fn controller_document(&self) -> ControllerDocument {
        ControllerDocument::new(
            CONTEXT_SECURITY_V2.to_string(),
            self.controller.clone(),
            self.id.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_distinct_material() {
        let first = KeyPairDescriptor::generate(
            "did:web:a.example.com#key-1".to_string(),
            "did:web:a.example.com".to_string(),
        );
        let second = KeyPairDescriptor::generate(
            "did:web:a.example.com#key-1".to_string(),
            "did:web:a.example.com".to_string(),
        );

        assert_ne!(first.public_key_base58, second.public_key_base58);
        assert!(first.private_key_base58.is_some());
    }

    #[test]
    fn test_derived_documents() {
        let keypair = KeyPairDescriptor::generate(
            "did:web:a.example.com#key-1".to_string(),
            "did:web:a.example.com".to_string(),
        );

        let public = keypair.public_document();
        assert_eq!(public.id, keypair.id);
        assert_eq!(public.controller, keypair.controller);
        assert_eq!(public.public_key_base58, keypair.public_key_base58);

        let controller = keypair.controller_document();
        assert_eq!(controller.id, keypair.controller);
        assert_eq!(controller.assertion_method, vec![keypair.id.clone()]);
        assert_eq!(controller.authentication, vec![keypair.id.clone()]);
    }

    #[test]
    fn test_private_key_not_serialized_when_absent() {
        let keypair = KeyPairDescriptor::new(
            "did:web:a.example.com#key-1".to_string(),
            "did:web:a.example.com".to_string(),
            "4zvwRjXUKGfvwnParsHAS3H".to_string(),
            None,
        );

        let serialized = rst_common::standard::serde_json::to_string(&keypair).unwrap();
        assert!(!serialized.contains("privateKeyBase58"));
    }
}
