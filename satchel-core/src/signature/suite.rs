use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use rst_common::standard::serde_json::Value;

use super::keypair::KeyPairDescriptor;
use super::types::{SignatureError, SuiteBuilder};

pub const SUITE_ED25519_2020: &str = "Ed25519Signature2020";

/// `Ed25519Suite` is the concrete signature suite, key material travels
/// base58 encoded inside [`KeyPairDescriptor`] and resolved documents
pub struct Ed25519Suite {
    signing_key: Option<SigningKey>,
}

impl SuiteBuilder for Ed25519Suite {
    fn signing(descriptor: &KeyPairDescriptor) -> Result<Self, SignatureError> {
        let private = descriptor
            .private_key_base58
            .as_ref()
            .ok_or(SignatureError::MissingSigningKey)?;

        let bytes = bs58::decode(private.as_str())
            .into_vec()
            .map_err(|err| SignatureError::MalformedKeyMaterial(err.to_string()))?;

        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            SignatureError::MalformedKeyMaterial("ed25519 seed must be 32 bytes".to_string())
        })?;

        Ok(Self {
            signing_key: Some(SigningKey::from_bytes(&seed)),
        })
    }

    fn verification() -> Self {
        Self { signing_key: None }
    }

    fn suite_name(&self) -> String {
        SUITE_ED25519_2020.to_string()
    }

    fn sign_bytes(&self, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(SignatureError::MissingSigningKey)?;

        Ok(key.sign(payload).to_bytes().to_vec())
    }

    fn verify_bytes(
        &self,
        payload: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, SignatureError> {
        let key_bytes: [u8; 32] = public_key.try_into().map_err(|_| {
            SignatureError::MalformedKeyMaterial("ed25519 public key must be 32 bytes".to_string())
        })?;

        let verifying = VerifyingKey::from_bytes(&key_bytes)
            .map_err(|err| SignatureError::MalformedKeyMaterial(err.to_string()))?;

        let signature_bytes: [u8; 64] = signature.try_into().map_err(|_| {
            SignatureError::SuiteError("ed25519 signature must be 64 bytes".to_string())
        })?;
        let signature = Signature::from_bytes(&signature_bytes);

        Ok(verifying.verify(payload, &signature).is_ok())
    }
}

/// Deterministic byte serialization the suite signs over. Object members are
/// emitted in sorted key order so two structurally equal documents always
/// produce the same bytes, whatever shape they arrived in
pub fn canonical_bytes(value: &Value) -> Vec<u8> {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out.into_bytes()
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (idx, key) in keys.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        other => out.push_str(&other.to_string()),
    }
}
