use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use super::keypair::KeyPairDescriptor;

/// `SignatureError` provides all specific error types relate with credential
/// issuance and verification.
///
/// Only caller misuse lands here, malformed key material on issuance most of
/// all. An invalid signature during verification is a negative
/// [`VerificationResult`], not an error
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("malformed key material: {0}")]
    MalformedKeyMaterial(String),

    #[error("missing signing key")]
    MissingSigningKey,

    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("suite error: {0}")]
    SuiteError(String),
}

/// `SuiteBuilder` is a trait behavior for the opaque signature suite.
///
/// A suite is constructed either around a descriptor that carries private key
/// material (signing) or around nothing at all (verification, the public key
/// gets resolved per verification method and handed in as bytes)
pub trait SuiteBuilder: Sized {
    fn signing(descriptor: &KeyPairDescriptor) -> Result<Self, SignatureError>;
    fn verification() -> Self;

    fn suite_name(&self) -> String;

    fn sign_bytes(&self, payload: &[u8]) -> Result<Vec<u8>, SignatureError>;
    fn verify_bytes(
        &self,
        payload: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, SignatureError>;
}

/// `Proof` is the block attached to a credential at issuance
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct Proof {
    #[serde(rename = "type")]
    pub typ: String,

    pub created: String,

    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,

    #[serde(rename = "proofValue")]
    pub proof_value: String,
}

/// `ControllerDocument` asserts which verification methods an identity
/// authorizes. During verification it is synthesized fresh from the
/// credential itself and never persisted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct ControllerDocument {
    #[serde(rename = "@context")]
    pub context: String,

    pub id: String,

    #[serde(rename = "assertionMethod")]
    pub assertion_method: Vec<String>,

    pub authentication: Vec<String>,
}

impl ControllerDocument {
    pub fn new(context: String, id: String, verification_method: String) -> Self {
        Self {
            context,
            id,
            assertion_method: vec![verification_method.clone()],
            authentication: vec![verification_method],
        }
    }

    pub fn authorizes_assertion(&self, method: &str) -> bool {
        self.assertion_method.iter().any(|entry| entry == method)
    }
}

/// `VerificationResult` is the structured outcome of a verification pass, an
/// unverified credential is reported here and never thrown
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "self::serde")]
pub struct VerificationResult {
    pub verified: bool,
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn success() -> Self {
        Self {
            verified: true,
            error: None,
        }
    }

    pub fn failure(reason: String) -> Self {
        Self {
            verified: false,
            error: Some(reason),
        }
    }
}
