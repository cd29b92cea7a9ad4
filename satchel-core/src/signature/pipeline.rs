use rst_common::standard::chrono::Utc;
use rst_common::standard::serde_json::{self, Value};
use rst_common::with_logging::log::warn;

use crate::resolution::contexts::CONTEXT_SECURITY_V3;
use crate::resolution::resolver::Resolver;
use crate::resolution::types::{DidResolverBuilder, FetcherBuilder, Resolution};

use super::keypair::KeyPairDescriptor;
use super::suite::canonical_bytes;
use super::types::{
    ControllerDocument, Proof, SignatureError, SuiteBuilder, VerificationResult,
};

pub const PROOF_PURPOSE_ASSERTION: &str = "assertionMethod";

/// `Pipeline` issues and verifies signed credentials on top of the
/// [`Resolver`], with the cryptographic work delegated to an opaque
/// [`SuiteBuilder`]
pub struct Pipeline<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    resolver: Resolver<TDid, TFetch>,
}

impl<TDid, TFetch> Pipeline<TDid, TFetch>
where
    TDid: DidResolverBuilder + Send + Sync,
    TFetch: FetcherBuilder + Send + Sync,
{
    pub fn new(resolver: Resolver<TDid, TFetch>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver<TDid, TFetch> {
        &self.resolver
    }

    /// `issue` produces a new credential carrying a proof block.
    ///
    /// The input is shallow copied, any pre-existing proof is discarded before
    /// signing. Context urls are resolved best-effort through the resolver,
    /// a miss is logged and issuance keeps going. Malformed key material is
    /// the one hard failure here
    pub async fn issue<TSuite>(
        &self,
        credential: &Value,
        keypair: &KeyPairDescriptor,
        hint: Option<Value>,
    ) -> Result<Value, SignatureError>
    where
        TSuite: SuiteBuilder,
    {
        let suite = TSuite::signing(keypair)?;

        let mut signed = credential.clone();
        let body = signed.as_object_mut().ok_or_else(|| {
            SignatureError::MalformedCredential("credential must be a JSON object".to_string())
        })?;
        body.remove("proof");

        self.resolve_contexts(&signed, hint).await;

        let payload = canonical_bytes(&signed);
        let signature = suite.sign_bytes(&payload)?;

        let proof = Proof {
            typ: suite.suite_name(),
            created: Utc::now().to_rfc3339(),
            verification_method: keypair.id.clone(),
            proof_purpose: PROOF_PURPOSE_ASSERTION.to_string(),
            proof_value: bs58::encode(signature).into_string(),
        };

        let proof = serde_json::to_value(proof)
            .map_err(|err| SignatureError::SuiteError(err.to_string()))?;
        if let Some(body) = signed.as_object_mut() {
            body.insert("proof".to_string(), proof);
        }

        Ok(signed)
    }

    /// `verify` runs the suite against a signed credential.
    ///
    /// The controller consulted for authorization is always synthesized from
    /// the credential's own issuer and verification method, a caller cannot
    /// substitute an external authority. Every negative condition, missing
    /// proof, unresolvable verification method, signature mismatch, lands in
    /// the returned [`VerificationResult`], never in `Err`
    pub async fn verify<TSuite>(
        &self,
        credential: &Value,
        hint: Option<Value>,
    ) -> Result<VerificationResult, SignatureError>
    where
        TSuite: SuiteBuilder,
    {
        let proof: Proof = match credential.get("proof").cloned().map(serde_json::from_value) {
            Some(Ok(proof)) => proof,
            Some(Err(err)) => {
                return Ok(VerificationResult::failure(format!(
                    "malformed proof: {}",
                    err
                )))
            }
            None => {
                return Ok(VerificationResult::failure(
                    "credential carries no proof".to_string(),
                ))
            }
        };

        let suite = TSuite::verification();
        if proof.typ != suite.suite_name() {
            return Ok(VerificationResult::failure(format!(
                "unsupported proof suite: {}",
                proof.typ
            )));
        }

        let issuer = match issuer_id(credential) {
            Some(issuer) => issuer,
            None => {
                return Ok(VerificationResult::failure(
                    "credential carries no issuer".to_string(),
                ))
            }
        };

        let controller = ControllerDocument::new(
            CONTEXT_SECURITY_V3.to_string(),
            issuer,
            proof.verification_method.clone(),
        );
        if !controller.authorizes_assertion(&proof.verification_method) {
            return Ok(VerificationResult::failure(
                "verification method not authorized for assertion".to_string(),
            ));
        }

        let resolution = self
            .resolver
            .resolve(proof.verification_method.clone(), hint)
            .await;
        let method_document = match resolution.into_document() {
            Some(resolved) => resolved.document,
            None => {
                return Ok(VerificationResult::failure(format!(
                    "verification method could not be resolved: {}",
                    proof.verification_method
                )))
            }
        };

        let public_key =
            match extract_public_key(&method_document, &proof.verification_method) {
                Some(key) => key,
                None => {
                    return Ok(VerificationResult::failure(
                        "resolved document carries no usable public key".to_string(),
                    ))
                }
            };

        let public_key = match bs58::decode(public_key.as_str()).into_vec() {
            Ok(bytes) => bytes,
            Err(err) => {
                return Ok(VerificationResult::failure(format!(
                    "malformed public key material: {}",
                    err
                )))
            }
        };

        let signature = match bs58::decode(proof.proof_value.as_str()).into_vec() {
            Ok(bytes) => bytes,
            Err(err) => {
                return Ok(VerificationResult::failure(format!(
                    "malformed proof value: {}",
                    err
                )))
            }
        };

        let mut unsecured = credential.clone();
        if let Some(body) = unsecured.as_object_mut() {
            body.remove("proof");
        }
        let payload = canonical_bytes(&unsecured);

        match suite.verify_bytes(&payload, &signature, &public_key) {
            Ok(true) => Ok(VerificationResult::success()),
            Ok(false) => Ok(VerificationResult::failure(
                "signature mismatch".to_string(),
            )),
            Err(err) => Ok(VerificationResult::failure(err.to_string())),
        }
    }

    async fn resolve_contexts(&self, credential: &Value, hint: Option<Value>) {
        let urls: Vec<String> = match credential.get("@context") {
            Some(Value::String(url)) => vec![url.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        };

        for url in urls {
            match self.resolver.resolve(url.clone(), hint.clone()).await {
                Resolution::Found(_) => {}
                Resolution::Missing => warn!("[pipeline] context unknown: {}", url),
                Resolution::Unreachable(err) => {
                    warn!("[pipeline] context unreachable: {}: {}", url, err)
                }
            }
        }
    }
}

fn issuer_id(credential: &Value) -> Option<String> {
    match credential.get("issuer") {
        Some(Value::String(issuer)) => Some(issuer.clone()),
        Some(Value::Object(issuer)) => issuer
            .get("id")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

/// Pulls base58 key material out of a resolved document: either a bare public
/// key document, a multibase carrying document, or a full DID document whose
/// `verificationMethod` list contains the method
fn extract_public_key(document: &Value, method_id: &str) -> Option<String> {
    if let Some(key) = document.get("publicKeyBase58").and_then(Value::as_str) {
        return Some(key.to_string());
    }

    if let Some(multibase) = document.get("publicKeyMultibase").and_then(Value::as_str) {
        // multibase base58btc carries a 'z' prefix
        return multibase.strip_prefix('z').map(String::from);
    }

    if let Some(methods) = document.get("verificationMethod").and_then(Value::as_array) {
        for method in methods {
            if method.get("id").and_then(Value::as_str) == Some(method_id) {
                return extract_public_key(method, method_id);
            }
        }
    }

    None
}
