use rst_common::standard::serde_json::{json, Value};

pub const CONTEXT_CREDENTIALS_V1: &str = "https://www.w3.org/2018/credentials/v1";
pub const CONTEXT_SECURITY_V2: &str = "https://w3id.org/security/v2";
pub const CONTEXT_SECURITY_V3: &str = "https://w3id.org/security/v3-unstable";
pub const CONTEXT_ED25519_2020_V1: &str = "https://w3id.org/security/suites/ed25519-2020/v1";

/// Abbreviated bodies of the well known vocabularies. These are the documents
/// a credential is allowed to reference without ever touching the network,
/// they get seeded into the store at construction and are never evicted
pub(crate) fn static_contexts() -> Vec<(String, Value)> {
    vec![
        (
            CONTEXT_CREDENTIALS_V1.to_string(),
            json!({
                "@context": {
                    "@version": 1.1,
                    "@protected": true,
                    "id": "@id",
                    "type": "@type",
                    "VerifiableCredential": {
                        "@id": "https://www.w3.org/2018/credentials#VerifiableCredential",
                        "@context": {
                            "@protected": true,
                            "credentialSubject": {"@id": "cred:credentialSubject", "@type": "@id"},
                            "issuanceDate": {"@id": "cred:issuanceDate", "@type": "xsd:dateTime"},
                            "issuer": {"@id": "cred:issuer", "@type": "@id"},
                            "proof": {"@id": "sec:proof", "@type": "@id", "@container": "@graph"},
                            "cred": "https://www.w3.org/2018/credentials#",
                            "sec": "https://w3id.org/security#",
                            "xsd": "http://www.w3.org/2001/XMLSchema#"
                        }
                    }
                }
            }),
        ),
        (
            CONTEXT_SECURITY_V2.to_string(),
            json!({
                "@context": {
                    "@version": 1.1,
                    "id": "@id",
                    "type": "@type",
                    "sec": "https://w3id.org/security#",
                    "assertionMethod": {"@id": "sec:assertionMethod", "@type": "@id", "@container": "@set"},
                    "authentication": {"@id": "sec:authenticationMethod", "@type": "@id", "@container": "@set"},
                    "controller": {"@id": "sec:controller", "@type": "@id"},
                    "publicKeyBase58": "sec:publicKeyBase58",
                    "verificationMethod": {"@id": "sec:verificationMethod", "@type": "@id"}
                }
            }),
        ),
        (
            CONTEXT_SECURITY_V3.to_string(),
            json!({
                "@context": {
                    "@version": 1.1,
                    "id": "@id",
                    "type": "@type",
                    "sec": "https://w3id.org/security#",
                    "assertionMethod": {"@id": "sec:assertionMethod", "@type": "@id", "@container": "@set"},
                    "authentication": {"@id": "sec:authenticationMethod", "@type": "@id", "@container": "@set"},
                    "controller": {"@id": "sec:controller", "@type": "@id"},
                    "proof": {"@id": "sec:proof", "@type": "@id", "@container": "@graph"},
                    "verificationMethod": {"@id": "sec:verificationMethod", "@type": "@id"}
                }
            }),
        ),
        (
            CONTEXT_ED25519_2020_V1.to_string(),
            json!({
                "@context": {
                    "@protected": true,
                    "id": "@id",
                    "type": "@type",
                    "Ed25519Signature2020": {
                        "@id": "https://w3id.org/security#Ed25519Signature2020",
                        "@context": {
                            "@protected": true,
                            "id": "@id",
                            "type": "@type",
                            "created": {"@id": "http://purl.org/dc/terms/created", "@type": "http://www.w3.org/2001/XMLSchema#dateTime"},
                            "proofPurpose": {"@id": "https://w3id.org/security#proofPurpose", "@type": "@vocab"},
                            "proofValue": {"@id": "https://w3id.org/security#proofValue", "@type": "https://w3id.org/security#multibase"},
                            "verificationMethod": {"@id": "https://w3id.org/security#verificationMethod", "@type": "@id"}
                        }
                    },
                    "Ed25519VerificationKey2020": {
                        "@id": "https://w3id.org/security#Ed25519VerificationKey2020",
                        "@context": {
                            "@protected": true,
                            "id": "@id",
                            "type": "@type",
                            "controller": {"@id": "https://w3id.org/security#controller", "@type": "@id"},
                            "publicKeyMultibase": {"@id": "https://w3id.org/security#publicKeyMultibase", "@type": "https://w3id.org/security#multibase"}
                        }
                    }
                }
            }),
        ),
    ]
}
