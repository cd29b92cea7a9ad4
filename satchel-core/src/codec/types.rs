use rst_common::with_errors::thiserror::{self, Error};

use super::template::Template;

/// `CodecError` provides all specific error types relate with the compact
/// encoding. These represent caller misuse, unknown templates and malformed
/// envelopes fail loudly instead of degrading into empty documents
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("field type mismatch at: {0}")]
    FieldTypeMismatch(String),

    #[error("encode error: {0}")]
    EncodeError(String),
}

/// `TemplateRef` tells pack where its template comes from.
///
/// Pack and unpack must agree on the strategy, an envelope packed against an
/// explicit template is not guaranteed to round-trip through cache resolution
/// on the other end
#[derive(Debug, Clone)]
pub enum TemplateRef {
    /// Resolve through the shared [`super::template::TemplateCache`]
    Cached {
        name: String,
        version: String,
        domain: String,
    },

    /// Encode directly against the supplied template, bypassing the cache
    Explicit { template: Template, domain: String },
}

impl TemplateRef {
    pub fn cached(name: &str, version: &str, domain: &str) -> Self {
        Self::Cached {
            name: name.to_string(),
            version: version.to_string(),
            domain: domain.to_string(),
        }
    }

    pub fn explicit(template: Template, domain: &str) -> Self {
        Self::Explicit {
            template,
            domain: domain.to_string(),
        }
    }
}
