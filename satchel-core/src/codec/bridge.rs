use rst_common::standard::serde_json::{self, Map, Value};

use super::template::{FieldKind, Template, TemplateCache, TemplateField};
use super::types::{CodecError, TemplateRef};

/// Marker for a field the document does not carry. A literal `~` in a value
/// never collides with it, the component encoder escapes it
const ABSENT: &str = "~";

/// `Bridge` packs a structured document into its compact envelope and back.
///
/// The envelope reads `DOMAIN:NAME:VERSION:SEG/SEG/...`, one segment per
/// template field. Every component goes through an escape that keeps the
/// result stable under case folding, the `uppercase` formatting option is a
/// fixed choice for this system's callers
pub struct Bridge {
    cache: TemplateCache,
    uppercase: bool,
}

impl Bridge {
    pub fn new() -> Self {
        Self {
            cache: TemplateCache::new(),
            uppercase: true,
        }
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn pack(&self, document: &Value, template_ref: &TemplateRef) -> Result<String, CodecError> {
        let (template, domain) = match template_ref {
            TemplateRef::Explicit { template, domain } => (template.clone(), domain.clone()),
            TemplateRef::Cached {
                name,
                version,
                domain,
            } => {
                let template = self.cache.resolve(name, version, domain).ok_or_else(|| {
                    CodecError::UnknownTemplate(format!("{}:{}:{}", domain, name, version))
                })?;
                (template, domain.clone())
            }
        };

        let mut segments = Vec::with_capacity(template.fields.len());
        for field in &template.fields {
            segments.push(encode_field(document, field, self.uppercase)?);
        }

        Ok(format!(
            "{}:{}:{}:{}",
            self.encode_header(&domain),
            self.encode_header(&template.name),
            self.encode_header(&template.version),
            segments.join("/")
        ))
    }

    pub fn unpack(
        &self,
        envelope: &str,
        explicit: Option<&Template>,
    ) -> Result<Value, CodecError> {
        let parts: Vec<&str> = envelope.splitn(4, ':').collect();
        if parts.len() != 4 {
            return Err(CodecError::MalformedEnvelope(
                "expected domain:name:version:payload".to_string(),
            ));
        }

        let domain = decode_component(parts[0])?;
        let name = decode_component(parts[1])?;
        let version = decode_component(parts[2])?;

        let template = match explicit {
            Some(template) => template.clone(),
            None => self.cache.resolve(&name, &version, &domain).ok_or_else(|| {
                CodecError::UnknownTemplate(format!("{}:{}:{}", domain, name, version))
            })?,
        };

        let segments: Vec<&str> = if parts[3].is_empty() {
            Vec::new()
        } else {
            parts[3].split('/').collect()
        };
        if segments.len() != template.fields.len() {
            return Err(CodecError::MalformedEnvelope(format!(
                "expected {} segments, found {}",
                template.fields.len(),
                segments.len()
            )));
        }

        let mut document = Value::Object(Map::new());
        for (segment, field) in segments.iter().zip(template.fields.iter()) {
            if let Some(value) = decode_field(segment, field)? {
                let path: Vec<&str> = field.path.split('.').collect();
                insert_path(&mut document, &path, value)?;
            }
        }

        Ok(document)
    }

    /// Template identity is case-insensitive, so the header parts can be case
    /// folded outright instead of escaping every lowercase letter
    fn encode_header(&self, part: &str) -> String {
        if self.uppercase {
            encode_component(&part.to_uppercase(), true)
        } else {
            encode_component(part, false)
        }
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_field(
    document: &Value,
    field: &TemplateField,
    uppercase: bool,
) -> Result<String, CodecError> {
    let value = match lookup_path(document, &field.path) {
        Some(value) if !value.is_null() => value,
        _ => return Ok(ABSENT.to_string()),
    };

    let raw = match field.kind {
        FieldKind::Text => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| CodecError::FieldTypeMismatch(field.path.clone()))?,
        FieldKind::Integer => value
            .as_i64()
            .map(|number| number.to_string())
            .ok_or_else(|| CodecError::FieldTypeMismatch(field.path.clone()))?,
        FieldKind::Number => value
            .as_f64()
            .map(|number| number.to_string())
            .ok_or_else(|| CodecError::FieldTypeMismatch(field.path.clone()))?,
        FieldKind::Boolean => value
            .as_bool()
            .map(|flag| if flag { "1" } else { "0" }.to_string())
            .ok_or_else(|| CodecError::FieldTypeMismatch(field.path.clone()))?,
        FieldKind::Json => serde_json::to_string(value)
            .map_err(|err| CodecError::EncodeError(err.to_string()))?,
    };

    Ok(encode_component(&raw, uppercase))
}

fn decode_field(segment: &str, field: &TemplateField) -> Result<Option<Value>, CodecError> {
    if segment == ABSENT {
        return Ok(None);
    }

    let raw = decode_component(segment)?;
    let value = match field.kind {
        FieldKind::Text => Value::String(raw),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| {
                CodecError::MalformedEnvelope(format!("expected integer at {}", field.path))
            })?,
        FieldKind::Number => raw
            .parse::<f64>()
            .map(Value::from)
            .map_err(|_| {
                CodecError::MalformedEnvelope(format!("expected number at {}", field.path))
            })?,
        FieldKind::Boolean => match raw.as_str() {
            "1" => Value::Bool(true),
            "0" => Value::Bool(false),
            _ => {
                return Err(CodecError::MalformedEnvelope(format!(
                    "expected boolean at {}",
                    field.path
                )))
            }
        },
        FieldKind::Json => serde_json::from_str(&raw)
            .map_err(|err| CodecError::MalformedEnvelope(err.to_string()))?,
    };

    Ok(Some(value))
}

/// Escapes a component so it survives case folding: `A-Z`, `0-9`, `.` and `-`
/// pass through, everything else becomes `%XX` with uppercase hex over the
/// utf-8 bytes. With `uppercase` off, lowercase letters pass through as well
fn encode_component(raw: &str, uppercase: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        let ch = byte as char;
        let safe = ch.is_ascii_uppercase()
            || ch.is_ascii_digit()
            || ch == '.'
            || ch == '-'
            || (!uppercase && ch.is_ascii_lowercase());

        if safe {
            out.push(ch);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", byte));
        }
    }

    out
}

fn decode_component(encoded: &str) -> Result<String, CodecError> {
    let raw = encoded.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut idx = 0;

    while idx < raw.len() {
        if raw[idx] == b'%' {
            if idx + 2 >= raw.len() {
                return Err(CodecError::MalformedEnvelope(
                    "truncated escape sequence".to_string(),
                ));
            }
            let hex = std::str::from_utf8(&raw[idx + 1..idx + 3])
                .map_err(|err| CodecError::MalformedEnvelope(err.to_string()))?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| {
                CodecError::MalformedEnvelope(format!("invalid escape sequence %{}", hex))
            })?;
            bytes.push(byte);
            idx += 3;
        } else {
            bytes.push(raw[idx]);
            idx += 1;
        }
    }

    String::from_utf8(bytes).map_err(|err| CodecError::MalformedEnvelope(err.to_string()))
}

fn lookup_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

fn insert_path(root: &mut Value, segments: &[&str], value: Value) -> Result<(), CodecError> {
    let segment = segments[0];

    if let Ok(index) = segment.parse::<usize>() {
        if root.is_null() {
            *root = Value::Array(Vec::new());
        }
        let items = root
            .as_array_mut()
            .ok_or_else(|| CodecError::FieldTypeMismatch(segment.to_string()))?;
        while items.len() <= index {
            items.push(Value::Null);
        }

        if segments.len() == 1 {
            items[index] = value;
            Ok(())
        } else {
            insert_path(&mut items[index], &segments[1..], value)
        }
    } else {
        if root.is_null() {
            *root = Value::Object(Map::new());
        }
        let map = root
            .as_object_mut()
            .ok_or_else(|| CodecError::FieldTypeMismatch(segment.to_string()))?;

        if segments.len() == 1 {
            map.insert(segment.to_string(), value);
            Ok(())
        } else {
            insert_path(
                map.entry(segment.to_string()).or_insert(Value::Null),
                &segments[1..],
                value,
            )
        }
    }
}
