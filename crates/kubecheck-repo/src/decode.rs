use kubecheck_domain::{Resource, Value};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A source whose text could not be decoded. The whole source is rejected.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid YAML in document {document}{location}: {source}")]
    Syntax {
        /// Zero-based document position within the stream, counting empty documents.
        document: usize,
        location: Location,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid merge key in document {document}: {source}")]
    Merge {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Optional ` (line L, column C)` suffix for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Location(Option<(usize, usize)>);

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some((line, column)) => write!(f, " (line {line}, column {column})"),
            None => Ok(()),
        }
    }
}

/// Decode a multi-document YAML (or JSON) stream into resources.
///
/// Merge keys (`<<: *anchor`) are resolved. Documents without a string `kind` (empty
/// fragments between `---`, comments, scalars) are dropped. Any syntax error rejects the
/// whole stream.
pub fn decode_documents(text: &str) -> Result<Vec<Resource>, DecodeError> {
    let mut resources = Vec::new();

    for (document, de) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let mut raw = serde_yaml::Value::deserialize(de).map_err(|source| DecodeError::Syntax {
            document,
            location: Location(source.location().map(|l| (l.line(), l.column()))),
            source,
        })?;
        raw.apply_merge()
            .map_err(|source| DecodeError::Merge { document, source })?;

        let resource = Resource::from_value(to_value(raw));
        if resource.kind.is_empty() {
            log::trace!("dropping document {document}: no kind");
            continue;
        }
        resources.push(resource);
    }

    Ok(resources)
}

/// Convert a YAML tree into the domain value tree.
///
/// Tags are stripped. Scalar mapping keys are stringified; sequence or mapping keys are dropped.
pub fn to_value(raw: serde_yaml::Value) -> Value {
    match raw {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number_to_value(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Seq(items.into_iter().map(to_value).collect()),
        serde_yaml::Value::Mapping(map) => {
            let mut out = BTreeMap::new();
            for (k, v) in map {
                if let Some(key) = key_to_string(k) {
                    out.insert(key, to_value(v));
                }
            }
            Value::Map(out)
        }
        serde_yaml::Value::Tagged(tagged) => to_value(tagged.value),
    }
}

fn number_to_value(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(i)
    } else {
        n.as_f64().map(Value::Float).unwrap_or(Value::Null)
    }
}

fn key_to_string(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => key_to_string(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}
