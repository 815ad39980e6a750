//! Shared test utilities for the kubecheck workspace.
//!
//! `xtask` uses `normalize_nondeterministic` at runtime when comparing fixture
//! output against golden reports, so this lives in its own crate rather than
//! behind `#[cfg(test)]`.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` is replaced only when the root object is a report envelope
///   (`schema`, `tool`, `verdict`, `documents` and `data` are all present), so
///   manifest content that happens to carry a `tool` key is left alone.
/// - `started_at` / `finished_at` are replaced at the root only; they are the
///   only timestamps a report carries.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };

    let is_envelope = ["schema", "tool", "verdict", "documents", "data"]
        .iter()
        .all(|k| obj.contains_key(*k));
    if !is_envelope {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool")
        && let Some(tool_obj) = tool.as_object_mut()
        && tool_obj.contains_key("version")
    {
        tool_obj.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }

    for key in ["started_at", "finished_at"] {
        if obj.contains_key(key) {
            obj.insert(key.to_string(), Value::String(TIMESTAMP_PLACEHOLDER.to_string()));
        }
    }

    value
}

/// Rewrite every document and skipped `source` that starts with `prefix` to be
/// relative to it, using forward slashes.
///
/// Reports produced from a temp directory carry absolute sources; stripping
/// the prefix makes them comparable across machines. Fingerprints are hashed
/// over the original source and are dropped from rewritten documents.
pub fn relativize_sources(mut value: Value, prefix: &str) -> Value {
    let prefix = prefix.replace('\\', "/");
    let prefix = prefix.trim_end_matches('/');

    let rewrite = |v: &mut Value| -> bool {
        let Some(s) = v.as_str() else {
            return false;
        };
        let s = s.replace('\\', "/");
        match s.strip_prefix(prefix) {
            Some(rest) => {
                *v = Value::String(rest.trim_start_matches('/').to_string());
                true
            }
            None => false,
        }
    };

    if let Some(docs) = value.get_mut("documents").and_then(Value::as_array_mut) {
        for doc in docs {
            let rewritten = doc.get_mut("source").map(rewrite).unwrap_or(false);
            if rewritten
                && let Some(violations) = doc.get_mut("violations").and_then(Value::as_array_mut)
            {
                for v in violations {
                    if let Some(obj) = v.as_object_mut() {
                        obj.remove("fingerprint");
                    }
                }
            }
        }
    }

    if let Some(skipped) = value
        .get_mut("data")
        .and_then(|d| d.get_mut("skipped"))
        .and_then(Value::as_array_mut)
    {
        for entry in skipped {
            if let Some(source) = entry.get_mut("source") {
                rewrite(source);
            }
        }
    }

    value
}
