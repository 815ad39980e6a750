use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a violation.
///
/// Identity fields, joined with `|`:
/// - rule name
/// - source path
/// - document index within the source
/// - substituted message (carries the container name)
pub fn fingerprint_for_violation(rule: &str, source: &str, index: u32, message: &str) -> String {
    let index = index.to_string();
    let canonical = [rule, source, index.as_str(), message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
