use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used for documents read from standard input.
pub const STDIN_SOURCE: &str = "<stdin>";

/// Canonical display path for the file a document came from.
///
/// Normalization rules are intentionally simple and deterministic:
/// - always forward slashes (`/`)
/// - no leading `./`
/// - an empty input becomes `<stdin>`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SourcePath(String);

impl Default for SourcePath {
    fn default() -> Self {
        SourcePath::stdin()
    }
}

impl SourcePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().replace('\\', "/");
        while v.starts_with("./") {
            v = v.trim_start_matches("./").to_string();
        }
        if v.is_empty() {
            v = STDIN_SOURCE.to_string();
        }
        Self(v)
    }

    pub fn stdin() -> Self {
        Self(STDIN_SOURCE.to_string())
    }

    pub fn is_stdin(&self) -> bool {
        self.0 == STDIN_SOURCE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&Utf8Path> for SourcePath {
    fn from(value: &Utf8Path) -> Self {
        SourcePath::new(value.as_str())
    }
}

impl From<Utf8PathBuf> for SourcePath {
    fn from(value: Utf8PathBuf) -> Self {
        SourcePath::new(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_dot_prefix() {
        assert_eq!(SourcePath::new(".\\k8s\\app.yaml").as_str(), "k8s/app.yaml");
        assert_eq!(SourcePath::new("././a.yml").as_str(), "a.yml");
    }

    #[test]
    fn empty_is_stdin() {
        assert!(SourcePath::new("").is_stdin());
        assert_eq!(SourcePath::default().as_str(), STDIN_SOURCE);
    }
}
