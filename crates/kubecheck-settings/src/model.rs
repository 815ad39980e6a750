use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rule configuration file, schema v1.
///
/// The same shape is read from YAML (`rules:` list) and TOML (`[[rules]]`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfigV1 {
    /// Optional schema string for tooling (`kubecheck.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Ordered rules. Replaces the built-in set when present.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Unique rule name.
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// `ERROR` or `WARN` (case-insensitive, `WARNING` accepted).
    pub severity: String,

    /// Free-form category such as `image`, `resources`, `security`.
    #[serde(rename = "type", default)]
    pub category: String,

    /// Condition expressions, `identifier` or `identifier:parameter`. OR'd in order.
    #[serde(default)]
    pub conditions: Vec<String>,

    /// Message template; `{container}` is replaced with the container name.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}
