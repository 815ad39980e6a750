use crate::SourcePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for kubecheck reports.
pub const SCHEMA_REPORT_V1: &str = "kubecheck.report.v1";

/// Severity a rule assigns to its violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Severity {
    #[serde(rename = "WARN", alias = "warn", alias = "WARNING", alias = "warning")]
    Warn,
    #[serde(rename = "ERROR", alias = "error")]
    Error,
}

impl Severity {
    /// Parse a rule severity (case-insensitive, `warning` accepted for `warn`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WARN" | "WARNING" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal verdict for a document or a whole run: `Ok < Warn < Error`.
///
/// Combining levels is a monoid: `max` is associative and commutative, `Ok` is the identity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum Level {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
}

impl Level {
    pub fn combine(self, other: Level) -> Level {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl From<Severity> for Level {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Warn => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule firing against one container.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub severity: Severity,
    /// Rule message with `{container}` already substituted.
    pub message: String,
    /// Name of the rule that produced this violation.
    pub rule: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `rule + source + document index + message`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Evaluation result for one decoded document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentResult {
    pub source: SourcePath,
    /// Zero-based position of the document within its source (after empty documents are dropped).
    pub index: u32,
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub level: Level,
    pub violations: Vec<Violation>,
}

/// A source that never reached the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedSource {
    pub source: SourcePath,
    /// Short snake_case reason token (see `ids::REASON_*`).
    pub reason: String,
    pub detail: String,
}

/// Run-level summary payload for the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    pub rules_evaluated: u32,
    pub files_scanned: u32,
    pub documents_scanned: u32,
    pub documents_ok: u32,
    pub documents_warn: u32,
    pub documents_error: u32,
    pub violations_total: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSource>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A generic report envelope.
///
/// Keeping this generic allows the summary payload to evolve while the outer shape stays stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = RunSummary> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Highest document level across the run.
    pub verdict: Level,
    pub documents: Vec<DocumentResult>,
    pub data: TData,
}

pub type KubecheckReport = ReportEnvelope<RunSummary>;
