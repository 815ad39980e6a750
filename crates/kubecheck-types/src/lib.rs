//! Stable DTOs and IDs used across the kubecheck workspace.
//!
//! This crate is intentionally boring:
//! - severity and verdict levels shared by the engine and the reporters
//! - the emitted report envelope
//! - stable string IDs for built-in rules and condition identifiers
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use path::SourcePath;
pub use receipt::{
    DocumentResult, KubecheckReport, Level, ReportEnvelope, RunSummary, SCHEMA_REPORT_V1,
    Severity, SkippedSource, ToolMeta, Violation,
};
