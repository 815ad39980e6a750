//! Use case orchestration for kubecheck.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing, process spawning, and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;
mod rules;

pub use check::{
    CheckInput, CheckOutput, CheckSource, ConfigInput, evaluate_sources, level_exit_code,
    load_rules, run_check,
};
pub use explain::{
    ExplainOutput, RuleSummary, format_explanation, format_not_found, format_rule, run_explain,
};
pub use render::{OutputFormat, render_annotations, render_markdown, render_report};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use rules::format_rules;
