use anyhow::Context;
use kubecheck_render::{
    RenderableDocument, RenderableLevel, RenderableReport, RenderableSeverity, RenderableSkipped,
    RenderableSummary, RenderableViolation,
};
use kubecheck_types::{
    DocumentResult, KubecheckReport, Level, ReportEnvelope, RunSummary, SCHEMA_REPORT_V1,
    Severity, SkippedSource, SourcePath, ToolMeta, Violation, ids,
};
use time::OffsetDateTime;

use crate::check::level_exit_code;

pub fn parse_report_json(text: &str) -> anyhow::Result<KubecheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse kubecheck report")
}

pub fn serialize_report(report: &KubecheckReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &KubecheckReport) -> RenderableReport {
    RenderableReport {
        verdict: renderable_level(report.verdict),
        exit_code: level_exit_code(report.verdict),
        documents: report.documents.iter().map(renderable_document).collect(),
        skipped: report.data.skipped.iter().map(renderable_skipped).collect(),
        summary: RenderableSummary {
            files_scanned: report.data.files_scanned,
            documents_scanned: report.data.documents_scanned,
            documents_ok: report.data.documents_ok,
            documents_warn: report.data.documents_warn,
            documents_error: report.data.documents_error,
            violations_total: report.data.violations_total,
        },
    }
}

fn renderable_level(level: Level) -> RenderableLevel {
    match level {
        Level::Ok => RenderableLevel::Ok,
        Level::Warn => RenderableLevel::Warn,
        Level::Error => RenderableLevel::Error,
    }
}

fn renderable_document(d: &DocumentResult) -> RenderableDocument {
    let label = match d.name.as_deref() {
        Some(name) if !name.is_empty() => format!("{}/{}", d.kind, name),
        _ => d.kind.clone(),
    };
    RenderableDocument {
        source: d.source.as_str().to_string(),
        index: d.index,
        label,
        level: renderable_level(d.level),
        violations: d.violations.iter().map(renderable_violation).collect(),
    }
}

fn renderable_violation(v: &Violation) -> RenderableViolation {
    RenderableViolation {
        severity: match v.severity {
            Severity::Warn => RenderableSeverity::Warn,
            Severity::Error => RenderableSeverity::Error,
        },
        rule: v.rule.clone(),
        message: v.message.clone(),
        help: v.help.clone(),
    }
}

fn renderable_skipped(s: &SkippedSource) -> RenderableSkipped {
    RenderableSkipped {
        source: s.source.as_str().to_string(),
        reason: s.reason.clone(),
        detail: s.detail.clone(),
    }
}

/// A report describing a run that could not complete (bad config, unreadable input, chart failure).
///
/// The verdict is `ERROR` so consumers never read a tool failure as a pass.
pub fn runtime_error_report(source: SourcePath, message: &str) -> KubecheckReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "kubecheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Level::Error,
        documents: Vec::new(),
        data: RunSummary {
            skipped: vec![SkippedSource {
                source,
                reason: ids::REASON_TOOL_ERROR.to_string(),
                detail: message.to_string(),
            }],
            ..RunSummary::default()
        },
    }
}
