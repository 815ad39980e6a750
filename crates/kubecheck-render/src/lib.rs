//! Rendering utilities for terminals and CI surfaces (plain text, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableDocument, RenderableLevel, RenderableReport, RenderableSeverity, RenderableSkipped,
    RenderableSummary, RenderableViolation,
};
pub use text::render_text;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::*;

    pub fn violation(severity: RenderableSeverity, rule: &str, message: &str) -> RenderableViolation {
        RenderableViolation {
            severity,
            rule: rule.to_string(),
            message: message.to_string(),
            help: None,
        }
    }

    pub fn document(source: &str, level: RenderableLevel, violations: Vec<RenderableViolation>) -> RenderableDocument {
        RenderableDocument {
            source: source.to_string(),
            index: 0,
            label: "Deployment/web".to_string(),
            level,
            violations,
        }
    }

    pub fn report(
        verdict: RenderableLevel,
        documents: Vec<RenderableDocument>,
        skipped: Vec<RenderableSkipped>,
    ) -> RenderableReport {
        let count = |lvl: RenderableLevel| documents.iter().filter(|d| d.level == lvl).count() as u32;
        let summary = RenderableSummary {
            files_scanned: documents.len() as u32 + skipped.len() as u32,
            documents_scanned: documents.len() as u32,
            documents_ok: count(RenderableLevel::Ok),
            documents_warn: count(RenderableLevel::Warn),
            documents_error: count(RenderableLevel::Error),
            violations_total: documents.iter().map(|d| d.violations.len() as u32).sum(),
        };
        RenderableReport {
            verdict,
            exit_code: match verdict {
                RenderableLevel::Ok => 0,
                RenderableLevel::Warn => 1,
                RenderableLevel::Error => 2,
            },
            documents,
            skipped,
            summary,
        }
    }
}
