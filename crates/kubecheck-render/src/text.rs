use crate::{RenderableLevel, RenderableReport};

const STATUS_WIDTH: usize = 48;

/// Render a plain terminal report: one status line per document, violations beneath it,
/// skipped sources, then a run summary.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for doc in &report.documents {
        let status = match doc.level {
            RenderableLevel::Ok => "PASS",
            RenderableLevel::Warn => "WARN",
            RenderableLevel::Error => "FAIL",
        };
        let target = format!("{} [{}] {}", doc.source, doc.index, doc.label);
        let dots = ".".repeat(STATUS_WIDTH.saturating_sub(target.len()).max(1));

        let errors = doc
            .violations
            .iter()
            .filter(|v| v.severity == crate::RenderableSeverity::Error)
            .count();
        let warns = doc.violations.len() - errors;
        let counts = if doc.violations.is_empty() {
            "passed".to_string()
        } else {
            format!("{errors} error(s), {warns} warning(s)")
        };
        out.push_str(&format!("{status}  {target} {dots} {counts}\n"));

        for v in &doc.violations {
            out.push_str(&format!(
                "  {:<5} {}: {}\n",
                v.severity.label(),
                v.rule,
                v.message
            ));
            if let Some(help) = &v.help {
                out.push_str(&format!("        help: {help}\n"));
            }
        }
    }

    if !report.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for s in &report.skipped {
            out.push_str(&format!("  {} ({}): {}\n", s.source, s.reason, s.detail));
        }
    }

    let sum = &report.summary;
    out.push_str(&format!(
        "\nSummary: {} file(s), {} document(s): {} OK, {} WARN, {} ERROR; {} violation(s)\n",
        sum.files_scanned,
        sum.documents_scanned,
        sum.documents_ok,
        sum.documents_warn,
        sum.documents_error,
        sum.violations_total
    ));
    let status = match report.verdict {
        RenderableLevel::Ok => "PASSED",
        RenderableLevel::Warn => "PASSED WITH WARNINGS",
        RenderableLevel::Error => "FAILED",
    };
    out.push_str(&format!("Status: {status} (exit code {})\n", report.exit_code));

    out
}
