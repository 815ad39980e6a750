use crate::{RenderableReport, RenderableSeverity};

/// Render violations as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::[{rule}] {message}`
///
/// Skipped sources are emitted as warnings tagged with the skip reason.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for doc in &report.documents {
        for v in &doc.violations {
            let level = match v.severity {
                RenderableSeverity::Error => "error",
                RenderableSeverity::Warn => "warning",
            };
            out.push(annotation(level, &doc.source, &v.rule, &v.message));
        }
    }

    for s in &report.skipped {
        out.push(annotation("warning", &s.source, &s.reason, &s.detail));
    }

    out
}

fn annotation(level: &str, path: &str, tag: &str, message: &str) -> String {
    let message = format!("[{tag}] {message}")
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    let path = path
        .replace('%', "%25")
        .replace(',', "%2C")
        .replace(':', "%3A");
    format!("::{level} file={path}::{message}")
}
