use crate::{RenderableLevel, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# kubecheck report\n\n");
    let sum = &report.summary;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Files: {} / documents: {} ({} OK, {} WARN, {} ERROR)\n- Violations: {}\n\n",
        report.verdict.label(),
        sum.files_scanned,
        sum.documents_scanned,
        sum.documents_ok,
        sum.documents_warn,
        sum.documents_error,
        sum.violations_total
    ));

    let failing: Vec<_> = report
        .documents
        .iter()
        .filter(|d| d.level != RenderableLevel::Ok)
        .collect();

    if failing.is_empty() {
        out.push_str("No violations.\n");
    } else {
        out.push_str("## Violations\n");
        for doc in failing {
            out.push_str(&format!(
                "\n### `{}` #{}: {} ({})\n\n",
                doc.source,
                doc.index,
                doc.label,
                doc.level.label()
            ));
            out.push_str("| Severity | Rule | Message | Help |\n");
            out.push_str("|---|---|---|---|\n");
            for v in &doc.violations {
                out.push_str(&format!(
                    "| {} | `{}` | {} | {} |\n",
                    v.severity.label(),
                    v.rule,
                    escape_cell(&v.message),
                    escape_cell(v.help.as_deref().unwrap_or(""))
                ));
            }
        }
    }

    if !report.skipped.is_empty() {
        out.push_str("\n## Skipped\n\n");
        for s in &report.skipped {
            out.push_str(&format!("- `{}` ({}): {}\n", s.source, s.reason, s.detail));
        }
    }

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{document, report, violation};
    use crate::{RenderableSeverity, RenderableSkipped};

    #[test]
    fn renders_empty_report() {
        let md = render_markdown(&report(RenderableLevel::Ok, Vec::new(), Vec::new()));
        assert!(md.contains("Verdict: **OK**"));
        assert!(md.contains("No violations"));
    }

    #[test]
    fn renders_tables_for_failing_documents_only() {
        let mut v = violation(RenderableSeverity::Warn, "require-resource-limits", "a | b");
        v.help = Some("set limits.cpu and limits.memory".to_string());
        let md = render_markdown(&report(
            RenderableLevel::Warn,
            vec![
                document("ok.yaml", RenderableLevel::Ok, Vec::new()),
                document("deploy.yaml", RenderableLevel::Warn, vec![v]),
            ],
            Vec::new(),
        ));
        assert!(md.contains("Verdict: **WARN**"));
        assert!(md.contains("## Violations"));
        assert!(md.contains("### `deploy.yaml` #0: Deployment/web (WARN)"));
        assert!(!md.contains("ok.yaml"));
        assert!(md.contains("| WARN | `require-resource-limits` | a \\| b | set limits.cpu and limits.memory |"));
    }

    #[test]
    fn lists_skipped_sources() {
        let md = render_markdown(&report(
            RenderableLevel::Ok,
            Vec::new(),
            vec![RenderableSkipped {
                source: "bad.yaml".to_string(),
                reason: "decode_error".to_string(),
                detail: "boom".to_string(),
            }],
        ));
        assert!(md.contains("## Skipped\n\n- `bad.yaml` (decode_error): boom\n"));
    }
}
