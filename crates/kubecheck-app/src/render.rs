//! Render use cases: text, markdown, JSON, and GitHub annotations from in-memory reports.

use kubecheck_render::RenderableReport;
use kubecheck_types::KubecheckReport;

use crate::report::{serialize_report, to_renderable};

/// Output format for `check`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Render a report for stdout in the requested format.
pub fn render_report(report: &KubecheckReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => kubecheck_render::render_text(&to_renderable(report)),
        OutputFormat::Markdown => kubecheck_render::render_markdown(&to_renderable(report)),
        OutputFormat::Json => {
            let mut text = String::from_utf8(serialize_report(report)?)?;
            text.push('\n');
            text
        }
    })
}

pub fn render_markdown(report: &RenderableReport) -> String {
    kubecheck_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    kubecheck_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
