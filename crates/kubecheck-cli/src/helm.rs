//! Helm chart rendering via `helm template`.
//!
//! The binary defaults to `helm` on `PATH`; `KUBECHECK_HELM` overrides it.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;

/// Release name passed to `helm template`.
const RELEASE_NAME: &str = "kubecheck";

/// A directory is a chart when it holds `Chart.yaml` (or `Chart.yml`).
pub fn is_helm_chart(path: &Utf8Path) -> bool {
    path.is_dir() && (path.join("Chart.yaml").is_file() || path.join("Chart.yml").is_file())
}

fn helm_binary() -> String {
    std::env::var("KUBECHECK_HELM")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "helm".to_string())
}

/// Render `chart` to a multi-document YAML stream.
pub fn render_chart(chart: &Utf8Path, values: &[Utf8PathBuf]) -> anyhow::Result<String> {
    let helm = helm_binary();

    let mut cmd = Command::new(&helm);
    cmd.arg("template").arg(RELEASE_NAME).arg(chart.as_str());
    for v in values {
        cmd.arg("-f").arg(v.as_str());
    }
    log::debug!("running {helm} template {RELEASE_NAME} {chart} ({} values file(s))", values.len());

    let output = cmd
        .output()
        .with_context(|| format!("spawn {helm} (is Helm installed and on PATH?)"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!(
            "helm template failed for {chart} ({}): {}",
            output.status,
            stderr.trim()
        );
    }

    let text = String::from_utf8(output.stdout).context("helm output is not valid UTF-8")?;
    if !has_documents(&text) {
        anyhow::bail!("no YAML documents found in rendered chart {chart}");
    }
    Ok(text)
}

/// True when the stream holds anything besides separators, comments and blank lines.
fn has_documents(text: &str) -> bool {
    text.lines().map(str::trim).any(|line| {
        !line.is_empty() && !line.starts_with('#') && line != "---" && line != "..."
    })
}
