//! The `check` use case: load rules, decode manifests, evaluate, and produce a report.

use anyhow::Context;
use camino::Utf8PathBuf;
use kubecheck_domain::{RuleSet, evaluate_document, fingerprint::fingerprint_for_violation, run_level};
use kubecheck_repo::{DiscoverOptions, LoadedSources};
use kubecheck_settings::{ConfigFormat, Overrides, ResolvedConfig};
use kubecheck_types::{
    DocumentResult, KubecheckReport, Level, ReportEnvelope, RunSummary, SCHEMA_REPORT_V1,
    SourcePath, ToolMeta,
};
use rayon::prelude::*;
use time::OffsetDateTime;

/// Rule configuration text plus its encoding.
#[derive(Clone, Debug)]
pub struct ConfigInput {
    pub text: String,
    pub format: ConfigFormat,
}

/// Where the manifests come from.
#[derive(Clone, Debug)]
pub enum CheckSource {
    /// A file or a directory to walk.
    Path {
        root: Utf8PathBuf,
        discover: DiscoverOptions,
    },
    /// Already-read text (stdin, rendered chart) under a synthetic source name.
    Text { source: SourcePath, text: String },
}

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput {
    pub source: CheckSource,
    /// `None` means the built-in rules.
    pub config: Option<ConfigInput>,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: KubecheckReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Parse and resolve the rule configuration (built-in rules when `config` is `None`).
pub fn load_rules(config: Option<&ConfigInput>, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = match config {
        Some(c) => kubecheck_settings::parse_config(&c.text, c.format).context("parse config")?,
        None => kubecheck_settings::default_config(),
    };
    kubecheck_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the check use case: resolve rules, load sources, evaluate every document, build the report.
pub fn run_check(input: CheckInput) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = load_rules(input.config.as_ref(), input.overrides)?;
    log::info!("loaded {} rule(s)", resolved.rules.len());

    let loaded = match input.source {
        CheckSource::Path { root, discover } => {
            let paths = kubecheck_repo::discover_documents(&root, &discover)
                .with_context(|| format!("discover manifests under {root}"))?;
            log::info!("checking {} file(s) under {root}", paths.len());
            kubecheck_repo::load_sources(&paths)
        }
        CheckSource::Text { source, text } => {
            let mut loaded = LoadedSources::default();
            loaded.push_text(source, &text);
            loaded
        }
    };

    let documents = evaluate_sources(&loaded, &resolved.rules);
    let verdict = run_level(documents.iter().map(|d| d.level));
    let data = summarize(&loaded, &documents, resolved.rules.len());

    let finished_at = OffsetDateTime::now_utc();
    log::debug!(
        "evaluated {} document(s) in {} ms",
        documents.len(),
        (finished_at - started_at).whole_milliseconds()
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "kubecheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict,
        documents,
        data,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Evaluate every decoded document in parallel, keeping source and document order.
pub fn evaluate_sources(loaded: &LoadedSources, rules: &RuleSet) -> Vec<DocumentResult> {
    let jobs: Vec<_> = loaded
        .sources
        .iter()
        .flat_map(|src| {
            src.resources
                .iter()
                .enumerate()
                .map(move |(index, resource)| (&src.source, index as u32, resource))
        })
        .collect();

    jobs.into_par_iter()
        .map(|(source, index, resource)| {
            let mut report = evaluate_document(resource, rules);
            log::debug!(
                "{source} [{index}] {}: {} error(s), {} warning(s)",
                resource.kind,
                report.counts.error,
                report.counts.warn
            );
            for v in &mut report.violations {
                v.fingerprint = Some(fingerprint_for_violation(
                    &v.rule,
                    source.as_str(),
                    index,
                    &v.message,
                ));
            }
            DocumentResult {
                source: source.clone(),
                index,
                api_version: resource.api_version.clone(),
                kind: resource.kind.clone(),
                name: resource.name().map(str::to_string),
                namespace: resource.namespace().map(str::to_string),
                level: report.level,
                violations: report.violations,
            }
        })
        .collect()
}

fn summarize(loaded: &LoadedSources, documents: &[DocumentResult], rules: usize) -> RunSummary {
    let count = |level: Level| documents.iter().filter(|d| d.level == level).count() as u32;
    RunSummary {
        rules_evaluated: rules as u32,
        files_scanned: loaded.files_scanned() as u32,
        documents_scanned: documents.len() as u32,
        documents_ok: count(Level::Ok),
        documents_warn: count(Level::Warn),
        documents_error: count(Level::Error),
        violations_total: documents.iter().map(|d| d.violations.len() as u32).sum(),
        skipped: loaded.skipped.clone(),
    }
}

/// Map the run level to the process exit code: 0 = OK, 1 = WARN, 2 = ERROR.
pub fn level_exit_code(level: Level) -> i32 {
    match level {
        Level::Ok => 0,
        Level::Warn => 1,
        Level::Error => 2,
    }
}
