//! Developer tasks (schema generation, fixture checks, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use kubecheck_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(kubecheck_types::KubecheckReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(kubecheck_settings::RuleConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "kubecheck.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "kubecheck.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run the kubecheck binary on tests/fixtures and check reports");
    eprintln!("  bless-fixtures    Rewrite expected.report.json for every fixture with one");
    eprintln!("  explain-coverage  Validate all rules and conditions have explanations");
}

/// Token pattern for skip reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// No absolute paths, no `..`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.split('/').any(|seg| seg == "..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

fn kubecheck_bin() -> anyhow::Result<PathBuf> {
    let bin = project_root().join("target").join("debug").join("kubecheck");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "kubecheck binary not found at {}.\nRun `cargo build -p kubecheck-cli` first.",
            bin.display()
        );
    }
    Ok(bin)
}

/// Fixture directories that carry a golden report.
fn golden_fixtures() -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(fixtures_dir()).context("Failed to read tests/fixtures/")? {
        let dir = entry?.path();
        if !dir.is_dir() || !dir.join("expected.report.json").exists() {
            continue;
        }
        let name = dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        out.push((name, dir));
    }
    out.sort();
    Ok(out)
}

/// Run the binary from inside `fixture_dir` and return the JSON report it wrote.
fn run_fixture(bin: &Path, fixture_dir: &Path) -> anyhow::Result<(Option<i32>, serde_json::Value)> {
    let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
    let report_out = temp_dir.path().join("report.json");

    let output = std::process::Command::new(bin)
        .current_dir(fixture_dir)
        .arg("check")
        .arg(".")
        .arg("--report-out")
        .arg(&report_out)
        .output()
        .with_context(|| format!("Failed to run kubecheck in {}", fixture_dir.display()))?;

    let content = fs::read_to_string(&report_out).with_context(|| {
        format!(
            "no report written (exit {:?}): {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        )
    })?;
    let value = serde_json::from_str(&content).context("Failed to parse report")?;
    Ok((output.status.code(), value))
}

fn report_hygiene(report: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let documents = report["documents"].as_array().cloned().unwrap_or_default();
    for doc in &documents {
        let source = doc["source"].as_str().unwrap_or_default();
        if !is_clean_path(source) {
            errors.push(format!("unclean document source: {source}"));
        }
    }

    let skipped = report["data"]["skipped"].as_array().cloned().unwrap_or_default();
    for s in &skipped {
        let reason = s["reason"].as_str().unwrap_or_default();
        if !is_valid_token(reason) {
            errors.push(format!("invalid skip reason token: {reason}"));
        }
    }

    errors
}

/// Validate binary output on every golden fixture: schema, hygiene, golden match, exit code.
fn conform() -> anyhow::Result<()> {
    let bin = kubecheck_bin()?;
    let schema = serde_json::to_value(generate_report_schema())?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))?;

    let mut errors = Vec::new();
    let fixtures = golden_fixtures()?;

    for (name, dir) in &fixtures {
        let (code, report) = match run_fixture(&bin, dir) {
            Ok(r) => r,
            Err(err) => {
                errors.push(format!("fixture '{name}': {err:#}"));
                continue;
            }
        };

        for err in validator.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }
        for err in report_hygiene(&report) {
            errors.push(format!("fixture '{name}': {err}"));
        }

        let expected_code = match report["verdict"].as_str() {
            Some("OK") => Some(0),
            Some("WARN") => Some(1),
            _ => Some(2),
        };
        if code != expected_code {
            errors.push(format!(
                "fixture '{name}': exit code {code:?} does not match verdict {}",
                report["verdict"]
            ));
        }

        let golden_path = dir.join("expected.report.json");
        let golden: serde_json::Value = serde_json::from_str(&fs::read_to_string(&golden_path)?)?;
        if normalize_nondeterministic(report) != normalize_nondeterministic(golden) {
            errors.push(format!("fixture '{name}': output differs from expected.report.json"));
        } else {
            println!("  ✓ fixture '{name}' matches golden report");
        }
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance failed with {} errors", errors.len());
    }

    println!("\n✓ {} fixtures conform", fixtures.len());
    Ok(())
}

/// Regenerate golden reports from the current binary.
fn bless_fixtures() -> anyhow::Result<()> {
    let bin = kubecheck_bin()?;
    for (name, dir) in golden_fixtures()? {
        let (_, report) = run_fixture(&bin, &dir)?;
        let mut json = serde_json::to_string_pretty(&normalize_nondeterministic(report))?;
        json.push('\n');
        let path = dir.join("expected.report.json");
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Blessed {name}");
    }
    Ok(())
}

/// Validate that all built-in rules and condition identifiers have explanations,
/// and that every built-in rule is covered.
fn explain_coverage() -> anyhow::Result<()> {
    let rule_names = kubecheck_types::explain::all_rule_names();
    let conditions = kubecheck_types::explain::all_conditions();

    let mut errors = Vec::new();

    for (kind, ids) in [("Rule", rule_names), ("Condition", conditions)] {
        for id in ids {
            match kubecheck_types::lookup_explanation(id) {
                Some(exp) => {
                    if exp.title.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty title"));
                    }
                    if exp.description.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty description"));
                    }
                    if exp.remediation.is_empty() {
                        errors.push(format!("{kind} '{id}' has empty remediation"));
                    }
                }
                None => errors.push(format!("{kind} '{id}' has no explanation")),
            }
        }
    }

    for rule in kubecheck_settings::default_config().rules {
        if !rule_names.contains(&rule.name.as_str()) {
            errors.push(format!("built-in rule '{}' missing from the registry", rule.name));
        }
        for cond in &rule.conditions {
            let head = cond.split_once(':').map_or(cond.as_str(), |(h, _)| h);
            if !conditions.contains(&head) {
                errors.push(format!(
                    "condition '{head}' of built-in rule '{}' missing from the registry",
                    rule.name
                ));
            }
        }
    }

    if errors.is_empty() {
        println!("✓ {} rules have explanations", rule_names.len());
        println!("✓ {} conditions have explanations", conditions.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("Explain coverage validation failed with {} errors", errors.len())
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "bless-fixtures" => bless_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", kubecheck_types::SCHEMA_REPORT_V1);
            println!("{}", kubecheck_types::ids::SCHEMA_CONFIG_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
