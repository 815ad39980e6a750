//! CLI entry point for kubecheck.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, Helm invocation, and
//! exit codes. All business logic lives in the `kubecheck-app` crate.

#![forbid(unsafe_code)]

mod helm;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use kubecheck_app::{
    CheckInput, CheckSource, ConfigInput, ExplainOutput, OutputFormat, format_explanation,
    format_not_found, format_rule, format_rules, level_exit_code, load_rules, parse_report_json,
    render_annotations, render_markdown, render_report, run_check, run_explain,
    runtime_error_report, serialize_report, to_renderable,
};
use kubecheck_repo::DiscoverOptions;
use kubecheck_settings::{ConfigFormat, Overrides};
use kubecheck_types::{KubecheckReport, SourcePath};
use std::io::Read;

/// Exit code for tool failures (bad config, unreadable input, chart rendering).
const EXIT_TOOL_ERROR: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "kubecheck",
    version,
    about = "Offline policy checks for Kubernetes manifests"
)]
struct Cli {
    /// Rule configuration file (YAML, or TOML when it ends in `.toml`). Built-in rules when omitted.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    /// Drop a loaded rule by name (repeatable).
    #[arg(long = "skip-rule", value_name = "NAME", global = true)]
    skip_rules: Vec<String>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate manifests and exit 0 (ok), 1 (warnings), or 2 (errors).
    Check {
        /// A manifest file, a directory to scan, a Helm chart directory, or `-` for stdin.
        input: String,

        /// Output format for stdout.
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Also write the JSON report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Glob (relative to the scanned directory) to leave out; a matching directory is skipped whole (repeatable).
        #[arg(long, value_name = "GLOB")]
        exclude: Vec<String>,

        /// Values file passed to `helm template` when INPUT is a chart (repeatable).
        #[arg(long = "values", short = 'f', value_name = "FILE")]
        values: Vec<Utf8PathBuf>,
    },

    /// List the effective rule set.
    Rules,

    /// Explain a rule name or condition identifier.
    Explain {
        /// Rule name (e.g. "no-latest-image") or condition (e.g. "run_as_user_zero").
        identifier: String,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long)]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("kubecheck error: {err:#}");
            EXIT_TOOL_ERROR
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    let overrides = Overrides {
        skip_rules: cli.skip_rules,
    };

    match cli.cmd {
        Commands::Check {
            input,
            format,
            report_out,
            exclude,
            values,
        } => cmd_check(
            &input,
            config,
            overrides,
            format.into(),
            report_out,
            exclude,
            values,
        ),
        Commands::Rules => cmd_rules(config, overrides),
        Commands::Explain { identifier } => cmd_explain(&identifier, config, overrides),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
    }
}

fn read_config(path: Option<&Utf8Path>) -> anyhow::Result<Option<ConfigInput>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))?;
    Ok(Some(ConfigInput {
        text,
        format: ConfigFormat::from_path(path.as_str()),
    }))
}

fn cmd_check(
    input: &str,
    config: Option<&Utf8Path>,
    overrides: Overrides,
    format: OutputFormat,
    report_out: Option<Utf8PathBuf>,
    exclude: Vec<String>,
    values: Vec<Utf8PathBuf>,
) -> anyhow::Result<i32> {
    let source_name = if input == "-" {
        SourcePath::stdin()
    } else {
        SourcePath::new(input)
    };

    match build_report(input, config, overrides, exclude, &values) {
        Ok(report) => {
            if let Some(path) = &report_out {
                write_report_file(path, &report).context("write report json")?;
            }
            print!("{}", render_report(&report, format)?);
            Ok(level_exit_code(report.verdict))
        }
        Err(err) => {
            if let Some(path) = &report_out {
                let report = runtime_error_report(source_name, &format!("{err:#}"));
                if let Err(write_err) = write_report_file(path, &report) {
                    log::warn!("could not write error report: {write_err:#}");
                }
            }
            Err(err)
        }
    }
}

fn build_report(
    input: &str,
    config: Option<&Utf8Path>,
    overrides: Overrides,
    exclude: Vec<String>,
    values: &[Utf8PathBuf],
) -> anyhow::Result<KubecheckReport> {
    let config = read_config(config)?;
    let source = resolve_source(input, exclude, values)?;
    let output = run_check(CheckInput {
        source,
        config,
        overrides,
    })?;
    Ok(output.report)
}

fn resolve_source(
    input: &str,
    exclude: Vec<String>,
    values: &[Utf8PathBuf],
) -> anyhow::Result<CheckSource> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("read stdin")?;
        return Ok(CheckSource::Text {
            source: SourcePath::stdin(),
            text,
        });
    }

    let path = Utf8PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("input does not exist: {path}");
    }

    if helm::is_helm_chart(&path) {
        log::info!("rendering Helm chart {path}");
        let text = helm::render_chart(&path, values)?;
        return Ok(CheckSource::Text {
            source: SourcePath::new(input),
            text,
        });
    }

    if !values.is_empty() {
        log::warn!("--values ignored: {path} is not a Helm chart");
    }

    Ok(CheckSource::Path {
        root: path,
        discover: DiscoverOptions {
            exclude,
            follow_links: false,
        },
    })
}

fn cmd_rules(config: Option<&Utf8Path>, overrides: Overrides) -> anyhow::Result<i32> {
    let config = read_config(config)?;
    let resolved = load_rules(config.as_ref(), overrides)?;
    print!("{}", format_rules(&resolved.rules));
    Ok(0)
}

fn cmd_explain(
    identifier: &str,
    config: Option<&Utf8Path>,
    overrides: Overrides,
) -> anyhow::Result<i32> {
    let config = read_config(config)?;
    let resolved = load_rules(config.as_ref(), overrides)?;
    match run_explain(identifier, &resolved.rules) {
        ExplainOutput::Rule { rule, guidance } => {
            print!("{}", format_rule(&rule, guidance.as_ref()));
            Ok(0)
        }
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_rules,
            available_conditions,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, &available_rules, available_conditions)
            );
            Ok(1)
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &KubecheckReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<KubecheckReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<i32> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(0)
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<i32> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(0)
}
