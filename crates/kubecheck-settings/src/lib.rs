//! Rule configuration parsing, built-in rules, and compilation into a rule set.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

use anyhow::Context;

pub use model::{RuleConfig, RuleConfigV1};
pub use presets::default_config;
pub use resolve::{Overrides, ResolvedConfig};

/// Encoding of a rule configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from a file name: `.toml` is TOML, anything else YAML.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".toml") {
            ConfigFormat::Toml
        } else {
            ConfigFormat::Yaml
        }
    }
}

/// Parse a YAML rule file (`rules:` list) into a typed model.
pub fn parse_config_yaml(input: &str) -> anyhow::Result<RuleConfigV1> {
    let cfg: RuleConfigV1 =
        serde_yaml::from_str(input).context("failed to parse YAML rule config")?;
    Ok(cfg)
}

/// Parse a TOML rule file (`[[rules]]` tables) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<RuleConfigV1> {
    let cfg: RuleConfigV1 = toml::from_str(input).context("failed to parse TOML rule config")?;
    Ok(cfg)
}

pub fn parse_config(input: &str, format: ConfigFormat) -> anyhow::Result<RuleConfigV1> {
    match format {
        ConfigFormat::Yaml => parse_config_yaml(input),
        ConfigFormat::Toml => parse_config_toml(input),
    }
}

/// Validate `cfg`, compile it into a rule set, and apply overrides.
pub fn resolve_config(cfg: RuleConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
