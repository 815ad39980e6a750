use crate::model::{RuleConfig, RuleConfigV1};
use anyhow::Context;
use kubecheck_domain::{Condition, Rule, RuleSet};
use kubecheck_types::{Severity, ids};
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Rule names to drop after loading. Each must name a loaded rule.
    pub skip_rules: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub rules: RuleSet,
    /// `(rule, condition)` pairs whose identifier is not recognised. They never match.
    pub unknown_conditions: Vec<(String, String)>,
}

pub fn resolve_config(cfg: RuleConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(cfg.rules.len());
    for (idx, rc) in cfg.rules.into_iter().enumerate() {
        let rule = compile_rule(rc).with_context(|| format!("invalid rule at index {idx}"))?;
        if !seen.insert(rule.name.clone()) {
            anyhow::bail!("duplicate rule name: {}", rule.name);
        }
        rules.push(rule);
    }

    for name in &overrides.skip_rules {
        if !seen.contains(name) {
            anyhow::bail!("cannot skip unknown rule: {name}");
        }
    }

    let rules = RuleSet::new(rules).without(&overrides.skip_rules);

    let mut unknown_conditions = Vec::new();
    for rule in rules.rules() {
        for cond in rule.unknown_conditions() {
            log::warn!(
                "rule '{}': unknown condition '{}' will never match",
                rule.name,
                cond
            );
            unknown_conditions.push((rule.name.clone(), cond.to_string()));
        }
    }

    Ok(ResolvedConfig {
        rules,
        unknown_conditions,
    })
}

fn compile_rule(rc: RuleConfig) -> anyhow::Result<Rule> {
    let name = rc.name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("rule name must not be empty");
    }

    let severity = parse_severity(&rc.severity)
        .with_context(|| format!("invalid severity for rule {name}"))?;

    if rc.conditions.is_empty() {
        anyhow::bail!("rule {name} must list at least one condition");
    }

    Ok(Rule {
        conditions: rc.conditions.iter().map(|c| Condition::parse(c.as_str())).collect(),
        name,
        description: rc.description,
        severity,
        category: rc.category,
        message: rc.message,
        help: rc.help.filter(|h| !h.is_empty()),
    })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    Severity::parse(v)
        .ok_or_else(|| anyhow::anyhow!("unknown severity: {v} (expected ERROR or WARN)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_config, parse_config_yaml};

    fn resolve_yaml(input: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_yaml(input)?, Overrides::default())
    }

    #[test]
    fn defaults_resolve_cleanly() {
        let resolved = resolve_config(default_config(), Overrides::default()).expect("resolve");
        assert_eq!(resolved.rules.len(), 4);
        assert!(resolved.unknown_conditions.is_empty());
        let latest = resolved.rules.get("no-latest-image").expect("rule");
        assert_eq!(latest.severity, Severity::Error);
        assert_eq!(
            latest.conditions,
            vec![
                Condition::ImageTagEquals("latest".to_string()),
                Condition::ImageTagMissing
            ]
        );
    }

    #[test]
    fn severity_is_case_insensitive() {
        let resolved = resolve_yaml(
            "rules:\n  - {name: a, severity: warning, conditions: [image_tag_missing], message: m}\n",
        )
        .expect("resolve");
        assert_eq!(resolved.rules.rules()[0].severity, Severity::Warn);
    }

    #[test]
    fn rejects_bad_severity() {
        let err = resolve_yaml(
            "rules:\n  - {name: a, severity: INFO, conditions: [image_tag_missing], message: m}\n",
        )
        .expect_err("bad severity");
        let chain = format!("{err:#}");
        assert!(chain.contains("invalid rule at index 0"), "{chain}");
        assert!(chain.contains("unknown severity: INFO"), "{chain}");
    }

    #[test]
    fn rejects_empty_name_and_empty_conditions() {
        let err = resolve_yaml("rules:\n  - {name: ' ', severity: ERROR, conditions: [x], message: m}\n")
            .expect_err("empty name");
        assert!(format!("{err:#}").contains("rule name must not be empty"));

        let err = resolve_yaml("rules:\n  - {name: a, severity: ERROR, conditions: [], message: m}\n")
            .expect_err("empty conditions");
        assert!(format!("{err:#}").contains("at least one condition"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = resolve_yaml(
            "rules:\n  - {name: a, severity: ERROR, conditions: [x], message: m}\n  - {name: a, severity: WARN, conditions: [y], message: m}\n",
        )
        .expect_err("duplicate");
        assert!(err.to_string().contains("duplicate rule name: a"));
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = resolve_yaml("schema: other.v9\nrules: []\n").expect_err("schema");
        assert!(err.to_string().contains("unsupported config schema"));
    }

    #[test]
    fn unknown_conditions_are_reported_not_rejected() {
        let resolved = resolve_yaml(
            "rules:\n  - {name: probes, severity: WARN, conditions: [requires_probe, image_tag_missing], message: m}\n",
        )
        .expect("resolve");
        assert_eq!(
            resolved.unknown_conditions,
            vec![("probes".to_string(), "requires_probe".to_string())]
        );
        assert!(resolved.rules.rules()[0].conditions[0].is_unknown());
    }

    #[test]
    fn skip_rules_removes_and_validates() {
        let resolved = resolve_config(
            default_config(),
            Overrides {
                skip_rules: vec!["require-resource-limits".to_string()],
            },
        )
        .expect("resolve");
        assert_eq!(resolved.rules.len(), 3);
        assert!(resolved.rules.get("require-resource-limits").is_none());

        let err = resolve_config(
            default_config(),
            Overrides {
                skip_rules: vec!["nope".to_string()],
            },
        )
        .expect_err("unknown skip");
        assert!(err.to_string().contains("cannot skip unknown rule: nope"));
    }

    #[test]
    fn empty_help_is_dropped() {
        let resolved = resolve_yaml(
            "rules:\n  - {name: a, severity: ERROR, conditions: [x], message: m, help: ''}\n",
        )
        .expect("resolve");
        assert_eq!(resolved.rules.rules()[0].help, None);
    }

    #[test]
    fn condition_parameters_are_taken_verbatim() {
        let resolved = resolve_yaml(
            "rules:\n  - {name: a, severity: ERROR, conditions: ['image_tag_equals:latest '], message: m}\n",
        )
        .expect("resolve");
        let condition = &resolved.rules.rules()[0].conditions[0];
        assert_eq!(condition, &Condition::ImageTagEquals("latest ".to_string()));

        let container = kubecheck_domain::Container {
            image: "nginx:latest".to_string(),
            ..Default::default()
        };
        assert!(!condition.evaluate(&container));
    }
}
