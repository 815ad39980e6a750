//! The `explain` use case: describe a rule from the effective rule set or a registry entry.

use kubecheck_domain::{Rule, RuleSet};
use kubecheck_types::explain::{self, Explanation};

/// What the effective rule set says about a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSummary {
    pub name: String,
    pub description: String,
    pub severity: String,
    pub category: String,
    pub conditions: Vec<String>,
    pub message: String,
    pub help: Option<String>,
}

impl From<&Rule> for RuleSummary {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            severity: rule.severity.to_string(),
            category: rule.category.clone(),
            conditions: rule.conditions.iter().map(|c| c.to_string()).collect(),
            message: rule.message.clone(),
            help: rule.help.clone(),
        }
    }
}

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// A rule in the effective set, plus registry guidance when the name is built in.
    Rule {
        rule: RuleSummary,
        guidance: Option<Explanation>,
    },
    /// A registry entry (condition identifier, or a built-in rule that is not loaded).
    Found(Explanation),
    /// Unknown identifier; includes the loaded rule names and known conditions.
    NotFound {
        identifier: String,
        available_rules: Vec<String>,
        available_conditions: &'static [&'static str],
    },
}

/// Look up `identifier` in the effective rule set first, then in the registry.
pub fn run_explain(identifier: &str, rules: &RuleSet) -> ExplainOutput {
    if let Some(rule) = rules.get(identifier) {
        return ExplainOutput::Rule {
            rule: RuleSummary::from(rule),
            guidance: explain::lookup_explanation(identifier),
        };
    }

    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rules: rules.rules().iter().map(|r| r.name.clone()).collect(),
            available_conditions: explain::all_conditions(),
        },
    }
}

/// Format a loaded rule, followed by registry guidance if any.
pub fn format_rule(rule: &RuleSummary, guidance: Option<&Explanation>) -> String {
    let mut out = String::new();

    out.push_str(&rule.name);
    out.push('\n');
    out.push_str(&"=".repeat(rule.name.len()));
    out.push_str("\n\n");
    if !rule.description.is_empty() {
        out.push_str(&rule.description);
        out.push_str("\n\n");
    }
    out.push_str(&format!("Severity:   {}\n", rule.severity));
    if !rule.category.is_empty() {
        out.push_str(&format!("Type:       {}\n", rule.category));
    }
    out.push_str(&format!("Message:    {}\n", rule.message));
    out.push_str("Conditions (first match wins):\n");
    for c in &rule.conditions {
        out.push_str(&format!("  - {c}\n"));
    }
    if let Some(help) = &rule.help {
        out.push_str(&format!("Help:       {help}\n"));
    }

    if let Some(exp) = guidance {
        out.push('\n');
        out.push_str(&format_explanation(exp));
    }

    out
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    out.push_str("Before (violation):\n");
    out.push_str("```yaml\n");
    out.push_str(exp.examples.before);
    out.push('\n');
    out.push_str("```\n\n");
    out.push_str("After (fixed):\n");
    out.push_str("```yaml\n");
    out.push_str(exp.examples.after);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, rules: &[String], conditions: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule or condition: {identifier}\n\n"));
    out.push_str("Loaded rules:\n");
    for r in rules {
        out.push_str(&format!("  - {r}\n"));
    }
    out.push_str("\nConditions:\n");
    for c in conditions {
        out.push_str(&format!("  - {c}\n"));
    }

    out
}
