use crate::extract::extract;
use crate::model::{Container, Resource};
use crate::policy::RuleSet;
use kubecheck_types::{Violation, ids};

/// Evaluate every rule against every container of `resource`.
///
/// Output order is rule-major: rule declaration order, then container order. At most one
/// violation is produced per (rule, container) pair.
pub fn evaluate(resource: &Resource, rules: &RuleSet) -> Vec<Violation> {
    if rules.is_empty() {
        return Vec::new();
    }
    evaluate_containers(&extract(resource), rules)
}

pub fn evaluate_containers(containers: &[Container], rules: &RuleSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules.rules() {
        for container in containers {
            if rule.conditions.iter().any(|c| c.evaluate(container)) {
                violations.push(Violation {
                    severity: rule.severity,
                    message: rule.message.replace(ids::CONTAINER_PLACEHOLDER, &container.name),
                    rule: rule.name.clone(),
                    help: rule.help.clone(),
                    fingerprint: None,
                });
            }
        }
    }

    violations
}
