use crate::model::{RuleConfig, RuleConfigV1};
use kubecheck_types::ids;

/// The built-in rule set used when no config file is supplied.
///
/// Exactly four rules; keep names and messages stable, reports and fingerprints depend on them.
pub fn default_config() -> RuleConfigV1 {
    RuleConfigV1 {
        schema: Some(ids::SCHEMA_CONFIG_V1.to_string()),
        rules: vec![
            rule(
                ids::RULE_NO_LATEST_IMAGE,
                "Disallow latest image tags",
                "ERROR",
                ids::TYPE_IMAGE,
                &[
                    &format!("{}:latest", ids::COND_IMAGE_TAG_EQUALS),
                    ids::COND_IMAGE_TAG_MISSING,
                ],
                "Container '{container}' uses 'latest' image tag",
                "use a specific version or digest",
            ),
            rule(
                ids::RULE_REQUIRE_RESOURCE_REQUESTS,
                "Require CPU and memory requests",
                "WARN",
                ids::TYPE_RESOURCES,
                &[
                    ids::COND_MISSING_CPU_REQUESTS,
                    ids::COND_MISSING_MEMORY_REQUESTS,
                ],
                "Container '{container}' missing resource requests",
                "set requests.cpu and requests.memory",
            ),
            rule(
                ids::RULE_REQUIRE_RESOURCE_LIMITS,
                "Require CPU and memory limits",
                "WARN",
                ids::TYPE_RESOURCES,
                &[ids::COND_MISSING_CPU_LIMITS, ids::COND_MISSING_MEMORY_LIMITS],
                "Container '{container}' missing resource limits",
                "set limits.cpu and limits.memory",
            ),
            rule(
                ids::RULE_NO_ROOT_CONTAINERS,
                "Containers must not run as root",
                "ERROR",
                ids::TYPE_SECURITY,
                &[
                    ids::COND_MISSING_SECURITY_CONTEXT,
                    ids::COND_RUN_AS_NON_ROOT_FALSE,
                    ids::COND_RUN_AS_USER_ZERO,
                ],
                "Container '{container}' running as root or missing securityContext",
                "set runAsNonRoot: true and runAsUser to non-zero value",
            ),
        ],
    }
}

fn rule(
    name: &str,
    description: &str,
    severity: &str,
    category: &str,
    conditions: &[&str],
    message: &str,
    help: &str,
) -> RuleConfig {
    RuleConfig {
        name: name.to_string(),
        description: description.to_string(),
        severity: severity.to_string(),
        category: category.to_string(),
        conditions: conditions.iter().map(|c| c.to_string()).collect(),
        message: message.to_string(),
        help: Some(help.to_string()),
    }
}
