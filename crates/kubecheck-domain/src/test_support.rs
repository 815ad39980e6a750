use crate::model::{Container, Quantities, Resource, ResourceRequirements, SecurityContext};
use crate::policy::{Rule, RuleSet};
use crate::value::Value;
use kubecheck_types::{Severity, Violation};

pub fn resource(json: serde_json::Value) -> Resource {
    Resource::from_value(Value::from(json))
}

/// A `Deployment` wrapping `containers` in a pod template.
pub fn deployment(containers: serde_json::Value) -> Resource {
    resource(serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {"name": "web"},
        "spec": {"template": {"spec": {"containers": containers}}},
    }))
}

pub fn container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: image.to_string(),
        resources: None,
        security_context: None,
    }
}

pub fn full_resources() -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(Quantities {
            cpu: Some("100m".to_string()),
            memory: Some("128Mi".to_string()),
        }),
        limits: Some(Quantities {
            cpu: Some("500m".to_string()),
            memory: Some("512Mi".to_string()),
        }),
    }
}

pub fn non_root() -> SecurityContext {
    SecurityContext {
        run_as_non_root: Some(true),
        run_as_user: Some(1000),
    }
}

pub fn violation(severity: Severity) -> Violation {
    Violation {
        severity,
        message: "m".to_string(),
        rule: "r".to_string(),
        help: None,
        fingerprint: None,
    }
}

/// Same rules, order and messages as the built-in set shipped by the settings crate.
pub fn default_like_rules() -> RuleSet {
    let with_help = |mut rule: Rule, help: &str| {
        rule.help = Some(help.to_string());
        rule
    };
    RuleSet::new(vec![
        with_help(
            Rule::new(
                "no-latest-image",
                Severity::Error,
                &["image_tag_equals:latest", "image_tag_missing"],
                "Container '{container}' uses 'latest' image tag",
            ),
            "use a specific version or digest",
        ),
        with_help(
            Rule::new(
                "require-resource-requests",
                Severity::Warn,
                &["missing_cpu_requests", "missing_memory_requests"],
                "Container '{container}' missing resource requests",
            ),
            "set requests.cpu and requests.memory",
        ),
        with_help(
            Rule::new(
                "require-resource-limits",
                Severity::Warn,
                &["missing_cpu_limits", "missing_memory_limits"],
                "Container '{container}' missing resource limits",
            ),
            "set limits.cpu and limits.memory",
        ),
        with_help(
            Rule::new(
                "no-root-containers",
                Severity::Error,
                &[
                    "missing_security_context",
                    "run_as_non_root_false",
                    "run_as_user_zero",
                ],
                "Container '{container}' running as root or missing securityContext",
            ),
            "set runAsNonRoot: true and runAsUser to non-zero value",
        ),
    ])
}
