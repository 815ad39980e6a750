//! Explain registry for built-in rules and condition identifiers.
//!
//! Maps rule names and condition identifiers to human-readable explanations with remediation
//! guidance.

use crate::ids;

/// Explanation entry for a rule or condition.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule/condition.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after manifest examples.
    pub examples: ExamplePair,
}

/// Before and after manifest snippets.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// YAML that would trigger a violation.
    pub before: &'static str,
    /// YAML that passes.
    pub after: &'static str,
}

/// Look up an explanation by built-in rule name or condition identifier.
///
/// A `:parameter` suffix on a condition identifier is ignored. Returns `None` if the
/// identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    let key = identifier
        .split_once(':')
        .map_or(identifier, |(head, _)| head);
    match key {
        // Built-in rules
        ids::RULE_NO_LATEST_IMAGE => Some(explain_no_latest_image()),
        ids::RULE_REQUIRE_RESOURCE_REQUESTS => Some(explain_require_resource_requests()),
        ids::RULE_REQUIRE_RESOURCE_LIMITS => Some(explain_require_resource_limits()),
        ids::RULE_NO_ROOT_CONTAINERS => Some(explain_no_root_containers()),

        // Conditions
        ids::COND_IMAGE_TAG_EQUALS => Some(explain_image_tag_equals()),
        ids::COND_IMAGE_TAG_MISSING => Some(explain_image_tag_missing()),
        ids::COND_MISSING_CPU_REQUESTS => Some(explain_missing_cpu_requests()),
        ids::COND_MISSING_MEMORY_REQUESTS => Some(explain_missing_memory_requests()),
        ids::COND_MISSING_CPU_LIMITS => Some(explain_missing_cpu_limits()),
        ids::COND_MISSING_MEMORY_LIMITS => Some(explain_missing_memory_limits()),
        ids::COND_MISSING_SECURITY_CONTEXT => Some(explain_missing_security_context()),
        ids::COND_RUN_AS_NON_ROOT_FALSE => Some(explain_run_as_non_root_false()),
        ids::COND_RUN_AS_USER_ZERO => Some(explain_run_as_user_zero()),

        _ => None,
    }
}

/// List all built-in rule names.
pub fn all_rule_names() -> &'static [&'static str] {
    &[
        ids::RULE_NO_LATEST_IMAGE,
        ids::RULE_REQUIRE_RESOURCE_REQUESTS,
        ids::RULE_REQUIRE_RESOURCE_LIMITS,
        ids::RULE_NO_ROOT_CONTAINERS,
    ]
}

/// List all condition identifiers understood by the engine.
pub fn all_conditions() -> &'static [&'static str] {
    &[
        ids::COND_IMAGE_TAG_EQUALS,
        ids::COND_IMAGE_TAG_MISSING,
        ids::COND_MISSING_CPU_REQUESTS,
        ids::COND_MISSING_MEMORY_REQUESTS,
        ids::COND_MISSING_CPU_LIMITS,
        ids::COND_MISSING_MEMORY_LIMITS,
        ids::COND_MISSING_SECURITY_CONTEXT,
        ids::COND_RUN_AS_NON_ROOT_FALSE,
        ids::COND_RUN_AS_USER_ZERO,
    ]
}

const UNTAGGED_IMAGE: &str = "\
containers:
  - name: web
    image: nginx";

const PINNED_IMAGE: &str = "\
containers:
  - name: web
    image: nginx:1.27.3";

const NO_RESOURCES: &str = "\
containers:
  - name: web
    image: nginx:1.27.3";

const FULL_RESOURCES: &str = "\
containers:
  - name: web
    image: nginx:1.27.3
    resources:
      requests:
        cpu: 100m
        memory: 128Mi
      limits:
        cpu: 500m
        memory: 512Mi";

const NON_ROOT: &str = "\
containers:
  - name: web
    image: nginx:1.27.3
    securityContext:
      runAsNonRoot: true
      runAsUser: 10001";

// --- Rule-level explanations ---

fn explain_no_latest_image() -> Explanation {
    Explanation {
        title: "No Latest Image Tags",
        description: "\
Flags containers whose image uses the `latest` tag, either explicitly (`nginx:latest`) or
implicitly (`nginx` with no tag at all).

A floating tag makes rollouts non-reproducible: two pods of the same Deployment can run
different code, and rolling back does not restore the previous image.",
        remediation: "\
Pin every image to an explicit version tag or, better, an immutable digest.",
        examples: ExamplePair {
            before: UNTAGGED_IMAGE,
            after: PINNED_IMAGE,
        },
    }
}

fn explain_require_resource_requests() -> Explanation {
    Explanation {
        title: "Require Resource Requests",
        description: "\
Flags containers that do not set both `resources.requests.cpu` and
`resources.requests.memory`.

Requests drive scheduling decisions. Without them the scheduler cannot place pods sensibly
and the pod lands in the BestEffort QoS class, first in line for eviction.",
        remediation: "\
Set `requests.cpu` and `requests.memory` to the steady-state usage of the container.",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_require_resource_limits() -> Explanation {
    Explanation {
        title: "Require Resource Limits",
        description: "\
Flags containers that do not set both `resources.limits.cpu` and `resources.limits.memory`.

Without limits a single misbehaving container can starve its neighbours on the node.",
        remediation: "\
Set `limits.cpu` and `limits.memory` to the peak usage you are willing to tolerate.",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_no_root_containers() -> Explanation {
    Explanation {
        title: "No Root Containers",
        description: "\
Flags containers that have no `securityContext`, that set `runAsNonRoot: false`, or that set
`runAsUser: 0`.

A process running as UID 0 inside a container is one kernel bug away from root on the node.",
        remediation: "\
Add a `securityContext` with `runAsNonRoot: true` and a non-zero `runAsUser`.",
        examples: ExamplePair {
            before: UNTAGGED_IMAGE,
            after: NON_ROOT,
        },
    }
}

// --- Condition-level explanations ---

fn explain_image_tag_equals() -> Explanation {
    Explanation {
        title: "Image Tag Equals (image_tag_equals:<tag>)",
        description: "\
True when the image splits on `:` into exactly two parts and the second part equals the
parameter, or when the image has no `:` at all and the parameter is `latest`.

Images with three or more `:`-separated parts (for example a registry host with a port,
`registry.local:5000/app:v1`) never match.",
        remediation: "\
Use an explicit tag other than the one named by the parameter.",
        examples: ExamplePair {
            before: UNTAGGED_IMAGE,
            after: PINNED_IMAGE,
        },
    }
}

fn explain_image_tag_missing() -> Explanation {
    Explanation {
        title: "Image Tag Missing (image_tag_missing)",
        description: "\
True when the image reference contains no `:` separator, which means the runtime will pull
the implicit `latest` tag.",
        remediation: "\
Add an explicit tag or digest to the image reference.",
        examples: ExamplePair {
            before: UNTAGGED_IMAGE,
            after: PINNED_IMAGE,
        },
    }
}

fn explain_missing_cpu_requests() -> Explanation {
    Explanation {
        title: "Missing CPU Requests (missing_cpu_requests)",
        description: "\
True when `resources`, `resources.requests`, or `resources.requests.cpu` is absent, or the
value is an empty string. Only string values count as present.",
        remediation: "\
Set `resources.requests.cpu`, quoted as a string (for example `\"100m\"`).",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_missing_memory_requests() -> Explanation {
    Explanation {
        title: "Missing Memory Requests (missing_memory_requests)",
        description: "\
True when `resources.requests.memory` is absent or empty.",
        remediation: "\
Set `resources.requests.memory` (for example `128Mi`).",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_missing_cpu_limits() -> Explanation {
    Explanation {
        title: "Missing CPU Limits (missing_cpu_limits)",
        description: "\
True when `resources.limits.cpu` is absent or empty.",
        remediation: "\
Set `resources.limits.cpu` (for example `500m`).",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_missing_memory_limits() -> Explanation {
    Explanation {
        title: "Missing Memory Limits (missing_memory_limits)",
        description: "\
True when `resources.limits.memory` is absent or empty.",
        remediation: "\
Set `resources.limits.memory` (for example `512Mi`).",
        examples: ExamplePair {
            before: NO_RESOURCES,
            after: FULL_RESOURCES,
        },
    }
}

fn explain_missing_security_context() -> Explanation {
    Explanation {
        title: "Missing Security Context (missing_security_context)",
        description: "\
True when the container has no `securityContext` mapping at all. An empty mapping
(`securityContext: {}`) counts as present.",
        remediation: "\
Add a container-level `securityContext`.",
        examples: ExamplePair {
            before: UNTAGGED_IMAGE,
            after: NON_ROOT,
        },
    }
}

fn explain_run_as_non_root_false() -> Explanation {
    Explanation {
        title: "runAsNonRoot Disabled (run_as_non_root_false)",
        description: "\
True when `securityContext.runAsNonRoot` is present and set to `false`. An absent value does
not trigger this condition.",
        remediation: "\
Set `runAsNonRoot: true`.",
        examples: ExamplePair {
            before: "\
securityContext:
  runAsNonRoot: false",
            after: "\
securityContext:
  runAsNonRoot: true",
        },
    }
}

fn explain_run_as_user_zero() -> Explanation {
    Explanation {
        title: "Runs As UID 0 (run_as_user_zero)",
        description: "\
True when `securityContext.runAsUser` is present and equal to `0`, even if `runAsNonRoot` is
`true`.",
        remediation: "\
Set `runAsUser` to a non-zero UID.",
        examples: ExamplePair {
            before: "\
securityContext:
  runAsNonRoot: true
  runAsUser: 0",
            after: "\
securityContext:
  runAsNonRoot: true
  runAsUser: 10001",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_and_condition_has_an_explanation() {
        for id in all_rule_names().iter().chain(all_conditions()) {
            let exp = lookup_explanation(id).unwrap_or_else(|| panic!("missing explain: {id}"));
            assert!(!exp.title.is_empty());
            assert!(!exp.remediation.is_empty());
        }
    }

    #[test]
    fn parameter_suffix_is_ignored() {
        let exp = lookup_explanation("image_tag_equals:latest").expect("known condition");
        assert!(exp.title.starts_with("Image Tag Equals"));
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(lookup_explanation("does_not_exist").is_none());
    }
}
