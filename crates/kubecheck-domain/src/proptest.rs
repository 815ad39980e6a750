//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Extraction totality over arbitrary document trees
//! - Evaluation determinism and rule-major ordering
//! - At most one violation per (rule, container)
//! - Level aggregation laws

use crate::condition::Condition;
use crate::engine::{evaluate, evaluate_containers};
use crate::extract::extract;
use crate::model::{Container, Quantities, Resource, ResourceRequirements, SecurityContext};
use crate::policy::{Rule, RuleSet};
use crate::report::{document_level, run_level};
use crate::test_support::default_like_rules;
use crate::value::Value;
use kubecheck_types::{Level, Severity, Violation};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("spec".to_string()),
        Just("template".to_string()),
        Just("containers".to_string()),
        Just("name".to_string()),
        Just("image".to_string()),
        Just("resources".to_string()),
        Just("securityContext".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        "[a-z0-9:./]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Seq),
            prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(Value::Map),
        ]
    })
}

fn arb_resource() -> impl Strategy<Value = Resource> {
    (
        "[A-Z][a-z]{2,10}",
        prop::collection::btree_map(arb_key(), arb_value(), 0..4),
    )
        .prop_map(|(kind, spec)| Resource {
            api_version: "v1".to_string(),
            kind,
            metadata: BTreeMap::new(),
            spec,
        })
}

fn arb_image() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}",
        "[a-z]{1,8}:[a-z0-9.]{1,6}",
        Just("nginx:latest".to_string()),
        Just("registry.local:5000/app:v1".to_string()),
    ]
}

fn arb_quantity() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[0-9]{1,3}(m|Mi)?".prop_map(Some),
    ]
}

fn arb_quantities() -> impl Strategy<Value = Option<Quantities>> {
    prop::option::of(
        (arb_quantity(), arb_quantity()).prop_map(|(cpu, memory)| Quantities { cpu, memory }),
    )
}

fn arb_container() -> impl Strategy<Value = Container> {
    (
        "[a-z]{0,6}",
        arb_image(),
        prop::option::of(
            (arb_quantities(), arb_quantities())
                .prop_map(|(requests, limits)| ResourceRequirements { requests, limits }),
        ),
        prop::option::of(
            (
                prop::option::of(any::<bool>()),
                prop::option::of(prop_oneof![Just(0i64), 1i64..65536]),
            )
                .prop_map(|(run_as_non_root, run_as_user)| SecurityContext {
                    run_as_non_root,
                    run_as_user,
                }),
        ),
    )
        .prop_map(|(name, image, resources, security_context)| Container {
            name,
            image,
            resources,
            security_context,
        })
}

fn arb_condition_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("image_tag_equals:latest".to_string()),
        "image_tag_equals:[a-z0-9.]{0,4}",
        Just("image_tag_missing".to_string()),
        Just("missing_cpu_requests".to_string()),
        Just("missing_memory_requests".to_string()),
        Just("missing_cpu_limits".to_string()),
        Just("missing_memory_limits".to_string()),
        Just("missing_security_context".to_string()),
        Just("run_as_non_root_false".to_string()),
        Just("run_as_user_zero".to_string()),
        "[a-z_]{1,12}(:[a-z]{0,4})?",
    ]
}

fn arb_rule_set() -> impl Strategy<Value = RuleSet> {
    prop::collection::vec(
        (
            prop_oneof![Just(Severity::Warn), Just(Severity::Error)],
            prop::collection::vec(arb_condition_expr(), 1..5),
        ),
        0..6,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (severity, conditions))| Rule {
                name: format!("rule-{i}"),
                description: String::new(),
                severity,
                category: String::new(),
                conditions: conditions.iter().map(|c| Condition::parse(c)).collect(),
                message: "{container}".to_string(),
                help: None,
            })
            .collect()
    })
}

fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Ok), Just(Level::Warn), Just(Level::Error)]
}

fn arb_violation() -> impl Strategy<Value = Violation> {
    prop_oneof![Just(Severity::Warn), Just(Severity::Error)].prop_map(|severity| Violation {
        severity,
        message: "m".to_string(),
        rule: "r".to_string(),
        help: None,
        fingerprint: None,
    })
}

// ============================================================================
// Property tests: extraction
// ============================================================================

proptest! {
    /// Extraction never panics and only reads from the two canonical locations.
    #[test]
    fn extraction_is_total(resource in arb_resource()) {
        let containers = extract(&resource);
        let candidates = match resource.spec.get("template") {
            Some(t) => t.path(&["spec", "containers"]),
            None => resource.spec.get("containers"),
        };
        let upper_bound = candidates.and_then(Value::as_seq).map_or(0, <[Value]>::len);
        prop_assert!(containers.len() <= upper_bound);
    }

    /// Condition parsing never panics and unknown expressions keep their text.
    #[test]
    fn condition_parse_is_total(expr in ".{0,24}") {
        let cond = Condition::parse(&expr);
        if cond.is_unknown() {
            prop_assert_eq!(cond.to_string(), expr);
        }
    }
}

// ============================================================================
// Property tests: evaluation
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(resource in arb_resource(), rules in arb_rule_set()) {
        prop_assert_eq!(evaluate(&resource, &rules), evaluate(&resource, &rules));
    }

    /// Each (rule, container) pair yields zero or one violation, in rule-major order.
    #[test]
    fn at_most_one_violation_per_pair_in_rule_major_order(
        containers in prop::collection::vec(arb_container(), 0..5),
        rules in arb_rule_set(),
    ) {
        let violations = evaluate_containers(&containers, &rules);
        prop_assert!(violations.len() <= containers.len() * rules.len());

        let mut expected = Vec::new();
        for rule in rules.rules() {
            for c in &containers {
                if rule.conditions.iter().any(|cond| cond.evaluate(c)) {
                    expected.push((rule.name.clone(), c.name.clone()));
                }
            }
        }
        let actual: Vec<(String, String)> = violations
            .into_iter()
            .map(|v| (v.rule, v.message))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn empty_rule_set_never_fires(containers in prop::collection::vec(arb_container(), 0..5)) {
        prop_assert!(evaluate_containers(&containers, &RuleSet::default()).is_empty());
    }

    /// Default rules only ever produce the documented severities.
    #[test]
    fn default_rules_severity_matches_rule(c in arb_container()) {
        let rules = default_like_rules();
        for v in evaluate_containers(std::slice::from_ref(&c), &rules) {
            let rule = rules.get(&v.rule);
            prop_assert!(rule.is_some());
            prop_assert_eq!(rule.map(|r| r.severity), Some(v.severity));
        }
    }
}

// ============================================================================
// Property tests: aggregation
// ============================================================================

proptest! {
    #[test]
    fn combine_is_associative_and_commutative(a in arb_level(), b in arb_level(), c in arb_level()) {
        prop_assert_eq!(a.combine(b), b.combine(a));
        prop_assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
        prop_assert_eq!(a.combine(Level::Ok), a);
    }

    #[test]
    fn run_level_ignores_order(mut levels in prop::collection::vec(arb_level(), 0..12)) {
        let forward = run_level(levels.iter().copied());
        levels.reverse();
        prop_assert_eq!(forward, run_level(levels.iter().copied()));
        prop_assert_eq!(forward, levels.iter().copied().max().unwrap_or(Level::Ok));
    }

    #[test]
    fn document_level_matches_worst_violation(violations in prop::collection::vec(arb_violation(), 0..8)) {
        let level = document_level(&violations);
        let has_error = violations.iter().any(|v| v.severity == Severity::Error);
        let has_warn = violations.iter().any(|v| v.severity == Severity::Warn);
        let expected = if has_error {
            Level::Error
        } else if has_warn {
            Level::Warn
        } else {
            Level::Ok
        };
        prop_assert_eq!(level, expected);
    }
}
