//! Condition interpreter: the fixed vocabulary of container predicates.
//!
//! Expressions are `identifier` or `identifier:parameter`, split on the first `:`. They are
//! parsed once when a rule set is compiled; evaluation is a pure match over the variant.

use crate::model::{Container, Quantities};
use kubecheck_types::ids;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// `image_tag_equals:<tag>`
    ImageTagEquals(String),
    ImageTagMissing,
    MissingCpuRequests,
    MissingMemoryRequests,
    MissingCpuLimits,
    MissingMemoryLimits,
    MissingSecurityContext,
    RunAsNonRootFalse,
    RunAsUserZero,
    /// Unrecognised identifier, kept verbatim. Never matches.
    Unknown(String),
}

impl Condition {
    /// Parse a condition expression. Total: unknown identifiers become [`Condition::Unknown`].
    ///
    /// A parameter given to an identifier that takes none is ignored.
    pub fn parse(expr: &str) -> Condition {
        let (identifier, parameter) = match expr.split_once(':') {
            Some((head, tail)) => (head, tail),
            None => (expr, ""),
        };

        match identifier {
            ids::COND_IMAGE_TAG_EQUALS => Condition::ImageTagEquals(parameter.to_string()),
            ids::COND_IMAGE_TAG_MISSING => Condition::ImageTagMissing,
            ids::COND_MISSING_CPU_REQUESTS => Condition::MissingCpuRequests,
            ids::COND_MISSING_MEMORY_REQUESTS => Condition::MissingMemoryRequests,
            ids::COND_MISSING_CPU_LIMITS => Condition::MissingCpuLimits,
            ids::COND_MISSING_MEMORY_LIMITS => Condition::MissingMemoryLimits,
            ids::COND_MISSING_SECURITY_CONTEXT => Condition::MissingSecurityContext,
            ids::COND_RUN_AS_NON_ROOT_FALSE => Condition::RunAsNonRootFalse,
            ids::COND_RUN_AS_USER_ZERO => Condition::RunAsUserZero,
            _ => Condition::Unknown(expr.to_string()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Condition::Unknown(_))
    }

    pub fn evaluate(&self, container: &Container) -> bool {
        match self {
            Condition::ImageTagEquals(tag) => image_tag_equals(&container.image, tag),
            Condition::ImageTagMissing => image_tag_missing(&container.image),
            Condition::MissingCpuRequests => missing(container.requests(), |q| &q.cpu),
            Condition::MissingMemoryRequests => missing(container.requests(), |q| &q.memory),
            Condition::MissingCpuLimits => missing(container.limits(), |q| &q.cpu),
            Condition::MissingMemoryLimits => missing(container.limits(), |q| &q.memory),
            Condition::MissingSecurityContext => container.security_context.is_none(),
            Condition::RunAsNonRootFalse => container
                .security_context
                .as_ref()
                .is_some_and(|sc| sc.run_as_non_root == Some(false)),
            Condition::RunAsUserZero => container
                .security_context
                .as_ref()
                .is_some_and(|sc| sc.run_as_user == Some(0)),
            Condition::Unknown(_) => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::ImageTagEquals(tag) => write!(f, "{}:{}", ids::COND_IMAGE_TAG_EQUALS, tag),
            Condition::ImageTagMissing => f.write_str(ids::COND_IMAGE_TAG_MISSING),
            Condition::MissingCpuRequests => f.write_str(ids::COND_MISSING_CPU_REQUESTS),
            Condition::MissingMemoryRequests => f.write_str(ids::COND_MISSING_MEMORY_REQUESTS),
            Condition::MissingCpuLimits => f.write_str(ids::COND_MISSING_CPU_LIMITS),
            Condition::MissingMemoryLimits => f.write_str(ids::COND_MISSING_MEMORY_LIMITS),
            Condition::MissingSecurityContext => f.write_str(ids::COND_MISSING_SECURITY_CONTEXT),
            Condition::RunAsNonRootFalse => f.write_str(ids::COND_RUN_AS_NON_ROOT_FALSE),
            Condition::RunAsUserZero => f.write_str(ids::COND_RUN_AS_USER_ZERO),
            Condition::Unknown(expr) => f.write_str(expr),
        }
    }
}

/// Untagged images count as `latest`. Images splitting into three or more parts on `:`
/// (for example `host:5000/app:tag`) never match.
fn image_tag_equals(image: &str, tag: &str) -> bool {
    let parts: Vec<&str> = image.split(':').collect();
    match parts.as_slice() {
        [_] => tag == "latest",
        [_, image_tag] => *image_tag == tag,
        _ => false,
    }
}

fn image_tag_missing(image: &str) -> bool {
    !image.contains(':')
}

fn missing(quantities: Option<&Quantities>, field: impl Fn(&Quantities) -> &Option<String>) -> bool {
    quantities
        .and_then(|q| field(q).as_deref())
        .is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResourceRequirements, SecurityContext};
    use crate::test_support::{container, full_resources, non_root};

    #[test]
    fn parse_splits_on_first_colon() {
        assert_eq!(
            Condition::parse("image_tag_equals:latest"),
            Condition::ImageTagEquals("latest".to_string())
        );
        assert_eq!(
            Condition::parse("image_tag_equals:a:b"),
            Condition::ImageTagEquals("a:b".to_string())
        );
        assert_eq!(
            Condition::parse("image_tag_equals"),
            Condition::ImageTagEquals(String::new())
        );
        assert_eq!(
            Condition::parse("image_tag_missing:ignored"),
            Condition::ImageTagMissing
        );
    }

    #[test]
    fn unknown_identifiers_never_match() {
        let cond = Condition::parse("requires_probe:liveness");
        assert!(cond.is_unknown());
        assert_eq!(cond.to_string(), "requires_probe:liveness");
        assert!(!cond.evaluate(&container("a", "nginx")));
        assert!(!Condition::parse("").evaluate(&Container::default()));
    }

    #[test]
    fn display_round_trips_known_identifiers() {
        for expr in [
            "image_tag_equals:latest",
            "image_tag_missing",
            "missing_cpu_requests",
            "missing_memory_requests",
            "missing_cpu_limits",
            "missing_memory_limits",
            "missing_security_context",
            "run_as_non_root_false",
            "run_as_user_zero",
        ] {
            assert_eq!(Condition::parse(expr).to_string(), expr);
        }
    }

    #[test]
    fn image_tag_equals_semantics() {
        let latest = Condition::parse("image_tag_equals:latest");
        assert!(latest.evaluate(&container("a", "nginx")));
        assert!(latest.evaluate(&container("a", "nginx:latest")));
        assert!(latest.evaluate(&container("a", "")));
        assert!(!latest.evaluate(&container("a", "nginx:1.21")));

        let pinned = Condition::parse("image_tag_equals:1.21");
        assert!(pinned.evaluate(&container("a", "nginx:1.21")));
        assert!(!pinned.evaluate(&container("a", "nginx")));
    }

    #[test]
    fn registry_port_images_never_match_tag_equals() {
        // Three `:`-separated parts: current behavior is "no match", even for an implicit latest.
        let latest = Condition::parse("image_tag_equals:latest");
        assert!(!latest.evaluate(&container("a", "registry.local:5000/app:v1")));
        assert!(!latest.evaluate(&container("a", "registry.local:5000/app:latest")));

        let v1 = Condition::parse("image_tag_equals:v1");
        assert!(!v1.evaluate(&container("a", "registry.local:5000/app:v1")));

        // Host:port without an app tag splits into two parts; the "tag" is `5000/app`.
        assert!(!latest.evaluate(&container("a", "registry.local:5000/app")));
        assert!(!Condition::ImageTagMissing.evaluate(&container("a", "registry.local:5000/app")));
    }

    #[test]
    fn image_tag_missing_semantics() {
        assert!(Condition::ImageTagMissing.evaluate(&container("a", "nginx")));
        assert!(Condition::ImageTagMissing.evaluate(&container("a", "")));
        assert!(!Condition::ImageTagMissing.evaluate(&container("a", "nginx:1.21")));
    }

    #[test]
    fn resource_conditions_distinguish_absent_and_empty() {
        let bare = container("a", "nginx:1");
        for cond in [
            Condition::MissingCpuRequests,
            Condition::MissingMemoryRequests,
            Condition::MissingCpuLimits,
            Condition::MissingMemoryLimits,
        ] {
            assert!(cond.evaluate(&bare), "{cond} on bare container");
        }

        let mut empty_strings = container("a", "nginx:1");
        empty_strings.resources = Some(ResourceRequirements {
            requests: Some(Quantities {
                cpu: Some(String::new()),
                memory: Some("64Mi".to_string()),
            }),
            limits: None,
        });
        assert!(Condition::MissingCpuRequests.evaluate(&empty_strings));
        assert!(!Condition::MissingMemoryRequests.evaluate(&empty_strings));
        assert!(Condition::MissingCpuLimits.evaluate(&empty_strings));

        let mut complete = container("a", "nginx:1");
        complete.resources = Some(full_resources());
        for cond in [
            Condition::MissingCpuRequests,
            Condition::MissingMemoryRequests,
            Condition::MissingCpuLimits,
            Condition::MissingMemoryLimits,
        ] {
            assert!(!cond.evaluate(&complete), "{cond} on complete container");
        }
    }

    #[test]
    fn security_conditions() {
        let bare = container("a", "nginx:1");
        assert!(Condition::MissingSecurityContext.evaluate(&bare));
        assert!(!Condition::RunAsNonRootFalse.evaluate(&bare));
        assert!(!Condition::RunAsUserZero.evaluate(&bare));

        let mut empty = container("a", "nginx:1");
        empty.security_context = Some(SecurityContext::default());
        assert!(!Condition::MissingSecurityContext.evaluate(&empty));
        assert!(!Condition::RunAsNonRootFalse.evaluate(&empty));
        assert!(!Condition::RunAsUserZero.evaluate(&empty));

        let mut root = container("a", "nginx:1");
        root.security_context = Some(SecurityContext {
            run_as_non_root: Some(false),
            run_as_user: Some(0),
        });
        assert!(Condition::RunAsNonRootFalse.evaluate(&root));
        assert!(Condition::RunAsUserZero.evaluate(&root));

        let mut safe = container("a", "nginx:1");
        safe.security_context = Some(non_root());
        assert!(!Condition::RunAsNonRootFalse.evaluate(&safe));
        assert!(!Condition::RunAsUserZero.evaluate(&safe));
    }
}
