//! Container extraction from generic resource documents.
//!
//! Two shapes are recognised, probed in order:
//! 1. workloads wrapping a pod template: `spec.template.spec.containers`
//! 2. bare pods: `spec.containers`, consulted only when `spec` has no `template` key
//!
//! Any kind that nests a pod template at the first path is supported without changes here.

use crate::model::{Container, Quantities, Resource, ResourceRequirements, SecurityContext};
use crate::value::Value;

/// Pull the containers out of `resource`, in document order. Never fails.
pub fn extract(resource: &Resource) -> Vec<Container> {
    let list = match resource.spec.get("template") {
        Some(template) => template.path(&["spec", "containers"]),
        None => resource.spec.get("containers"),
    };

    list.and_then(Value::as_seq)
        .map(decode_containers)
        .unwrap_or_default()
}

fn decode_containers(items: &[Value]) -> Vec<Container> {
    // Non-mapping entries cannot describe a container and are skipped.
    items.iter().filter_map(decode_container).collect()
}

fn decode_container(item: &Value) -> Option<Container> {
    item.as_map()?;

    Some(Container {
        name: string_or_empty(item.get("name")),
        image: string_or_empty(item.get("image")),
        resources: item.get("resources").and_then(decode_resources),
        security_context: item.get("securityContext").and_then(decode_security_context),
    })
}

fn decode_resources(value: &Value) -> Option<ResourceRequirements> {
    value.as_map()?;
    Some(ResourceRequirements {
        requests: value.get("requests").and_then(decode_quantities),
        limits: value.get("limits").and_then(decode_quantities),
    })
}

fn decode_quantities(value: &Value) -> Option<Quantities> {
    value.as_map()?;
    Some(Quantities {
        cpu: optional_string(value.get("cpu")),
        memory: optional_string(value.get("memory")),
    })
}

fn decode_security_context(value: &Value) -> Option<SecurityContext> {
    value.as_map()?;
    Some(SecurityContext {
        run_as_non_root: value.get("runAsNonRoot").and_then(Value::as_bool),
        run_as_user: value.get("runAsUser").and_then(Value::as_i64),
    })
}

fn string_or_empty(value: Option<&Value>) -> String {
    optional_string(value).unwrap_or_default()
}

fn optional_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
