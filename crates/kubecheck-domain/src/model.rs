use crate::value::Value;
use std::collections::BTreeMap;

/// One decoded manifest document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    pub metadata: BTreeMap<String, Value>,
    pub spec: BTreeMap<String, Value>,
}

impl Resource {
    /// Build a resource from a decoded document root.
    ///
    /// Total: a non-mapping root or mistyped top-level fields produce empty parts. Callers drop
    /// documents whose `kind` ends up empty.
    pub fn from_value(root: Value) -> Resource {
        let Value::Map(mut top) = root else {
            return Resource::default();
        };

        let api_version = take_string(&mut top, "apiVersion");
        let kind = take_string(&mut top, "kind");
        let metadata = take_map(&mut top, "metadata");
        let spec = take_map(&mut top, "spec");

        Resource {
            api_version,
            kind,
            metadata,
            spec,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata.get("namespace").and_then(Value::as_str)
    }
}

fn take_string(map: &mut BTreeMap<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn take_map(map: &mut BTreeMap<String, Value>, key: &str) -> BTreeMap<String, Value> {
    match map.remove(key) {
        Some(Value::Map(m)) => m,
        _ => BTreeMap::new(),
    }
}

/// One validatable unit pulled out of a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Container {
    /// Empty when the source container had no string `name`.
    pub name: String,
    /// Empty when the source container had no string `image`.
    pub image: String,
    pub resources: Option<ResourceRequirements>,
    pub security_context: Option<SecurityContext>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceRequirements {
    pub requests: Option<Quantities>,
    pub limits: Option<Quantities>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Quantities {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecurityContext {
    pub run_as_non_root: Option<bool>,
    pub run_as_user: Option<i64>,
}

impl Container {
    pub fn requests(&self) -> Option<&Quantities> {
        self.resources.as_ref().and_then(|r| r.requests.as_ref())
    }

    pub fn limits(&self) -> Option<&Quantities> {
        self.resources.as_ref().and_then(|r| r.limits.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_top_level_fields() {
        let res = Resource::from_value(Value::from(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"replicas": 2},
        })));
        assert_eq!(res.api_version, "apps/v1");
        assert_eq!(res.kind, "Deployment");
        assert_eq!(res.name(), Some("web"));
        assert_eq!(res.namespace(), Some("prod"));
        assert_eq!(res.spec.get("replicas"), Some(&Value::Int(2)));
    }

    #[test]
    fn from_value_tolerates_wrong_shapes() {
        let res = Resource::from_value(Value::from(json!({
            "kind": 7,
            "metadata": "nope",
            "spec": [1, 2],
        })));
        assert!(res.kind.is_empty());
        assert!(res.metadata.is_empty());
        assert!(res.spec.is_empty());

        assert_eq!(Resource::from_value(Value::from(json!("scalar"))), Resource::default());
    }
}
