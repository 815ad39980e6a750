//! Stable identifiers for built-in rules, condition identifiers, and schemas.
//!
//! Rule names are kebab-case. Condition identifiers are snake_case and may take a
//! `:parameter` suffix in rule configs.

// Built-in rules
pub const RULE_NO_LATEST_IMAGE: &str = "no-latest-image";
pub const RULE_REQUIRE_RESOURCE_REQUESTS: &str = "require-resource-requests";
pub const RULE_REQUIRE_RESOURCE_LIMITS: &str = "require-resource-limits";
pub const RULE_NO_ROOT_CONTAINERS: &str = "no-root-containers";

// Rule categories (informational)
pub const TYPE_IMAGE: &str = "image";
pub const TYPE_RESOURCES: &str = "resources";
pub const TYPE_SECURITY: &str = "security";

// Condition identifiers
pub const COND_IMAGE_TAG_EQUALS: &str = "image_tag_equals";
pub const COND_IMAGE_TAG_MISSING: &str = "image_tag_missing";
pub const COND_MISSING_CPU_REQUESTS: &str = "missing_cpu_requests";
pub const COND_MISSING_MEMORY_REQUESTS: &str = "missing_memory_requests";
pub const COND_MISSING_CPU_LIMITS: &str = "missing_cpu_limits";
pub const COND_MISSING_MEMORY_LIMITS: &str = "missing_memory_limits";
pub const COND_MISSING_SECURITY_CONTEXT: &str = "missing_security_context";
pub const COND_RUN_AS_NON_ROOT_FALSE: &str = "run_as_non_root_false";
pub const COND_RUN_AS_USER_ZERO: &str = "run_as_user_zero";

/// Placeholder replaced with the container name in rule messages.
pub const CONTAINER_PLACEHOLDER: &str = "{container}";

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "kubecheck.config.v1";

// Skip reasons recorded in the run summary
pub const REASON_DECODE_ERROR: &str = "decode_error";
pub const REASON_READ_ERROR: &str = "read_error";
pub const REASON_TOOL_ERROR: &str = "tool_error";
