//! Pure policy evaluation (no IO).
//!
//! Input: decoded resource documents and a compiled rule set, both constructed elsewhere.
//! Output: ordered violations plus document and run levels.

#![forbid(unsafe_code)]

pub mod condition;
pub mod extract;
pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod report;
pub mod value;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use condition::Condition;
pub use engine::{evaluate, evaluate_containers};
pub use extract::extract;
pub use model::{Container, Quantities, Resource, ResourceRequirements, SecurityContext};
pub use policy::{Rule, RuleSet};
pub use report::{DocumentReport, SeverityCounts, document_level, evaluate_document, run_level};
pub use value::Value;
