use crate::engine::evaluate;
use crate::model::Resource;
use crate::policy::RuleSet;
use kubecheck_types::{Level, Severity, Violation};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub warn: u32,
    pub error: u32,
}

impl SeverityCounts {
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut counts = SeverityCounts::default();
        for v in violations {
            match v.severity {
                Severity::Warn => counts.warn += 1,
                Severity::Error => counts.error += 1,
            }
        }
        counts
    }
}

/// Violations for one document plus their aggregate level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentReport {
    pub level: Level,
    pub violations: Vec<Violation>,
    pub counts: SeverityCounts,
}

/// `Error` if any violation is an error, else `Warn` if any is a warning, else `Ok`.
pub fn document_level(violations: &[Violation]) -> Level {
    violations
        .iter()
        .map(|v| Level::from(v.severity))
        .fold(Level::Ok, Level::combine)
}

/// Highest level across documents. Empty input is `Ok`.
pub fn run_level<I>(levels: I) -> Level
where
    I: IntoIterator<Item = Level>,
{
    levels.into_iter().fold(Level::Ok, Level::combine)
}

pub fn evaluate_document(resource: &Resource, rules: &RuleSet) -> DocumentReport {
    let violations = evaluate(resource, rules);
    DocumentReport {
        level: document_level(&violations),
        counts: SeverityCounts::from_violations(&violations),
        violations,
    }
}
