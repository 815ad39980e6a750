use crate::condition::Condition;
use kubecheck_types::Severity;

/// A compiled rule: conditions are parsed, severity is typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub severity: Severity,
    /// Free-form category tag. Informational only.
    pub category: String,
    /// Evaluated in order; the first match per container wins.
    pub conditions: Vec<Condition>,
    /// Template; every `{container}` is replaced with the container name.
    pub message: String,
    pub help: Option<String>,
}

impl Rule {
    /// Build a rule from raw condition expressions.
    pub fn new(
        name: impl Into<String>,
        severity: Severity,
        conditions: &[&str],
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            severity,
            category: String::new(),
            conditions: conditions.iter().map(|c| Condition::parse(c)).collect(),
            message: message.into(),
            help: None,
        }
    }

    /// Conditions that can never match, in declaration order.
    pub fn unknown_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|c| c.is_unknown())
    }
}

/// Ordered rule collection. Evaluation order is declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Drop the named rules, keeping the order of the rest.
    pub fn without(mut self, names: &[String]) -> Self {
        self.rules.retain(|r| !names.iter().any(|n| n == &r.name));
        self
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
