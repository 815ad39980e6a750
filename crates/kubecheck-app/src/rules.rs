use kubecheck_domain::RuleSet;

/// One line per rule: name, severity, type, conditions. Unknown conditions are marked.
pub fn format_rules(rules: &RuleSet) -> String {
    if rules.is_empty() {
        return "No rules loaded.\n".to_string();
    }

    let width = rules
        .rules()
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for rule in rules.rules() {
        let conditions: Vec<String> = rule
            .conditions
            .iter()
            .map(|c| {
                if c.is_unknown() {
                    format!("{c} (unknown)")
                } else {
                    c.to_string()
                }
            })
            .collect();
        let category = if rule.category.is_empty() {
            "-"
        } else {
            rule.category.as_str()
        };
        out.push_str(&format!(
            "{:<width$}  {:<5}  {:<9}  {}\n",
            rule.name,
            rule.severity.as_str(),
            category,
            conditions.join(", "),
        ));
        if !rule.description.is_empty() {
            out.push_str(&format!("{:<width$}  {}\n", "", rule.description));
        }
    }
    out
}
