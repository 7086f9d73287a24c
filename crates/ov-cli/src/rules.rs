use std::fs;
use std::path::Path;

use ov_compiler::{compile_rules, parse_rules, DocumentFormat};
use ov_core::{Rule, RuleSet};

pub fn read_rules(path: &Path) -> Result<Vec<Rule>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let rules = parse_rules(&content, DocumentFormat::from_path(path))
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;

    tracing::debug!(path = %path.display(), count = rules.len(), "loaded rule document");
    Ok(rules)
}

pub fn load_rule_set(path: &Path) -> Result<RuleSet, String> {
    let rules = read_rules(path)?;
    compile_rules(&rules).map_err(|e| format!("'{}': {}", path.display(), e))
}

/// Compile without schema validation, for rules that the engine accepts but the
/// settings form would reject.
pub fn load_rule_set_unchecked(path: &Path) -> Result<RuleSet, String> {
    let rules = read_rules(path)?;
    RuleSet::compile(&rules).map_err(|e| format!("'{}': {}", path.display(), e))
}
