//! Open Voices Rule Compiler
//!
//! This crate loads page identifier rule documents, validates them and compiles
//! them into an `ov_core::RuleSet`.

pub mod parser;
pub mod validate;

use ov_core::{Rule, RuleError, RuleSet};

pub use parser::{parse_rules, parse_rules_json, parse_rules_toml, DocumentFormat, ParseError, RuleDocument, RuleSpec};
pub use validate::{is_valid_format, unreachable_captures, validate_rules, ValidationError, MAX_RULES};

/// Error type for rule compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid page identifier rules: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate `rules` and compile them.
pub fn compile_rules(rules: &[Rule]) -> Result<RuleSet, CompileError> {
    validate_rules(rules).map_err(CompileError::Validation)?;

    for (index, rule) in rules.iter().enumerate() {
        let unreachable = unreachable_captures(rule);
        if !unreachable.is_empty() {
            log::warn!(
                "Rule {} '{}' references captures {:?} that its pattern never produces",
                index,
                rule.url_pattern,
                unreachable
            );
        }
    }

    let rule_set = RuleSet::compile(rules)?;
    log::debug!("Compiled {} page identifier rule(s)", rule_set.len());
    Ok(rule_set)
}

/// Parse, validate and compile a rule document.
pub fn load_rules(text: &str, format: DocumentFormat) -> Result<RuleSet, CompileError> {
    let rules = parse_rules(text, format)?;
    compile_rules(&rules)
}
