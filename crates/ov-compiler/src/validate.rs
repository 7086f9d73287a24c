//! Rule set validation.
//!
//! Checks applied before rules reach the engine, matching what the website
//! settings form accepts:
//!
//! - between 1 and [`MAX_RULES`] rules
//! - each `url` is an absolute URL
//! - each `format` is a non-empty run of placeholders (`{$N}`, `{title($N)}`,
//!   `{dash($N)}`, `{snake($N)}`) and literal `[A-Za-z0-9\-_ ]` text
//!
//! Every problem is reported, not just the first one.

use std::sync::OnceLock;

use ov_core::{Rule, Template};
use regex::Regex;

pub const MIN_RULES: usize = 1;
pub const MAX_RULES: usize = 10;

static FORMAT_RE: OnceLock<Regex> = OnceLock::new();

fn format_regex() -> &'static Regex {
    FORMAT_RE.get_or_init(|| {
        Regex::new(r"^(?:\{(?:title|dash|snake)\(\$\d+\)\}|[A-Za-z0-9\-_ ]+|\{\$\d+\})+$")
            .expect("format regex is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least {min} page identifier rule is required")]
    TooFewRules { min: usize },

    #[error("A maximum of {max} page identifier rules is allowed, got {count}")]
    TooManyRules { count: usize, max: usize },

    #[error("Rule {index}: invalid URL '{url}': {reason}")]
    InvalidUrl { index: usize, url: String, reason: String },

    #[error("Rule {index}: format must not be empty")]
    EmptyFormat { index: usize },

    #[error("Rule {index}: format '{format}' must be placeholders or static text")]
    InvalidFormat { index: usize, format: String },
}

impl ValidationError {
    /// Index of the offending rule, for per-rule errors.
    pub fn rule_index(&self) -> Option<usize> {
        match self {
            Self::TooFewRules { .. } | Self::TooManyRules { .. } => None,
            Self::InvalidUrl { index, .. }
            | Self::EmptyFormat { index }
            | Self::InvalidFormat { index, .. } => Some(*index),
        }
    }
}

/// Check a single format string against the placeholder grammar.
pub fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && format_regex().is_match(format)
}

/// Validate a single rule at position `index`, appending problems to `errors`.
pub fn validate_rule(index: usize, rule: &Rule, errors: &mut Vec<ValidationError>) {
    if let Err(e) = url::Url::parse(&rule.url_pattern) {
        errors.push(ValidationError::InvalidUrl {
            index,
            url: rule.url_pattern.clone(),
            reason: e.to_string(),
        });
    }

    if rule.format.is_empty() {
        errors.push(ValidationError::EmptyFormat { index });
    } else if !format_regex().is_match(&rule.format) {
        errors.push(ValidationError::InvalidFormat {
            index,
            format: rule.format.clone(),
        });
    }
}

/// Validate a website's rule list.
pub fn validate_rules(rules: &[Rule]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if rules.len() < MIN_RULES {
        errors.push(ValidationError::TooFewRules { min: MIN_RULES });
    } else if rules.len() > MAX_RULES {
        errors.push(ValidationError::TooManyRules {
            count: rules.len(),
            max: MAX_RULES,
        });
    }

    for (index, rule) in rules.iter().enumerate() {
        validate_rule(index, rule, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Placeholder indices that can never be filled: `$0`, or indices past the
/// pattern's wildcard count when the pattern has no `**`. Not an error, they
/// render empty.
pub fn unreachable_captures(rule: &Rule) -> Vec<usize> {
    let has_remainder = rule.url_pattern.contains("**");
    let wildcards = rule.url_pattern.matches('*').count();
    let mut indices: Vec<usize> = Template::parse(&rule.format)
        .capture_indices()
        .filter(|&i| i == 0 || (!has_remainder && i > wildcards))
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_formats() {
        for format in [
            "{title($1)}",
            "{dash($1)}",
            "{snake($1)}",
            "{title($1)} {dash($2)}",
            "{title($1)} static {dash($2)} text {snake($3)}",
            "{$1}",
            "static text",
            "User-{title($1)}",
        ] {
            assert!(is_valid_format(format), "expected valid: {format}");
        }
    }

    #[test]
    fn test_invalid_formats() {
        for format in [
            "",
            "{title($1) {dash($2)}",
            "{title($1)} {dash($2)} @invalid",
            "{}",
            "{   }",
            "{title} {dash} {snake}",
            "{rambo($1)}",
        ] {
            assert!(!is_valid_format(format), "expected invalid: {format}");
        }
    }

    #[test]
    fn test_validate_ok() {
        let rules = vec![
            Rule::new("https://example.com/blog/**", "{$1}"),
            Rule::new("http://www.example.com/user/*/profile", "User-{title($1)}"),
        ];
        assert_eq!(validate_rules(&rules), Ok(()));
    }

    #[test]
    fn test_validate_rule_count() {
        assert_eq!(
            validate_rules(&[]),
            Err(vec![ValidationError::TooFewRules { min: 1 }])
        );

        let rules = vec![Rule::new("https://example.com/*", "{$1}"); 11];
        assert_eq!(
            validate_rules(&rules),
            Err(vec![ValidationError::TooManyRules { count: 11, max: 10 }])
        );
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let rules = vec![
            Rule::new("not a url", "{$1}"),
            Rule::new("https://example.com/*", ""),
            Rule::new("https://example.com/*", "{rambo($1)}"),
        ];
        let errors = validate_rules(&rules).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::InvalidUrl { index: 0, .. }));
        assert_eq!(errors[1], ValidationError::EmptyFormat { index: 1 });
        assert!(matches!(errors[2], ValidationError::InvalidFormat { index: 2, .. }));
        assert_eq!(errors[2].rule_index(), Some(2));
    }

    #[test]
    fn test_wildcard_url_is_valid() {
        let rules = vec![Rule::new("https://example.com/docs/*/section/*", "{$1}")];
        assert_eq!(validate_rules(&rules), Ok(()));
    }

    #[test]
    fn test_unreachable_captures() {
        let rule = Rule::new("https://example.com/*/x", "{$1}-{$3}-{title($3)}");
        assert_eq!(unreachable_captures(&rule), vec![3]);

        let rule = Rule::new("https://example.com/*", "{$0}{$1}");
        assert_eq!(unreachable_captures(&rule), vec![0]);

        let rule = Rule::new("https://example.com/**", "{$1}-{$3}");
        assert!(unreachable_captures(&rule).is_empty());

        let rule = Rule::new("https://example.com/about", "About");
        assert!(unreachable_captures(&rule).is_empty());
    }
}
