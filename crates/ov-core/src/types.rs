//! Core type definitions for Open Voices
//!
//! Rules come from the persistence layer as plain data. Everything else here is
//! produced fresh for each resolution and never stored.

// =============================================================================
// Rules
// =============================================================================

/// A page identifier rule: a glob URL pattern paired with a format template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Glob pattern using `*` (one path segment) and `**` (any remainder).
    pub url_pattern: String,
    /// Template with `{$N}` and `{transform($N)}` placeholders.
    pub format: String,
}

impl Rule {
    pub fn new(url_pattern: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            url_pattern: url_pattern.into(),
            format: format.into(),
        }
    }
}

// =============================================================================
// Match Results
// =============================================================================

/// The winning rule for a URL together with its captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Position of the rule in declaration order.
    pub rule_index: usize,
    pub rule: &'a Rule,
    /// Decoded captures, capture 1 first.
    pub captures: Vec<String>,
}

impl RuleMatch<'_> {
    /// Capture by 1-based placeholder index.
    #[inline]
    pub fn capture(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.captures.get(i))
            .map(String::as_str)
    }
}

/// Outcome of evaluating a single rule against a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub rule_index: usize,
    pub url_pattern: String,
    /// `None` when the pattern did not match.
    pub captures: Option<Vec<String>>,
}

impl RuleEvaluation {
    #[inline]
    pub fn matched(&self) -> bool {
        self.captures.is_some()
    }
}

/// Full trace of a resolution: every rule's outcome, the winner and the result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Explanation {
    pub evaluations: Vec<RuleEvaluation>,
    pub winner: Option<usize>,
    pub identifier: Option<String>,
}
