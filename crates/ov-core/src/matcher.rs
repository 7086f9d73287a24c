//! Match Selector
//!
//! Evaluates every rule of a website against a URL and keeps the match with the
//! longest capture list. A later rule only replaces the current best when it
//! captures strictly more, so the first declared rule wins ties. Declaration order
//! is otherwise irrelevant.
//!
//! Capture count is a proxy for specificity: `blog/*/*/*` beats a catch-all
//! `blog/**` whose remainder holds fewer segments. It does not look at literal
//! context, so `/docs/*/x` and `/*/docs/y` rank the same.

use crate::error::RuleError;
use crate::glob::GlobPattern;
use crate::template::Template;
use crate::types::{Explanation, Rule, RuleEvaluation, RuleMatch};

// =============================================================================
// Compiled Rule
// =============================================================================

/// A rule with its pattern and template compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    glob: GlobPattern,
    template: Template,
}

impl CompiledRule {
    pub fn compile(index: usize, rule: &Rule) -> Result<Self, RuleError> {
        let glob = GlobPattern::compile(&rule.url_pattern).map_err(|source| RuleError::InvalidPattern {
            index,
            pattern: rule.url_pattern.clone(),
            source,
        })?;

        Ok(Self {
            rule: rule.clone(),
            glob,
            template: Template::parse(&rule.format),
        })
    }

    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[inline]
    pub fn glob(&self) -> &GlobPattern {
        &self.glob
    }

    #[inline]
    pub fn template(&self) -> &Template {
        &self.template
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// A website's compiled rules, in declaration order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile a website's rules. The list must not be empty.
    pub fn compile(rules: &[Rule]) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::EmptyRuleSet);
        }

        let rules = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| CompiledRule::compile(index, rule))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter()
    }

    /// Pick the best rule for `url`, or `None` if no rule matches.
    pub fn best_match(&self, url: &str) -> Option<RuleMatch<'_>> {
        let candidates = self.rules.iter().enumerate().filter_map(|(rule_index, compiled)| {
            let captures = compiled.glob.captures(url)?;
            log::debug!(
                "Rule {} '{}' matched with {} capture(s)",
                rule_index,
                compiled.glob.as_str(),
                captures.len()
            );
            Some(RuleMatch {
                rule_index,
                rule: &compiled.rule,
                captures,
            })
        });

        select_longest(candidates, |m| m.captures.len())
    }

    /// Resolve the page identifier for `url`.
    ///
    /// `None` covers both "no rule matched" and "the winning rule rendered empty".
    pub fn resolve(&self, url: &str) -> Option<String> {
        let best = self.best_match(url)?;
        let identifier = self.rules[best.rule_index].template.render(&best.captures);
        if identifier.is_none() {
            log::debug!("Rule {} matched '{}' but rendered an empty identifier", best.rule_index, url);
        }
        identifier
    }

    /// Evaluate every rule and report each outcome alongside the final result.
    pub fn explain(&self, url: &str) -> Explanation {
        let evaluations: Vec<RuleEvaluation> = self
            .rules
            .iter()
            .enumerate()
            .map(|(rule_index, compiled)| RuleEvaluation {
                rule_index,
                url_pattern: compiled.rule.url_pattern.clone(),
                captures: compiled.glob.captures(url),
            })
            .collect();

        let matched = evaluations
            .iter()
            .filter_map(|evaluation| Some((evaluation.rule_index, evaluation.captures.as_deref()?)));
        let winner = select_longest(matched, |(_, captures)| captures.len());

        let identifier = winner.and_then(|(index, captures)| self.rules[index].template.render(captures));
        let winner = winner.map(|(index, _)| index);

        Explanation {
            evaluations,
            winner,
            identifier,
        }
    }
}

/// Keep the candidate with the most captures. A later candidate replaces the
/// current best only when strictly longer, so the first one wins ties.
fn select_longest<T>(candidates: impl IntoIterator<Item = T>, capture_count: impl Fn(&T) -> usize) -> Option<T> {
    let mut best: Option<T> = None;
    for candidate in candidates {
        if best.as_ref().map_or(true, |current| capture_count(&candidate) > capture_count(current)) {
            best = Some(candidate);
        }
    }
    best
}
