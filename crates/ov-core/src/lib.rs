//! Open Voices Core Library
//!
//! This crate provides the page identifier resolution engine for the Open Voices
//! comment widget. A website owns an ordered list of rules; each rule pairs a
//! glob-style URL pattern with a format template. Resolving a page URL picks the
//! best matching rule and renders its template into a stable page identifier.
//!
//! # Architecture
//!
//! Resolution runs in three stages:
//!
//! 1. `glob`: each rule's URL pattern is compiled into an anchored regex with one
//!    capturing group per wildcard.
//! 2. `matcher`: every rule is evaluated against the URL and the match with the
//!    longest capture list wins (first rule wins on ties).
//! 3. `template`: the winning rule's format is rendered with the captures,
//!    optionally passed through a text transform.
//!
//! Rules are compiled once into a [`RuleSet`], which is immutable and can be shared
//! across threads.
//!
//! # Modules
//!
//! - `glob`: Glob pattern compilation and capture extraction
//! - `matcher`: Rule set compilation and best-match selection
//! - `template`: Format template parsing and rendering
//! - `transform`: Text case transforms (`title`, `dash`, `snake`)
//! - `url`: Percent decoding and path segment helpers
//! - `types`: Shared type definitions
//! - `error`: Rule compilation errors

pub mod error;
pub mod glob;
pub mod matcher;
pub mod template;
pub mod transform;
pub mod types;
pub mod url;

// Re-export commonly used types
pub use error::RuleError;
pub use glob::GlobPattern;
pub use matcher::{CompiledRule, RuleSet};
pub use template::Template;
pub use transform::Transform;
pub use types::{Explanation, Rule, RuleEvaluation, RuleMatch};

/// Resolve the page identifier for `url` against a website's rules.
///
/// Returns `Ok(None)` when no rule matches or when the winning rule renders to an
/// empty identifier. Errors are reserved for malformed rule sets.
pub fn resolve_identifier(rules: &[Rule], url: &str) -> Result<Option<String>, RuleError> {
    let rule_set = RuleSet::compile(rules)?;
    Ok(rule_set.resolve(url))
}
