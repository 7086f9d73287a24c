use std::path::Path;

use ov_core::Rule;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A rule as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleSpec {
    #[serde(alias = "url_pattern")]
    pub url: String,
    pub format: String,
}

/// A website's rule list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleDocument {
    pub rules: Vec<RuleSpec>,
}

impl From<RuleSpec> for Rule {
    fn from(spec: RuleSpec) -> Self {
        Rule::new(spec.url, spec.format)
    }
}

impl From<&Rule> for RuleSpec {
    fn from(rule: &Rule) -> Self {
        Self {
            url: rule.url_pattern.clone(),
            format: rule.format.clone(),
        }
    }
}

impl RuleDocument {
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules.into_iter().map(Rule::from).collect()
    }
}

/// Error type for rule document parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid JSON rule document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML rule document: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRules {
    List(Vec<RuleSpec>),
    Document(RuleDocument),
}

/// Parse rules from JSON: either a bare array or `{ "rules": [...] }`.
pub fn parse_rules_json(text: &str) -> Result<Vec<Rule>, ParseError> {
    let specs = match serde_json::from_str::<JsonRules>(text)? {
        JsonRules::List(specs) => specs,
        JsonRules::Document(doc) => doc.rules,
    };
    Ok(specs.into_iter().map(Rule::from).collect())
}

/// Parse rules from TOML with a top-level `[[rules]]` array.
pub fn parse_rules_toml(text: &str) -> Result<Vec<Rule>, ParseError> {
    let doc: RuleDocument = toml::from_str(text)?;
    Ok(doc.into_rules())
}

pub fn parse_rules(text: &str, format: DocumentFormat) -> Result<Vec<Rule>, ParseError> {
    match format {
        DocumentFormat::Json => parse_rules_json(text),
        DocumentFormat::Toml => parse_rules_toml(text),
    }
}
