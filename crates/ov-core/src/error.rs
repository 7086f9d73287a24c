/// Error type for rule set compilation.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule set is empty")]
    EmptyRuleSet,

    #[error("Invalid URL pattern '{pattern}' in rule {index}: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
