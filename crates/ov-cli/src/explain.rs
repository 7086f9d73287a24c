use std::path::Path;

use ov_core::Explanation;
use serde::Serialize;

use crate::rules;

#[derive(Serialize)]
struct RuleReport<'a> {
    index: usize,
    url: &'a str,
    format: &'a str,
    matched: bool,
    captures: &'a [String],
    winner: bool,
}

#[derive(Serialize)]
struct ExplainReport<'a> {
    url: &'a str,
    identifier: Option<&'a str>,
    rules: Vec<RuleReport<'a>>,
}

pub fn run_explain(path: &Path, url: &str, json: bool) -> Result<(), String> {
    let rule_set = rules::load_rule_set(path)?;
    let explanation = rule_set.explain(url);

    let formats: Vec<&str> = rule_set.rules().map(|r| r.rule().format.as_str()).collect();
    let report = build_report(url, &explanation, &formats);

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("URL: {}", url);
    println!();
    for rule in &report.rules {
        let marker = if rule.winner { "*" } else { " " };
        if rule.matched {
            println!(
                "{} [{}] {} -> {} capture(s) {:?}",
                marker,
                rule.index,
                rule.url,
                rule.captures.len(),
                rule.captures
            );
        } else {
            println!("{} [{}] {} -> no match", marker, rule.index, rule.url);
        }
    }
    println!();

    match (explanation.winner, report.identifier) {
        (Some(index), Some(identifier)) => {
            println!("Winner:      rule {} ('{}')", index, formats[index]);
            println!("Identifier:  {}", identifier);
        }
        (Some(index), None) => {
            println!("Winner:      rule {} ('{}')", index, formats[index]);
            println!("Identifier:  (empty)");
        }
        (None, _) => println!("No rule matched"),
    }

    Ok(())
}

fn build_report<'a>(url: &'a str, explanation: &'a Explanation, formats: &[&'a str]) -> ExplainReport<'a> {
    let rules = explanation
        .evaluations
        .iter()
        .map(|evaluation| RuleReport {
            index: evaluation.rule_index,
            url: &evaluation.url_pattern,
            format: formats.get(evaluation.rule_index).copied().unwrap_or(""),
            matched: evaluation.matched(),
            captures: evaluation.captures.as_deref().unwrap_or(&[]),
            winner: explanation.winner == Some(evaluation.rule_index),
        })
        .collect();

    ExplainReport {
        url,
        identifier: explanation.identifier.as_deref(),
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ov_core::{Rule, RuleSet};

    #[test]
    fn test_build_report() {
        let rules = vec![
            Rule::new("https://example.org/**", "{$1}"),
            Rule::new("https://example.com/*", "page-{$1}"),
        ];
        let set = RuleSet::compile(&rules).unwrap();
        let explanation = set.explain("https://example.com/about");
        let formats = ["{$1}", "page-{$1}"];

        let report = build_report("https://example.com/about", &explanation, &formats);
        assert_eq!(report.identifier, Some("page-about"));
        assert!(!report.rules[0].matched);
        assert!(report.rules[1].winner);
        assert_eq!(report.rules[1].captures, ["about".to_string()]);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["rules"][1]["format"], "page-{$1}");
        assert_eq!(value["rules"][0]["captures"], serde_json::json!([]));
    }
}
