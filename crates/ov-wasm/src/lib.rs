//! WebAssembly bindings for Open Voices page identifier resolution

use wasm_bindgen::prelude::*;
use ov_compiler::{compile_rules, parse_rules_json, validate_rules};
use ov_core::RuleSet;

fn compile_json(rules_json: &str) -> Result<RuleSet, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    compile_rules(&rules).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A website's rules, compiled once and reused for every lookup.
#[wasm_bindgen]
pub struct PageIdentifierResolver {
    rule_set: RuleSet,
}

#[wasm_bindgen]
impl PageIdentifierResolver {
    #[wasm_bindgen(constructor)]
    pub fn new(rules_json: &str) -> Result<PageIdentifierResolver, JsValue> {
        Ok(Self {
            rule_set: compile_json(rules_json)?,
        })
    }

    /// Page identifier for `url`, or `undefined` when no usable identifier exists.
    pub fn resolve(&self, url: &str) -> Option<String> {
        self.rule_set.resolve(url)
    }

    #[wasm_bindgen(getter, js_name = ruleCount)]
    pub fn rule_count(&self) -> usize {
        self.rule_set.len()
    }

    /// Per-rule evaluation for the settings page preview.
    pub fn explain(&self, url: &str) -> JsValue {
        let explanation = self.rule_set.explain(url);
        let result = js_sys::Object::new();

        let evaluations = js_sys::Array::new_with_length(explanation.evaluations.len() as u32);
        for (i, evaluation) in explanation.evaluations.iter().enumerate() {
            let entry = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&entry, &"url".into(), &JsValue::from_str(&evaluation.url_pattern));
            let _ = js_sys::Reflect::set(&entry, &"matched".into(), &JsValue::from(evaluation.matched()));

            let captures = js_sys::Array::new();
            for capture in evaluation.captures.iter().flatten() {
                captures.push(&JsValue::from_str(capture));
            }
            let _ = js_sys::Reflect::set(&entry, &"captures".into(), &captures);
            evaluations.set(i as u32, entry.into());
        }

        let winner = explanation.winner.map_or(JsValue::NULL, |index| JsValue::from(index as u32));
        let identifier = explanation
            .identifier
            .as_deref()
            .map_or(JsValue::NULL, JsValue::from_str);

        let _ = js_sys::Reflect::set(&result, &"rules".into(), &evaluations);
        let _ = js_sys::Reflect::set(&result, &"winner".into(), &winner);
        let _ = js_sys::Reflect::set(&result, &"identifier".into(), &identifier);
        result.into()
    }
}

/// One-shot resolution. Returns `undefined` when no rule produces an identifier.
#[wasm_bindgen]
pub fn resolve_identifier(rules_json: &str, url: &str) -> Result<Option<String>, JsValue> {
    Ok(compile_json(rules_json)?.resolve(url))
}

/// Validate a rule list; returns the error messages, empty when valid.
#[wasm_bindgen(js_name = validate_rules)]
pub fn validate_rules_js(rules_json: &str) -> Result<js_sys::Array, JsValue> {
    let rules = parse_rules_json(rules_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let messages = js_sys::Array::new();

    if let Err(errors) = validate_rules(&rules) {
        for error in errors {
            messages.push(&JsValue::from_str(&error.to_string()));
        }
    }

    Ok(messages)
}

#[wasm_bindgen]
pub fn is_valid_format(format: &str) -> bool {
    ov_compiler::is_valid_format(format)
}
