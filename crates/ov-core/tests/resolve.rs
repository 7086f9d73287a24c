use ov_core::{resolve_identifier, Rule, RuleError, RuleSet};

fn website_rules() -> Vec<Rule> {
    vec![
        Rule::new("https://example.com/blog/**", "{$1}"),
        Rule::new("http://www.example.com/user/*/profile", "User-{title($1)}"),
        Rule::new(
            "https://www1.www2.example.com:443/docs/*/section/*",
            "{dash($1)}-{snake($2)}",
        ),
    ]
}

fn resolve(rules: &[Rule], url: &str) -> Option<String> {
    resolve_identifier(rules, url).unwrap()
}

#[test]
fn resolves_matching_patterns() {
    let rules = website_rules();

    assert_eq!(
        resolve(&rules, "https://example.com/blog/hello-world").as_deref(),
        Some("hello-world")
    );
    assert_eq!(
        resolve(&rules, "http://www.example.com/user/john/profile").as_deref(),
        Some("User-John")
    );
    assert_eq!(
        resolve(
            &rules,
            "https://www1.www2.example.com:443/docs/Getting Started/section/Intro Section"
        )
        .as_deref(),
        Some("getting-started-intro_section")
    );
}

#[test]
fn decodes_captures_before_transforming() {
    let rules = website_rules();
    assert_eq!(
        resolve(
            &rules,
            "https://www1.www2.example.com:443/docs/Getting%20Started/section/Intro%20Section"
        )
        .as_deref(),
        Some("getting-started-intro_section")
    );

    let rules = vec![Rule::new("https://example.com/tags/*", "{$1}")];
    assert_eq!(
        resolve(&rules, "https://example.com/tags/rust%20lang").as_deref(),
        Some("rust lang")
    );
}

#[test]
fn matches_urls_regardless_of_case() {
    let rules = website_rules();
    assert_eq!(
        resolve(&rules, "https://EXAMPLE.com/blog/hello").as_deref(),
        Some("hello")
    );
    assert_eq!(
        resolve(&rules, "https://example.com/Blog/Hello").as_deref(),
        Some("Hello")
    );
    assert_eq!(
        resolve(&rules, "HTTP://WWW.EXAMPLE.COM/USER/john/PROFILE").as_deref(),
        Some("User-John")
    );
}

#[test]
fn returns_none_without_match() {
    let rules = website_rules();
    assert_eq!(resolve(&rules, "https://example.com/no/match/here"), None);
}

#[test]
fn host_is_part_of_the_match() {
    let rules = vec![Rule::new("https://example.org/blog/**", "{$1}-{$2}-{$3}")];
    assert_eq!(resolve(&rules, "https://example.com/blog/hello"), None);
}

#[test]
fn missing_captures_render_empty() {
    let rules = vec![Rule::new("https://example.com/blog/**", "{$1}-{$2}-{$3}")];
    assert_eq!(
        resolve(&rules, "https://example.com/blog/one/two").as_deref(),
        Some("one-two-")
    );
}

#[test]
fn empty_identifier_is_none() {
    let rules = vec![Rule::new("https://example.com/blog/**", "{$1}")];
    assert_eq!(resolve(&rules, "https://example.com/blog/"), None);
}

#[test]
fn more_captures_beat_catch_all() {
    let rules = vec![
        Rule::new("https://example.com/**", "{$1}"),
        Rule::new("https://example.com/*-*", "{$1}/{$2}"),
    ];
    assert_eq!(
        resolve(&rules, "https://example.com/hello-world").as_deref(),
        Some("hello/world")
    );
}

#[test]
fn first_declared_wins_tie() {
    let rules = vec![
        Rule::new("https://example.com/*/*", "first {$1} {$2}"),
        Rule::new("https://example.com/**", "second {$1} {$2}"),
    ];
    assert_eq!(
        resolve(&rules, "https://example.com/a/b").as_deref(),
        Some("first a b")
    );
}

#[test]
fn literal_rule_resolves() {
    let rules = vec![Rule::new("https://example.com/", "Home")];
    assert_eq!(resolve(&rules, "https://example.com/").as_deref(), Some("Home"));
    assert_eq!(resolve(&rules, "https://example.com/other"), None);
}

#[test]
fn unknown_transform_uses_raw_value() {
    let rules = vec![Rule::new("https://example.com/*", "{shout($1)}")];
    assert_eq!(
        resolve(&rules, "https://example.com/Quiet%20Page").as_deref(),
        Some("Quiet Page")
    );
}

#[test]
fn resolution_is_repeatable() {
    let rules = website_rules();
    let set = RuleSet::compile(&rules).unwrap();
    let url = "http://www.example.com/user/jane/profile";

    let first = set.resolve(url);
    let second = set.resolve(url);
    assert_eq!(first, second);
    assert_eq!(first, resolve(&rules, url));
}

#[test]
fn rule_set_is_shareable_across_threads() {
    let set = std::sync::Arc::new(RuleSet::compile(&website_rules()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let set = set.clone();
            std::thread::spawn(move || set.resolve(&format!("https://example.com/blog/post-{i}")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("post-{i}")));
    }
}

#[test]
fn empty_rule_list_is_error() {
    assert!(matches!(
        resolve_identifier(&[], "https://example.com/"),
        Err(RuleError::EmptyRuleSet)
    ));
}
