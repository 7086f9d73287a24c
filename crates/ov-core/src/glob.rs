//! Glob Pattern Compiler
//!
//! Turns a rule's URL glob into an anchored regex with one capturing group per
//! wildcard, in left-to-right order:
//!
//! - `*` matches one path segment: `([^/]+)`
//! - `**` matches any remainder including `/`: `(.*)`
//! - everything else is matched literally, scheme and host included
//!
//! Matching ignores ASCII and Unicode case but is strict about trailing slashes.
//!
//! A `**` capture is split into its path segments, so one wildcard can yield
//! several captures (`blog/**` over `blog/one/two` yields `one`, `two`). Every
//! capture is percent-decoded before it is returned.

use regex::Regex;

use crate::url::{path_segments, percent_decode};

// =============================================================================
// Tokens
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wildcard {
    /// `*`
    Segment,
    /// `**`
    Remainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlobToken<'a> {
    Literal(&'a str),
    Wildcard(Wildcard),
}

fn tokenize(pattern: &str) -> Vec<GlobToken<'_>> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }

        if literal_start < i {
            tokens.push(GlobToken::Literal(&pattern[literal_start..i]));
        }

        if bytes.get(i + 1) == Some(&b'*') {
            tokens.push(GlobToken::Wildcard(Wildcard::Remainder));
            i += 2;
        } else {
            tokens.push(GlobToken::Wildcard(Wildcard::Segment));
            i += 1;
        }
        literal_start = i;
    }

    if literal_start < bytes.len() {
        tokens.push(GlobToken::Literal(&pattern[literal_start..]));
    }

    tokens
}

fn to_regex_source(tokens: &[GlobToken<'_>]) -> String {
    // (?i): case-insensitive. (?s): `**` spans newlines too
    let mut source = String::from("(?is)^");
    for token in tokens {
        match token {
            GlobToken::Literal(text) => source.push_str(&regex::escape(text)),
            GlobToken::Wildcard(Wildcard::Segment) => source.push_str("([^/]+)"),
            GlobToken::Wildcard(Wildcard::Remainder) => source.push_str("(.*)"),
        }
    }
    source.push('$');
    source
}

// =============================================================================
// Compiled Pattern
// =============================================================================

/// A compiled URL glob.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    regex: Regex,
    wildcards: Vec<Wildcard>,
}

impl GlobPattern {
    /// Compile a glob pattern.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let tokens = tokenize(pattern);
        let regex = Regex::new(&to_regex_source(&tokens))?;
        let wildcards = tokens
            .iter()
            .filter_map(|token| match token {
                GlobToken::Wildcard(w) => Some(*w),
                GlobToken::Literal(_) => None,
            })
            .collect();

        Ok(Self {
            source: pattern.to_string(),
            regex,
            wildcards,
        })
    }

    /// The pattern as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of `*` and `**` wildcards in the pattern.
    #[inline]
    pub fn wildcard_count(&self) -> usize {
        self.wildcards.len()
    }

    /// True when the pattern has no wildcards and only matches itself.
    #[inline]
    pub fn is_literal(&self) -> bool {
        self.wildcards.is_empty()
    }

    /// Check whether `url` matches without extracting captures.
    #[inline]
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Match `url` and return the decoded captures, or `None` if it does not match.
    ///
    /// A match can legitimately produce zero captures: a literal pattern, or a
    /// `**` that matched nothing but slashes.
    pub fn captures(&self, url: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(url)?;
        let mut out = Vec::with_capacity(self.wildcards.len());

        for (i, wildcard) in self.wildcards.iter().enumerate() {
            let raw = caps.get(i + 1).map_or("", |m| m.as_str());
            match wildcard {
                Wildcard::Segment => out.push(percent_decode(raw).into_owned()),
                Wildcard::Remainder => {
                    out.extend(path_segments(raw).map(|s| percent_decode(s).into_owned()));
                }
            }
        }

        Some(out)
    }
}
