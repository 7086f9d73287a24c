//! Format Template Renderer
//!
//! A format string is parsed once into literal and placeholder pieces:
//!
//! ```text
//! "User-{title($1)} {$2}"  ->  [Literal("User-"), Placeholder(1, Title), Literal(" "), Placeholder(2, Raw)]
//! ```
//!
//! Rendering substitutes captures (1-based; missing ones become empty), strips any
//! `{...}` left over from malformed templates, and trims the result. An empty
//! result means "no identifier".

use std::sync::OnceLock;

use regex::Regex;

use crate::transform::Transform;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
static LEFTOVER_RE: OnceLock<Regex> = OnceLock::new();

/// `{$N}` or `{name($N)}`.
fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(
            r"\{(?:(?P<transform>[A-Za-z_][A-Za-z0-9_]*)\(\$(?P<call_index>\d+)\)|\$(?P<index>\d+))\}",
        )
        .expect("placeholder regex is valid")
    })
}

fn leftover_regex() -> &'static Regex {
    LEFTOVER_RE.get_or_init(|| Regex::new(r"\{.*?\}").expect("leftover regex is valid"))
}

// =============================================================================
// Pieces
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Placeholder { index: usize, transform: Transform },
}

// =============================================================================
// Template
// =============================================================================

/// A parsed format template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse a format string. Never fails: text that is not a placeholder is kept as
    /// a literal and cleaned up at render time.
    pub fn parse(format: &str) -> Self {
        let mut pieces = Vec::new();
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(format) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                pieces.push(Piece::Literal(format[last..whole.start()].to_string()));
            }
            last = whole.end();

            let (digits, transform) = match (caps.name("transform"), caps.name("call_index")) {
                (Some(name), Some(digits)) => {
                    let transform = Transform::from_name(name.as_str()).unwrap_or_else(|| {
                        log::warn!(
                            "Unknown transform '{}' in format '{}', substituting the raw value",
                            name.as_str(),
                            format
                        );
                        Transform::Raw
                    });
                    (digits.as_str(), transform)
                }
                _ => match caps.name("index") {
                    Some(digits) => (digits.as_str(), Transform::Raw),
                    None => continue,
                },
            };

            // An index too large for usize can never be in range.
            let index = digits.parse::<usize>().unwrap_or(usize::MAX);
            pieces.push(Piece::Placeholder { index, transform });
        }

        if last < format.len() {
            pieces.push(Piece::Literal(format[last..].to_string()));
        }

        Self {
            source: format.to_string(),
            pieces,
        }
    }

    /// The format as written.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Number of placeholders recognized in the format.
    pub fn placeholder_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, Piece::Placeholder { .. }))
            .count()
    }

    /// Capture indices referenced by placeholders, in template order.
    pub fn capture_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Placeholder { index, .. } => Some(*index),
            Piece::Literal(_) => None,
        })
    }

    /// Highest capture index referenced, if any placeholder is present.
    pub fn max_capture_index(&self) -> Option<usize> {
        self.capture_indices().max()
    }

    /// Render with the given captures.
    ///
    /// Returns `None` when the rendered identifier is empty after cleanup.
    pub fn render(&self, captures: &[String]) -> Option<String> {
        let mut out = String::with_capacity(self.source.len());

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Placeholder { index, transform } => {
                    let value = index
                        .checked_sub(1)
                        .and_then(|i| captures.get(i))
                        .map_or("", String::as_str);
                    if value.is_empty() {
                        log::debug!("Placeholder ${} resolved to an empty capture", index);
                    }
                    out.push_str(&transform.apply(value));
                }
            }
        }

        let cleaned = leftover_regex().replace_all(&out, "");
        let identifier = cleaned.trim();
        if identifier.is_empty() {
            None
        } else {
            Some(identifier.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_pieces() {
        let t = Template::parse("User-{title($1)} {$2}");
        assert_eq!(
            t.pieces,
            vec![
                Piece::Literal("User-".to_string()),
                Piece::Placeholder { index: 1, transform: Transform::Title },
                Piece::Literal(" ".to_string()),
                Piece::Placeholder { index: 2, transform: Transform::Raw },
            ]
        );
        assert_eq!(t.placeholder_count(), 2);
        assert_eq!(t.max_capture_index(), Some(2));
    }

    #[test]
    fn test_static_text() {
        let t = Template::parse("Page Title");
        assert_eq!(t.placeholder_count(), 0);
        assert_eq!(t.max_capture_index(), None);
        assert_eq!(t.render(&[]), Some("Page Title".to_string()));
    }

    #[test]
    fn test_render_raw() {
        let t = Template::parse("{$1}");
        assert_eq!(t.render(&caps(&["hello-world"])), Some("hello-world".to_string()));
    }

    #[test]
    fn test_render_transforms() {
        let t = Template::parse("{dash($1)}-{snake($2)}");
        assert_eq!(
            t.render(&caps(&["Getting Started", "Intro Section"])),
            Some("getting-started-intro_section".to_string())
        );

        let t = Template::parse("User-{title($1)}");
        assert_eq!(t.render(&caps(&["john"])), Some("User-John".to_string()));
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let t = Template::parse("{$1}-{$2}-{$3}");
        assert_eq!(t.render(&caps(&["one", "two"])), Some("one-two-".to_string()));
    }

    #[test]
    fn test_index_zero_is_empty() {
        let t = Template::parse("a{$0}b");
        assert_eq!(t.render(&caps(&["x"])), Some("ab".to_string()));
    }

    #[test]
    fn test_huge_index_is_empty() {
        let t = Template::parse("x{$99999999999999999999999}");
        assert_eq!(t.render(&caps(&["one"])), Some("x".to_string()));
    }

    #[test]
    fn test_unknown_transform_passes_raw_value() {
        let t = Template::parse("{rambo($1)}");
        assert_eq!(t.pieces, vec![Piece::Placeholder { index: 1, transform: Transform::Raw }]);
        assert_eq!(t.render(&caps(&["Hello World"])), Some("Hello World".to_string()));
    }

    #[test]
    fn test_leftover_braces_removed() {
        let t = Template::parse("{title} {$1} {   }");
        assert_eq!(t.render(&caps(&["page"])), Some("page".to_string()));
    }

    #[test]
    fn test_empty_render_is_none() {
        assert_eq!(Template::parse("{$1}").render(&[]), None);
        assert_eq!(Template::parse("  {$2}  ").render(&caps(&["one"])), None);
        assert_eq!(Template::parse("{}").render(&[]), None);
    }

    #[test]
    fn test_result_is_trimmed() {
        let t = Template::parse(" {$1} ");
        assert_eq!(t.render(&caps(&["slug"])), Some("slug".to_string()));
    }
}
