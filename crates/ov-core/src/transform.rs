//! Text case transforms applied to captures inside placeholders.
//!
//! Words are split on whitespace, `-`, `_`, `.` and on a lower-to-upper case
//! boundary (`gettingStarted` is two words). Empty words are dropped.

/// A named transform from a `{name($N)}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transform {
    /// `{$N}`, or a transform name that is not recognized.
    #[default]
    Raw,
    /// `title`: capitalize each word, join with spaces.
    Title,
    /// `dash`: lower-case each word, join with `-`.
    Dash,
    /// `snake`: lower-case each word, join with `_`.
    Snake,
}

impl Transform {
    /// Look up a transform by name.
    ///
    /// Returns `None` for unknown names; callers decide whether to fall back to
    /// [`Transform::Raw`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "dash" => Some(Self::Dash),
            "snake" => Some(Self::Snake),
            _ => None,
        }
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::Raw => None,
            Self::Title => Some("title"),
            Self::Dash => Some("dash"),
            Self::Snake => Some("snake"),
        }
    }

    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Raw => value.to_string(),
            Self::Title => title(value),
            Self::Dash => join_lowercase(value, "-"),
            Self::Snake => join_lowercase(value, "_"),
        }
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_' || c == '.'
}

/// Split a value into words.
pub fn split_words(value: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, c) in value.char_indices() {
        if is_separator(c) {
            if let Some(s) = start.take() {
                words.push(&value[s..i]);
            }
        } else if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            if let Some(s) = start.replace(i) {
                words.push(&value[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
        prev = Some(c);
    }

    if let Some(s) = start {
        words.push(&value[s..]);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title(value: &str) -> String {
    split_words(value)
        .into_iter()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_lowercase(value: &str, separator: &str) -> String {
    split_words(value)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}
