//! Tag values and the canonical tag map

use std::collections::BTreeMap;
use std::fmt;

/// Canonical tag map: lower-cased tag key -> normalized value
pub type CanonicalTagMap = BTreeMap<String, TagValue>;

/// Keys whose values stay text even when they look numeric
pub const ALWAYS_STRING_KEYS: &[&str] = &["title", "description", "comment"];

/// Keys whose text is transliterated to Latin-1
pub const TRANSLITERATED_KEYS: &[&str] = &["title", "artist", "album", "comment", "description"];

/// Text stored as single-byte ISO-8859-1
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Latin1String(Vec<u8>);

impl Latin1String {
    /// Wrap bytes that are already Latin-1 encoded
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Latin1String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every Latin-1 byte is the code point of the same value
        let text: String = self.0.iter().map(|&b| char::from(b)).collect();
        f.write_str(&text)
    }
}

/// A single normalized tag value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagValue {
    Text(String),
    Number(u64),
    Latin1(Latin1String),
}

impl TagValue {
    /// Normalize a raw text value for `key`.
    ///
    /// Digit-only strings become numbers unless `key` must stay text.
    pub fn from_raw_text(key: &str, raw: &str) -> Self {
        if ALWAYS_STRING_KEYS.contains(&key) {
            return TagValue::Text(raw.to_string());
        }
        match parse_digits(raw) {
            Some(n) => TagValue::Number(n),
            None => TagValue::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            TagValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, TagValue::Text(_) | TagValue::Latin1(_))
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(s) => f.write_str(s),
            TagValue::Number(n) => write!(f, "{}", n),
            TagValue::Latin1(s) => fmt::Display::fmt(s, f),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Text(s)
    }
}

impl From<u64> for TagValue {
    fn from(n: u64) -> Self {
        TagValue::Number(n)
    }
}

/// Parse `^\d+$`; values that overflow stay unparsed
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
