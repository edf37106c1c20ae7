//! XML escape and unescape utilities.
//!
//! Escaping only ever splits the input at single ASCII bytes, so all
//! slicing below stays on UTF-8 boundaries.

use memchr::{memchr2, memchr3};
use std::borrow::Cow;

/// Escapes XML special characters in a string.
///
/// Returns a `Cow<str>` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !needs_escape(s.as_bytes()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + s.len() / 8);
    escape_to(s, &mut result);
    Cow::Owned(result)
}

#[inline]
fn needs_escape(bytes: &[u8]) -> bool {
    memchr3(b'<', b'>', b'&', bytes).is_some() || memchr2(b'"', b'\'', bytes).is_some()
}

/// Escapes XML special characters and appends to the given string.
pub fn escape_to(s: &str, out: &mut String) {
    let mut rest = s;
    while let Some(i) = rest
        .bytes()
        .position(|b| matches!(b, b'<' | b'>' | b'&' | b'"' | b'\''))
    {
        out.push_str(&rest[..i]);
        out.push_str(match rest.as_bytes()[i] {
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'&' => "&amp;",
            b'"' => "&quot;",
            _ => "&apos;",
        });
        rest = &rest[i + 1..];
    }
    out.push_str(rest);
}

/// Error type for unescape operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnescapeError {
    /// The invalid entity that caused the error.
    pub entity: String,
    /// Position in the input where the error occurred.
    pub position: usize,
}

impl std::fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid XML entity '{}' at position {}", self.entity, self.position)
    }
}

impl std::error::Error for UnescapeError {}

/// Unescapes XML entities in a string.
///
/// Returns a `Cow<str>` to avoid allocation when no entities are present.
#[inline]
pub fn unescape(s: &str) -> Result<Cow<'_, str>, UnescapeError> {
    if !s.contains('&') {
        return Ok(Cow::Borrowed(s));
    }

    let mut result = String::with_capacity(s.len());
    unescape_to(s, &mut result)?;
    Ok(Cow::Owned(result))
}

/// Unescapes XML entities and appends to the given string.
pub fn unescape_to(s: &str, out: &mut String) -> Result<(), UnescapeError> {
    let mut rest = s;
    let mut consumed = 0;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);

        let entity_start = consumed + amp;
        let tail = &rest[amp + 1..];
        let semi = tail.find(';').filter(|&len| len > 0).ok_or_else(|| UnescapeError {
            entity: String::from("&"),
            position: entity_start,
        })?;

        let entity = &tail[..semi];
        let decoded = decode_entity(entity)
            .or_else(|| decode_numeric_entity(entity))
            .ok_or_else(|| UnescapeError {
                entity: format!("&{};", entity),
                position: entity_start,
            })?;
        out.push(decoded);

        consumed += amp + semi + 2;
        rest = &tail[semi + 1..];
    }

    out.push_str(rest);
    Ok(())
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Decodes a numeric character reference (&#NNN; or &#xHHH;).
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let (radix, digits) = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    if digits.is_empty() {
        return None;
    }

    let code = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(code)
}
