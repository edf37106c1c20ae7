//! Text coercion for attribute and leaf-element values.
//!
//! Every value that crosses the wire as attribute or leaf text does so
//! through [`Scalar`]: a parse/format pair owned by the value type. The
//! mapping core only ever calls through this trait; it never inspects
//! which concrete type it is coercing.

use chrono::{DateTime, SecondsFormat, Utc};

/// A type with a canonical wire-text form.
///
/// `parse_text` and `format_text` must round-trip: formatting a value
/// and parsing the result yields an equal value.
pub trait Scalar: Sized {
    /// Parses the wire text. The error is a human-readable reason,
    /// wrapped into a positioned `InvalidValue` by the caller.
    fn parse_text(text: &str) -> Result<Self, String>;

    /// The canonical text written to the wire.
    fn format_text(&self) -> String;
}

impl Scalar for String {
    fn parse_text(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }

    fn format_text(&self) -> String {
        self.clone()
    }
}

impl Scalar for f64 {
    fn parse_text(text: &str) -> Result<Self, String> {
        let value: f64 = text.parse().map_err(|_| "invalid float literal".to_string())?;
        if !value.is_finite() {
            return Err("non-finite number".to_string());
        }
        Ok(value)
    }

    fn format_text(&self) -> String {
        let mut buffer = ryu::Buffer::new();
        buffer.format(*self).to_string()
    }
}

impl Scalar for u32 {
    fn parse_text(text: &str) -> Result<Self, String> {
        text.parse().map_err(|_| "invalid unsigned integer".to_string())
    }

    fn format_text(&self) -> String {
        let mut buffer = itoa::Buffer::new();
        buffer.format(*self).to_string()
    }
}

impl Scalar for i32 {
    fn parse_text(text: &str) -> Result<Self, String> {
        text.parse().map_err(|_| "invalid integer".to_string())
    }

    fn format_text(&self) -> String {
        let mut buffer = itoa::Buffer::new();
        buffer.format(*self).to_string()
    }
}

/// ISO-8601 timestamps. Any RFC 3339 offset is accepted on input;
/// output is always UTC with a `Z` suffix, subsecond digits only when
/// the value carries them.
impl Scalar for DateTime<Utc> {
    fn parse_text(text: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("invalid timestamp: {}", e))
    }

    fn format_text(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}
