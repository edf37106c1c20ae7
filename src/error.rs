//! Error types for GPX reading and writing.

use std::fmt::{self, Display};
use std::io;

/// Result type alias for gpx_wire operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for GPX reading and writing.
///
/// Every error is fatal to the call that produced it: a failed `read`
/// leaves no partial document behind, and combinators never catch and
/// retry inner failures.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    position: Option<Position>,
}

/// Position information for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from start.
    pub offset: usize,
}

/// The kind of error that occurred.
#[derive(Debug)]
pub enum ErrorKind {
    /// An I/O error occurred.
    Io(io::Error),
    /// Unexpected end of input.
    UnexpectedEof,
    /// Malformed token stream.
    Syntax(String),
    /// Invalid XML name.
    InvalidName(String),
    /// Invalid escape sequence.
    InvalidEscape(String),
    /// Invalid UTF-8.
    InvalidUtf8,
    /// Unclosed tag.
    UnclosedTag(String),
    /// Mismatched closing tag.
    MismatchedTag {
        /// The expected tag name.
        expected: String,
        /// The actual tag name found.
        found: String,
    },
    /// The document does not match the GPX grammar (wrong root element,
    /// missing required element, stray text content, ...).
    SchemaViolation(String),
    /// An element matched none of the declared children of a reader
    /// configured to reject unknown elements.
    UnexpectedElement(String),
    /// A required attribute was absent.
    MissingAttribute(String),
    /// An attribute or leaf element held text the target type rejects.
    InvalidValue {
        /// The attribute or element name whose text was rejected.
        name: String,
        /// The raw offending text.
        raw: String,
        /// Why the coercion failed.
        reason: String,
    },
    /// A value-type constructor was handed a number outside its domain.
    OutOfRange(String),
    /// A construction function rejected an otherwise well-formed element
    /// (cross-field constraint violation).
    DomainValidation(String),
    /// Tokens remained after the document root was fully consumed.
    TrailingContent,
}

impl Error {
    /// Creates a new error with the given kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, position: None }
    }

    /// Creates a new error with position information.
    #[inline]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the position where the error occurred.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Creates an unexpected EOF error.
    #[inline]
    pub fn unexpected_eof() -> Self {
        Self::new(ErrorKind::UnexpectedEof)
    }

    /// Creates a syntax error.
    #[inline]
    pub fn syntax<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::Syntax(msg.into()))
    }

    /// Creates an invalid name error.
    #[inline]
    pub fn invalid_name<S: Into<String>>(name: S) -> Self {
        Self::new(ErrorKind::InvalidName(name.into()))
    }

    /// Creates an invalid escape error.
    #[inline]
    pub fn invalid_escape<S: Into<String>>(seq: S) -> Self {
        Self::new(ErrorKind::InvalidEscape(seq.into()))
    }

    /// Creates an unclosed tag error.
    #[inline]
    pub fn unclosed_tag<S: Into<String>>(tag: S) -> Self {
        Self::new(ErrorKind::UnclosedTag(tag.into()))
    }

    /// Creates a mismatched tag error.
    #[inline]
    pub fn mismatched_tag<S: Into<String>>(expected: S, found: S) -> Self {
        Self::new(ErrorKind::MismatchedTag {
            expected: expected.into(),
            found: found.into(),
        })
    }

    /// Creates a schema violation error.
    #[inline]
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::SchemaViolation(msg.into()))
    }

    /// Creates an unexpected element error.
    #[inline]
    pub fn unexpected_element<S: Into<String>>(name: S) -> Self {
        Self::new(ErrorKind::UnexpectedElement(name.into()))
    }

    /// Creates a missing attribute error.
    #[inline]
    pub fn missing_attribute<S: Into<String>>(name: S) -> Self {
        Self::new(ErrorKind::MissingAttribute(name.into()))
    }

    /// Creates an invalid value error naming the attribute or element
    /// and the raw text that was rejected.
    #[inline]
    pub fn invalid_value<S: Into<String>>(name: S, raw: S, reason: S) -> Self {
        Self::new(ErrorKind::InvalidValue {
            name: name.into(),
            raw: raw.into(),
            reason: reason.into(),
        })
    }

    /// Creates an out-of-range error.
    #[inline]
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::OutOfRange(msg.into()))
    }

    /// Creates a domain validation error.
    #[inline]
    pub fn domain<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::DomainValidation(msg.into()))
    }

    /// Creates a trailing content error.
    #[inline]
    pub fn trailing_content() -> Self {
        Self::new(ErrorKind::TrailingContent)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Io(e) => write!(f, "I/O error: {}", e),
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            ErrorKind::Syntax(msg) => write!(f, "syntax error: {}", msg),
            ErrorKind::InvalidName(name) => write!(f, "invalid XML name: {}", name),
            ErrorKind::InvalidEscape(seq) => write!(f, "invalid escape sequence: {}", seq),
            ErrorKind::InvalidUtf8 => write!(f, "invalid UTF-8"),
            ErrorKind::UnclosedTag(tag) => write!(f, "unclosed tag: <{}>", tag),
            ErrorKind::MismatchedTag { expected, found } => {
                write!(f, "mismatched closing tag: expected </{}>, found </{}>", expected, found)
            }
            ErrorKind::SchemaViolation(msg) => write!(f, "schema violation: {}", msg),
            ErrorKind::UnexpectedElement(name) => write!(f, "unexpected element: <{}>", name),
            ErrorKind::MissingAttribute(name) => write!(f, "missing required attribute: {}", name),
            ErrorKind::InvalidValue { name, raw, reason } => {
                write!(f, "invalid value for '{}': {:?} ({})", name, raw, reason)
            }
            ErrorKind::OutOfRange(msg) => write!(f, "value out of range: {}", msg),
            ErrorKind::DomainValidation(msg) => write!(f, "domain validation failed: {}", msg),
            ErrorKind::TrailingContent => write!(f, "trailing content after document root"),
        }?;

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {} (offset {})", pos.line, pos.column, pos.offset)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::new(ErrorKind::Io(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::syntax("expected '>'");
        assert_eq!(err.to_string(), "syntax error: expected '>'");
    }

    #[test]
    fn test_error_with_position() {
        let err = Error::syntax("expected '>'")
            .with_position(Position { line: 5, column: 10, offset: 42 });
        assert_eq!(
            err.to_string(),
            "syntax error: expected '>' at line 5, column 10 (offset 42)"
        );
    }

    #[test]
    fn test_invalid_value_names_attribute_and_raw_text() {
        let err = Error::invalid_value("lat", "abc", "invalid float literal");
        let msg = err.to_string();
        assert!(msg.contains("lat"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_mismatched_tag_error() {
        let err = Error::mismatched_tag("trk", "rte");
        assert_eq!(
            err.to_string(),
            "mismatched closing tag: expected </trk>, found </rte>"
        );
    }

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::from(io_err);
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_trailing_content() {
        let err = Error::trailing_content();
        assert!(err.to_string().contains("trailing content"));
    }
}
