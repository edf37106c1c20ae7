//! Low-level XML tokenizer.
//!
//! A zero-copy, forward-only tokenizer producing the event stream the
//! mapping layer consumes: start tags with attributes, end tags, empty
//! elements and text. Constructs the mapping layer has no use for
//! (declarations, comments, processing instructions, DOCTYPE) are
//! consumed internally and never surface as events; CDATA sections fold
//! into ordinary text.

use crate::error::{Error, ErrorKind, Position, Result};
use crate::escape::unescape;
use memchr::{memchr, memchr2};
use std::borrow::Cow;

/// Whitespace lookup table for fast checking.
static IS_WHITESPACE: [bool; 256] = {
    let mut lut = [false; 256];
    lut[b' ' as usize] = true;
    lut[b'\t' as usize] = true;
    lut[b'\n' as usize] = true;
    lut[b'\r' as usize] = true;
    lut
};

/// Name start character lookup table.
static IS_NAME_START: [bool; 256] = {
    let mut lut = [false; 256];
    let mut i = b'A';
    while i <= b'Z' {
        lut[i as usize] = true;
        i += 1;
    }
    let mut i = b'a';
    while i <= b'z' {
        lut[i as usize] = true;
        i += 1;
    }
    lut[b'_' as usize] = true;
    lut[b':' as usize] = true;
    // Allow high bytes for UTF-8
    let mut i: usize = 0x80;
    while i < 256 {
        lut[i] = true;
        i += 1;
    }
    lut
};

/// Name character lookup table.
static IS_NAME_CHAR: [bool; 256] = {
    let mut lut = IS_NAME_START;
    let mut i = b'0';
    while i <= b'9' {
        lut[i as usize] = true;
        i += 1;
    }
    lut[b'-' as usize] = true;
    lut[b'.' as usize] = true;
    lut
};

/// An XML event produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent<'a> {
    /// Start of an element: `<name attr="value">`
    StartElement {
        /// Element name.
        name: Cow<'a, str>,
        /// Element attributes.
        attributes: Vec<Attribute<'a>>,
    },
    /// End of an element: `</name>`
    EndElement {
        /// Element name.
        name: Cow<'a, str>,
    },
    /// Empty element: `<name attr="value"/>`
    EmptyElement {
        /// Element name.
        name: Cow<'a, str>,
        /// Element attributes.
        attributes: Vec<Attribute<'a>>,
    },
    /// Text content between elements (CDATA included).
    Text(Cow<'a, str>),
    /// End of document.
    Eof,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// The attribute name.
    pub name: Cow<'a, str>,
    /// The attribute value, entities decoded.
    pub value: Cow<'a, str>,
}

/// A fast, zero-copy XML tokenizer.
pub struct XmlReader<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    /// Stack of open element names for balance validation.
    element_stack: Vec<String>,
}

impl<'a> XmlReader<'a> {
    /// Creates a new tokenizer from a string.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &'a str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Creates a new tokenizer from bytes.
    #[inline]
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
            element_stack: Vec::with_capacity(8),
        }
    }

    /// Returns the current position in the input.
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.col,
            offset: self.pos,
        }
    }

    /// Returns the number of currently open elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.element_stack.len()
    }

    /// Reads the next event, advancing past any skipped constructs.
    pub fn next_event(&mut self) -> Result<XmlEvent<'a>> {
        loop {
            self.skip_whitespace();

            if self.pos >= self.input.len() {
                if let Some(tag) = self.element_stack.pop() {
                    return Err(Error::unclosed_tag(tag).with_position(self.position()));
                }
                return Ok(XmlEvent::Eof);
            }

            if self.input[self.pos] == b'<' {
                if let Some(event) = self.read_tag()? {
                    return Ok(event);
                }
                // Skipped construct, keep scanning.
            } else {
                return self.read_text();
            }
        }
    }

    /// Fast whitespace skipping using the lookup table.
    #[inline(always)]
    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            let b = self.input[self.pos];
            if !IS_WHITESPACE[b as usize] {
                break;
            }
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    /// Reads text content up to the next `<`, trimming trailing whitespace.
    fn read_text(&mut self) -> Result<XmlEvent<'a>> {
        let start = self.pos;

        match memchr(b'<', &self.input[self.pos..]) {
            Some(offset) => {
                self.update_position_for_range(self.pos, self.pos + offset);
                self.pos += offset;
            }
            None => {
                self.update_position_for_range(self.pos, self.input.len());
                self.pos = self.input.len();
            }
        }

        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| Error::new(ErrorKind::InvalidUtf8))?;

        match unescape(text.trim_end()) {
            Ok(unescaped) => Ok(XmlEvent::Text(unescaped)),
            Err(e) => Err(Error::invalid_escape(e.entity).with_position(self.position())),
        }
    }

    /// Updates line/column tracking for a range of bytes.
    #[inline(always)]
    fn update_position_for_range(&mut self, start: usize, end: usize) {
        for &b in &self.input[start..end] {
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Reads one tag. Returns `None` for constructs that are consumed
    /// without producing an event.
    fn read_tag(&mut self) -> Result<Option<XmlEvent<'a>>> {
        debug_assert_eq!(self.input[self.pos], b'<');
        self.pos += 1;
        self.col += 1;

        if self.pos >= self.input.len() {
            return Err(Error::unexpected_eof().with_position(self.position()));
        }

        match self.input[self.pos] {
            b'/' => self.read_end_element().map(Some),
            b'?' => {
                self.skip_processing_instruction()?;
                Ok(None)
            }
            b'!' => self.read_special(),
            _ => self.read_start_element().map(Some),
        }
    }

    /// Reads a start element or empty element.
    fn read_start_element(&mut self) -> Result<XmlEvent<'a>> {
        let name = self.read_name()?;
        let attributes = self.read_attributes()?;

        self.skip_whitespace();

        if self.pos >= self.input.len() {
            return Err(Error::unexpected_eof().with_position(self.position()));
        }

        if self.input[self.pos] == b'/' {
            self.pos += 1;
            self.col += 1;
            self.expect_char(b'>')?;
            Ok(XmlEvent::EmptyElement {
                name: Cow::Borrowed(name),
                attributes,
            })
        } else if self.input[self.pos] == b'>' {
            self.pos += 1;
            self.col += 1;
            self.element_stack.push(name.to_string());
            Ok(XmlEvent::StartElement {
                name: Cow::Borrowed(name),
                attributes,
            })
        } else {
            Err(Error::syntax("expected '>' or '/>'").with_position(self.position()))
        }
    }

    /// Reads an end element and validates tag balance.
    fn read_end_element(&mut self) -> Result<XmlEvent<'a>> {
        debug_assert_eq!(self.input[self.pos], b'/');
        self.pos += 1;
        self.col += 1;

        let name = self.read_name()?;
        self.skip_whitespace();
        self.expect_char(b'>')?;

        match self.element_stack.pop() {
            Some(expected) if expected == name => Ok(XmlEvent::EndElement {
                name: Cow::Borrowed(name),
            }),
            Some(expected) => {
                Err(Error::mismatched_tag(expected, name.to_string())
                    .with_position(self.position()))
            }
            None => Err(Error::syntax(format!("unexpected closing tag: {}", name))
                .with_position(self.position())),
        }
    }

    /// Skips a processing instruction or XML declaration through `?>`.
    fn skip_processing_instruction(&mut self) -> Result<()> {
        debug_assert_eq!(self.input[self.pos], b'?');
        self.pos += 1;
        self.col += 1;

        while self.pos < self.input.len() {
            match memchr(b'?', &self.input[self.pos..]) {
                Some(offset) => {
                    let check = self.pos + offset;
                    if check + 1 < self.input.len() && self.input[check + 1] == b'>' {
                        self.update_position_for_range(self.pos, check);
                        self.pos = check + 2;
                        self.col += 2;
                        return Ok(());
                    }
                    self.update_position_for_range(self.pos, check + 1);
                    self.pos = check + 1;
                }
                None => break,
            }
        }

        Err(Error::syntax("unterminated processing instruction").with_position(self.position()))
    }

    /// Handles `<!` constructs: comments and DOCTYPE are skipped, CDATA
    /// becomes a text event.
    fn read_special(&mut self) -> Result<Option<XmlEvent<'a>>> {
        debug_assert_eq!(self.input[self.pos], b'!');
        self.pos += 1;
        self.col += 1;

        if self.input[self.pos..].starts_with(b"--") {
            self.skip_comment()?;
            return Ok(None);
        }

        if self.input[self.pos..].starts_with(b"[CDATA[") {
            return self.read_cdata().map(Some);
        }

        if self.input[self.pos..].starts_with(b"DOCTYPE") {
            self.skip_doctype()?;
            return Ok(None);
        }

        Err(Error::syntax("unknown construct after '<!'").with_position(self.position()))
    }

    /// Skips a comment through `-->`.
    fn skip_comment(&mut self) -> Result<()> {
        self.pos += 2;
        self.col += 2;

        while self.pos < self.input.len() {
            match memchr(b'-', &self.input[self.pos..]) {
                Some(offset) => {
                    let check = self.pos + offset;
                    if self.input[check..].starts_with(b"-->") {
                        self.update_position_for_range(self.pos, check);
                        self.pos = check + 3;
                        self.col += 3;
                        return Ok(());
                    }
                    self.update_position_for_range(self.pos, check + 1);
                    self.pos = check + 1;
                }
                None => break,
            }
        }

        Err(Error::syntax("unterminated comment").with_position(self.position()))
    }

    /// Reads a CDATA section as literal text.
    fn read_cdata(&mut self) -> Result<XmlEvent<'a>> {
        self.pos += 7; // [CDATA[
        self.col += 7;
        let start = self.pos;

        while self.pos < self.input.len() {
            match memchr(b']', &self.input[self.pos..]) {
                Some(offset) => {
                    let check = self.pos + offset;
                    if self.input[check..].starts_with(b"]]>") {
                        self.update_position_for_range(self.pos, check);
                        let data = std::str::from_utf8(&self.input[start..check])
                            .map_err(|_| Error::new(ErrorKind::InvalidUtf8))?;
                        self.pos = check + 3;
                        self.col += 3;
                        return Ok(XmlEvent::Text(Cow::Borrowed(data)));
                    }
                    self.update_position_for_range(self.pos, check + 1);
                    self.pos = check + 1;
                }
                None => break,
            }
        }

        Err(Error::syntax("unterminated CDATA section").with_position(self.position()))
    }

    /// Skips a DOCTYPE declaration, tracking bracket depth.
    fn skip_doctype(&mut self) -> Result<()> {
        let mut depth = 1;

        while self.pos < self.input.len() && depth > 0 {
            match memchr2(b'<', b'>', &self.input[self.pos..]) {
                Some(offset) => {
                    self.update_position_for_range(self.pos, self.pos + offset);
                    self.pos += offset;
                    match self.input[self.pos] {
                        b'<' => depth += 1,
                        _ => depth -= 1,
                    }
                    self.col += 1;
                    self.pos += 1;
                }
                None => {
                    self.update_position_for_range(self.pos, self.input.len());
                    self.pos = self.input.len();
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads an XML name using the lookup tables.
    fn read_name(&mut self) -> Result<&'a str> {
        let start = self.pos;

        if self.pos >= self.input.len() {
            return Err(Error::unexpected_eof().with_position(self.position()));
        }

        let first = self.input[self.pos];
        if !IS_NAME_START[first as usize] {
            return Err(
                Error::invalid_name(format!("invalid name start character: {:?}", first as char))
                    .with_position(self.position()),
            );
        }
        self.pos += 1;
        self.col += 1;

        while self.pos < self.input.len() && IS_NAME_CHAR[self.input[self.pos] as usize] {
            self.pos += 1;
            self.col += 1;
        }

        std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| Error::new(ErrorKind::InvalidUtf8))
    }

    /// Reads the attribute list of the current tag.
    fn read_attributes(&mut self) -> Result<Vec<Attribute<'a>>> {
        let mut attributes = Vec::with_capacity(4);

        loop {
            self.skip_whitespace();

            if self.pos >= self.input.len() {
                break;
            }

            let c = self.input[self.pos];
            if c == b'>' || c == b'/' {
                break;
            }

            let name = self.read_name()?;
            self.skip_whitespace();
            self.expect_char(b'=')?;
            self.skip_whitespace();
            let value = self.read_attribute_value()?;

            attributes.push(Attribute {
                name: Cow::Borrowed(name),
                value,
            });
        }

        Ok(attributes)
    }

    /// Reads a quoted attribute value, decoding entities.
    fn read_attribute_value(&mut self) -> Result<Cow<'a, str>> {
        if self.pos >= self.input.len() {
            return Err(Error::unexpected_eof().with_position(self.position()));
        }

        let quote = self.input[self.pos];
        if quote != b'"' && quote != b'\'' {
            return Err(Error::syntax("expected quote").with_position(self.position()));
        }
        self.pos += 1;
        self.col += 1;

        let start = self.pos;

        match memchr(quote, &self.input[self.pos..]) {
            Some(offset) => {
                let value = std::str::from_utf8(&self.input[start..self.pos + offset])
                    .map_err(|_| Error::new(ErrorKind::InvalidUtf8))?;
                self.update_position_for_range(self.pos, self.pos + offset + 1);
                self.pos += offset + 1;

                match unescape(value) {
                    Ok(unescaped) => Ok(unescaped),
                    Err(e) => Err(Error::invalid_escape(e.entity).with_position(self.position())),
                }
            }
            None => {
                Err(Error::syntax("unterminated attribute value").with_position(self.position()))
            }
        }
    }

    /// Expects a specific character at the current position.
    #[inline(always)]
    fn expect_char(&mut self, expected: u8) -> Result<()> {
        if self.pos >= self.input.len() {
            return Err(Error::unexpected_eof().with_position(self.position()));
        }

        if self.input[self.pos] != expected {
            return Err(Error::syntax(format!(
                "expected '{}', found '{}'",
                expected as char, self.input[self.pos] as char
            ))
            .with_position(self.position()));
        }

        self.pos += 1;
        self.col += 1;
        Ok(())
    }
}
