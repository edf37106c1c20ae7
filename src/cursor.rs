//! Forward-only cursor over the XML token stream.
//!
//! [`Cursor`] layers one-token lookahead and subtree bookkeeping on top
//! of the tokenizer. It is the only view the element readers get of the
//! input: they can inspect the current token, consume it, or skip a
//! whole subtree, but never rewind. Empty elements (`<tag/>`) are
//! normalized into a start token followed by a synthetic end token so
//! element readers only ever deal with one shape.

use crate::error::{Error, Position, Result};
use crate::reader::{Attribute, XmlEvent, XmlReader};
use std::borrow::Cow;

/// A token as seen by element readers.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Start of an element, carrying its attributes.
    Start {
        /// Element name.
        name: Cow<'a, str>,
        /// Attributes of the start tag.
        attrs: Vec<Attribute<'a>>,
    },
    /// End of an element.
    End {
        /// Element name.
        name: Cow<'a, str>,
    },
    /// Text content.
    Text(Cow<'a, str>),
    /// End of document.
    Eof,
}

/// Forward-only, peekable view over the token stream.
pub struct Cursor<'a> {
    reader: XmlReader<'a>,
    peeked: Option<Token<'a>>,
    /// End token still owed for a normalized `<tag/>`.
    synthetic_end: Option<Cow<'a, str>>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            reader: XmlReader::from_str(input),
            peeked: None,
            synthetic_end: None,
        }
    }

    /// Returns the position of the current token.
    pub fn position(&self) -> Position {
        self.reader.position()
    }

    /// Returns the current token without consuming it.
    pub fn peek(&mut self) -> Result<&Token<'a>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token()?);
        }
        Ok(self.peeked.as_ref().unwrap())
    }

    /// Consumes and returns the current token.
    pub fn advance(&mut self) -> Result<Token<'a>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.next_token(),
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>> {
        if let Some(name) = self.synthetic_end.take() {
            return Ok(Token::End { name });
        }

        match self.reader.next_event()? {
            XmlEvent::StartElement { name, attributes } => Ok(Token::Start { name, attrs: attributes }),
            XmlEvent::EmptyElement { name, attributes } => {
                self.synthetic_end = Some(name.clone());
                Ok(Token::Start { name, attrs: attributes })
            }
            XmlEvent::EndElement { name } => Ok(Token::End { name }),
            XmlEvent::Text(text) => Ok(Token::Text(text)),
            XmlEvent::Eof => Ok(Token::Eof),
        }
    }

    /// Whether the current token starts an element with the given name.
    pub fn at_start(&mut self, tag: &str) -> Result<bool> {
        Ok(matches!(self.peek()?, Token::Start { name, .. } if name == tag))
    }

    /// Consumes a start tag with the given name and returns its
    /// attributes; fails with a schema violation otherwise.
    pub fn expect_start(&mut self, tag: &str) -> Result<Vec<Attribute<'a>>> {
        let pos = self.position();
        match self.advance()? {
            Token::Start { name, attrs } if name == tag => Ok(attrs),
            Token::Start { name, .. } => {
                Err(Error::schema(format!("expected <{}>, found <{}>", tag, name)).with_position(pos))
            }
            Token::End { name } => {
                Err(Error::schema(format!("expected <{}>, found </{}>", tag, name)).with_position(pos))
            }
            Token::Text(_) => {
                Err(Error::schema(format!("expected <{}>, found text content", tag)).with_position(pos))
            }
            Token::Eof => Err(Error::unexpected_eof().with_position(pos)),
        }
    }

    /// Consumes the end tag with the given name; fails with a schema
    /// violation otherwise.
    pub fn expect_end(&mut self, tag: &str) -> Result<()> {
        let pos = self.position();
        match self.advance()? {
            Token::End { name } if name == tag => Ok(()),
            Token::End { name } => {
                Err(Error::schema(format!("expected </{}>, found </{}>", tag, name)).with_position(pos))
            }
            Token::Start { name, .. } => {
                Err(Error::schema(format!("expected </{}>, found <{}>", tag, name)).with_position(pos))
            }
            Token::Text(_) => {
                Err(Error::schema(format!("expected </{}>, found text content", tag)).with_position(pos))
            }
            Token::Eof => Err(Error::unexpected_eof().with_position(pos)),
        }
    }

    /// Concatenates consecutive text tokens at the cursor.
    pub fn take_text(&mut self) -> Result<String> {
        let mut content = String::new();
        while matches!(self.peek()?, Token::Text(_)) {
            if let Token::Text(text) = self.advance()? {
                content.push_str(&text);
            }
        }
        Ok(content)
    }

    /// Skips the element starting at the cursor, including all of its
    /// children. The cursor must be at a start tag.
    pub fn skip_subtree(&mut self) -> Result<()> {
        let pos = self.position();
        match self.advance()? {
            Token::Start { .. } => {}
            _ => return Err(Error::schema("cannot skip: not at a start tag").with_position(pos)),
        }

        let mut depth = 1usize;
        while depth > 0 {
            match self.advance()? {
                Token::Start { .. } => depth += 1,
                Token::End { .. } => depth -= 1,
                Token::Text(_) => {}
                Token::Eof => return Err(Error::unexpected_eof()),
            }
        }
        Ok(())
    }

    /// Requires the token stream to be exhausted.
    pub fn expect_eof(&mut self) -> Result<()> {
        let pos = self.position();
        match self.peek()? {
            Token::Eof => Ok(()),
            _ => Err(Error::trailing_content().with_position(pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cur = Cursor::new("<gpx></gpx>");
        assert!(cur.at_start("gpx").unwrap());
        assert!(cur.at_start("gpx").unwrap());
        cur.expect_start("gpx").unwrap();
        cur.expect_end("gpx").unwrap();
        cur.expect_eof().unwrap();
    }

    #[test]
    fn test_empty_element_normalized() {
        let mut cur = Cursor::new("<trkseg/>");
        cur.expect_start("trkseg").unwrap();
        cur.expect_end("trkseg").unwrap();
        cur.expect_eof().unwrap();
    }

    #[test]
    fn test_expect_start_wrong_tag() {
        let mut cur = Cursor::new("<rte/>");
        let err = cur.expect_start("trk").unwrap_err();
        assert!(err.to_string().contains("expected <trk>"));
    }

    #[test]
    fn test_take_text() {
        let mut cur = Cursor::new("<name>Vienna</name>");
        cur.expect_start("name").unwrap();
        assert_eq!(cur.take_text().unwrap(), "Vienna");
        cur.expect_end("name").unwrap();
    }

    #[test]
    fn test_take_text_concatenates_cdata() {
        let mut cur = Cursor::new("<desc><![CDATA[steep ]]><![CDATA[& rocky]]></desc>");
        cur.expect_start("desc").unwrap();
        assert_eq!(cur.take_text().unwrap(), "steep & rocky");
        cur.expect_end("desc").unwrap();
    }

    #[test]
    fn test_skip_subtree() {
        let mut cur = Cursor::new("<a><b><c>text</c></b><d/></a>");
        cur.expect_start("a").unwrap();
        cur.skip_subtree().unwrap(); // <b>...</b>
        assert!(cur.at_start("d").unwrap());
        cur.skip_subtree().unwrap(); // <d/>
        cur.expect_end("a").unwrap();
        cur.expect_eof().unwrap();
    }

    #[test]
    fn test_skip_empty_subtree() {
        let mut cur = Cursor::new("<a/><b/>");
        cur.skip_subtree().unwrap();
        assert!(cur.at_start("b").unwrap());
    }

    #[test]
    fn test_trailing_content() {
        let mut cur = Cursor::new("<a/><b/>");
        cur.expect_start("a").unwrap();
        cur.expect_end("a").unwrap();
        let err = cur.expect_eof().unwrap_err();
        assert!(err.to_string().contains("trailing content"));
    }

    #[test]
    fn test_attributes_surface_on_start() {
        let mut cur = Cursor::new(r#"<wpt lat="1.5" lon="2.5"/>"#);
        let attrs = cur.expect_start("wpt").unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "lat");
    }
}
