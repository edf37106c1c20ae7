//! Streaming XML writer.
//!
//! The writer mirrors the reader: each domain type emits its attributes
//! and children in the same fixed order its reader declares them, so
//! output is deterministic and feeds back through the reader unchanged.
//! Scalars go through the same coercion trait in the formatting
//! direction, which is what makes the round trip canonical.
//!
//! Absent optional fields emit nothing at all, never an empty element.

use crate::escape::escape_to;
use crate::scalar::Scalar;
use std::io::{self, Write};

#[inline]
fn is_xml_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// An XML writer that produces well-formed output over any `io::Write`.
pub struct XmlWriter<W: Write> {
    writer: W,
    /// Stack of open element names.
    element_stack: Vec<String>,
    /// Whether we're currently in an element tag (before the closing >).
    in_tag: bool,
    /// Indentation settings.
    indent: Option<IndentConfig>,
    /// Current indentation level.
    level: usize,
    /// Whether the last write was a start element (for formatting).
    last_was_start: bool,
}

/// Indentation configuration.
#[derive(Clone)]
pub struct IndentConfig {
    /// Characters to use for each level of indentation.
    pub indent_str: String,
    /// Whether to add a newline before each element.
    pub newlines: bool,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_str: "  ".to_string(),
            newlines: true,
        }
    }
}

impl<W: Write> XmlWriter<W> {
    /// Creates a new XML writer producing compact output.
    #[inline]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            element_stack: Vec::new(),
            in_tag: false,
            indent: None,
            level: 0,
            last_was_start: false,
        }
    }

    /// Creates a new XML writer with indentation.
    #[inline]
    pub fn with_indent(writer: W, indent: IndentConfig) -> Self {
        Self {
            writer,
            element_stack: Vec::new(),
            in_tag: false,
            indent: Some(indent),
            level: 0,
            last_was_start: false,
        }
    }

    /// Returns the inner writer.
    #[inline]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Returns the current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.element_stack.len()
    }

    /// Writes the XML declaration.
    pub fn write_declaration(&mut self, version: &str, encoding: Option<&str>) -> io::Result<()> {
        self.close_tag_if_open()?;
        write!(self.writer, "<?xml version=\"{}\"", version)?;
        if let Some(enc) = encoding {
            write!(self.writer, " encoding=\"{}\"", enc)?;
        }
        self.writer.write_all(b"?>")
    }

    /// Starts an element.
    pub fn start_element(&mut self, name: &str) -> io::Result<()> {
        self.close_tag_if_open()?;
        self.write_indent()?;
        write!(self.writer, "<{}", name)?;
        self.element_stack.push(name.to_string());
        self.in_tag = true;
        self.last_was_start = true;
        self.level += 1;
        Ok(())
    }

    /// Writes an attribute for the current element.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> io::Result<()> {
        if !self.in_tag {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot write attribute outside of element tag",
            ));
        }
        write!(self.writer, " {}=\"", name)?;
        self.write_escaped(value)?;
        self.writer.write_all(b"\"")
    }

    /// Writes an attribute with a scalar value.
    pub fn scalar_attr<T: Scalar>(&mut self, name: &str, value: &T) -> io::Result<()> {
        self.write_attribute(name, &value.format_text())
    }

    /// Ends the current element. Elements with no content close as
    /// `<tag/>`.
    pub fn end_element(&mut self) -> io::Result<()> {
        self.level = self.level.saturating_sub(1);

        if let Some(name) = self.element_stack.pop() {
            if self.in_tag {
                // Self-closing tag
                self.writer.write_all(b"/>")?;
                self.in_tag = false;
            } else {
                if !self.last_was_start {
                    self.write_indent()?;
                }
                write!(self.writer, "</{}>", name)?;
            }
            self.last_was_start = false;
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no element to close",
            ))
        }
    }

    /// Writes text content. A leading or trailing whitespace character
    /// is written as a character reference so the reader, which strips
    /// whitespace at text-node boundaries, hands it back intact.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.close_tag_if_open()?;

        let mut body = text;
        if let Some(&first) = body.as_bytes().first() {
            if is_xml_whitespace(first) {
                write!(self.writer, "&#{};", first)?;
                body = &body[1..];
            }
        }
        let mut tail = None;
        if let Some(&last) = body.as_bytes().last() {
            if is_xml_whitespace(last) {
                tail = Some(last);
                body = &body[..body.len() - 1];
            }
        }

        self.write_escaped(body)?;
        if let Some(last) = tail {
            write!(self.writer, "&#{};", last)?;
        }
        self.last_was_start = false;
        Ok(())
    }

    /// Writes a complete element with text content.
    pub fn write_element(&mut self, name: &str, content: &str) -> io::Result<()> {
        self.start_element(name)?;
        self.write_text(content)?;
        self.end_element()
    }

    /// Writes a complete leaf element with a scalar value.
    pub fn leaf<T: Scalar>(&mut self, tag: &str, value: &T) -> io::Result<()> {
        self.write_element(tag, &value.format_text())
    }

    /// Writes a leaf element if the value is present; absent values
    /// produce no output.
    pub fn opt_leaf<T: Scalar>(&mut self, tag: &str, value: &Option<T>) -> io::Result<()> {
        if let Some(v) = value {
            self.leaf(tag, v)?;
        }
        Ok(())
    }

    /// Closes the opening tag if one is open.
    fn close_tag_if_open(&mut self) -> io::Result<()> {
        if self.in_tag {
            self.writer.write_all(b">")?;
            self.in_tag = false;
        }
        Ok(())
    }

    /// Writes indentation if configured.
    fn write_indent(&mut self) -> io::Result<()> {
        if let Some(ref indent) = self.indent {
            if indent.newlines && self.level > 0 {
                self.writer.write_all(b"\n")?;
            }
            for _ in 0..self.level.saturating_sub(1) {
                self.writer.write_all(indent.indent_str.as_bytes())?;
            }
        }
        Ok(())
    }

    /// Writes escaped text.
    fn write_escaped(&mut self, s: &str) -> io::Result<()> {
        let mut escaped = String::with_capacity(s.len());
        escape_to(s, &mut escaped);
        self.writer.write_all(escaped.as_bytes())
    }

    /// Flushes the writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut XmlWriter<Vec<u8>>) -> io::Result<()>,
    {
        let mut writer = XmlWriter::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_element_self_closes() {
        let result = write_to_string(|w| {
            w.start_element("trkseg")?;
            w.end_element()
        });
        assert_eq!(result, "<trkseg/>");
    }

    #[test]
    fn test_element_with_text() {
        let result = write_to_string(|w| {
            w.start_element("name")?;
            w.write_text("Gorgas")?;
            w.end_element()
        });
        assert_eq!(result, "<name>Gorgas</name>");
    }

    #[test]
    fn test_element_with_attributes() {
        let result = write_to_string(|w| {
            w.start_element("wpt")?;
            w.write_attribute("lat", "48.2081743")?;
            w.write_attribute("lon", "16.3738189")?;
            w.end_element()
        });
        assert_eq!(result, r#"<wpt lat="48.2081743" lon="16.3738189"/>"#);
    }

    #[test]
    fn test_nested_elements() {
        let result = write_to_string(|w| {
            w.start_element("trk")?;
            w.start_element("name")?;
            w.write_text("Morning ride")?;
            w.end_element()?;
            w.end_element()
        });
        assert_eq!(result, "<trk><name>Morning ride</name></trk>");
    }

    #[test]
    fn test_boundary_whitespace_as_character_reference() {
        let result = write_to_string(|w| {
            w.start_element("name")?;
            w.write_text("  padded  ")?;
            w.end_element()
        });
        assert_eq!(result, "<name>&#32; padded &#32;</name>");
    }

    #[test]
    fn test_whitespace_only_text() {
        let result = write_to_string(|w| {
            w.start_element("name")?;
            w.write_text(" ")?;
            w.end_element()
        });
        assert_eq!(result, "<name>&#32;</name>");

        let result = write_to_string(|w| {
            w.start_element("name")?;
            w.write_text("\t\n")?;
            w.end_element()
        });
        assert_eq!(result, "<name>&#9;&#10;</name>");
    }

    #[test]
    fn test_escaped_content() {
        let result = write_to_string(|w| {
            w.start_element("desc")?;
            w.write_text("<>&\"\'")?;
            w.end_element()
        });
        assert_eq!(result, "<desc>&lt;&gt;&amp;&quot;&apos;</desc>");
    }

    #[test]
    fn test_escaped_attribute() {
        let result = write_to_string(|w| {
            w.start_element("gpx")?;
            w.write_attribute("creator", "Tom & Jerry \"v2\"")?;
            w.end_element()
        });
        assert_eq!(
            result,
            r#"<gpx creator="Tom &amp; Jerry &quot;v2&quot;"/>"#
        );
    }

    #[test]
    fn test_xml_declaration() {
        let result = write_to_string(|w| {
            w.write_declaration("1.0", Some("UTF-8"))?;
            w.start_element("gpx")?;
            w.end_element()
        });
        assert_eq!(result, r#"<?xml version="1.0" encoding="UTF-8"?><gpx/>"#);
    }

    #[test]
    fn test_scalar_leaf_formatting() {
        let result = write_to_string(|w| {
            w.start_element("wpt")?;
            w.leaf("ele", &160.0_f64)?;
            w.leaf("sat", &7_u32)?;
            w.end_element()
        });
        assert_eq!(result, "<wpt><ele>160.0</ele><sat>7</sat></wpt>");
    }

    #[test]
    fn test_opt_leaf_absent_writes_nothing() {
        let result = write_to_string(|w| {
            w.start_element("wpt")?;
            w.opt_leaf("ele", &None::<f64>)?;
            w.opt_leaf("sym", &Some("Flag".to_string()))?;
            w.end_element()
        });
        assert_eq!(result, "<wpt><sym>Flag</sym></wpt>");
    }

    #[test]
    fn test_scalar_attribute() {
        let result = write_to_string(|w| {
            w.start_element("bounds")?;
            w.scalar_attr("minlat", &46.0_f64)?;
            w.scalar_attr("maxlat", &48.5_f64)?;
            w.end_element()
        });
        assert_eq!(result, r#"<bounds minlat="46.0" maxlat="48.5"/>"#);
    }

    #[test]
    fn test_depth() {
        let mut writer = XmlWriter::new(Vec::new());
        assert_eq!(writer.depth(), 0);

        writer.start_element("trk").unwrap();
        assert_eq!(writer.depth(), 1);

        writer.start_element("trkseg").unwrap();
        assert_eq!(writer.depth(), 2);

        writer.end_element().unwrap();
        assert_eq!(writer.depth(), 1);

        writer.end_element().unwrap();
        assert_eq!(writer.depth(), 0);
    }

    #[test]
    fn test_indented_output() {
        let mut writer = XmlWriter::with_indent(Vec::new(), IndentConfig::default());
        writer.start_element("trk").unwrap();
        writer.start_element("name").unwrap();
        writer.write_text("text").unwrap();
        writer.end_element().unwrap();
        writer.end_element().unwrap();

        let result = String::from_utf8(writer.into_inner()).unwrap();
        assert!(result.contains('\n'));
    }
}
