//! The `<link>` element: a reference to external information about a
//! point, route, track or the file author.

use crate::read::{attr, elem, leaf, opt, ElementReader};
use crate::write::XmlWriter;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// A link to an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The URL of the linked resource.
    pub href: String,
    /// Human-readable text of the hyperlink.
    pub text: Option<String>,
    /// Mime type of the linked content, e.g. `image/jpeg`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Link {
    /// Creates a link with only an URL.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: None,
            kind: None,
        }
    }

    pub(crate) fn reader() -> impl ElementReader<Value = Link> {
        elem(
            "link",
            (attr::<String>("href"),),
            (opt(leaf::<String>("text")), opt(leaf::<String>("type"))),
            |(href,), (text, kind)| Ok(Link { href, text, kind }),
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("link")?;
        xml.write_attribute("href", &self.href)?;
        xml.opt_leaf("text", &self.text)?;
        xml.opt_leaf("type", &self.kind)?;
        xml.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;

    #[test]
    fn test_read_full_link() {
        let mut cur = Cursor::new(
            r#"<link href="http://example.com/trail"><text>Trail map</text><type>text/html</type></link>"#,
        );
        let link = Link::reader().read(&mut cur).unwrap();
        assert_eq!(link.href, "http://example.com/trail");
        assert_eq!(link.text.as_deref(), Some("Trail map"));
        assert_eq!(link.kind.as_deref(), Some("text/html"));
    }

    #[test]
    fn test_read_bare_link() {
        let mut cur = Cursor::new(r#"<link href="http://example.com"/>"#);
        let link = Link::reader().read(&mut cur).unwrap();
        assert_eq!(link, Link::new("http://example.com"));
    }

    #[test]
    fn test_write_roundtrip() {
        let link = Link {
            href: "http://example.com".to_string(),
            text: Some("Example".to_string()),
            kind: None,
        };
        let mut xml = XmlWriter::new(Vec::new());
        link.write_xml(&mut xml).unwrap();
        let out = String::from_utf8(xml.into_inner()).unwrap();
        assert_eq!(
            out,
            r#"<link href="http://example.com"><text>Example</text></link>"#
        );

        let mut cur = Cursor::new(&out);
        assert_eq!(Link::reader().read(&mut cur).unwrap(), link);
    }
}
