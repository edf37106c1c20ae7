//! The `<gpx>` document root and the whole-document entry points.

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Result};
use crate::model::{Metadata, Route, Track, WayPoint};
use crate::read::{attr, elem, list, opt, ElementReader};
use crate::write::{IndentConfig, XmlWriter};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// The GPX 1.1 namespace.
pub const NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// The GPX version this crate reads and writes.
pub const VERSION: &str = "1.1";

/// A complete GPX document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpx {
    /// The program that created the file.
    pub creator: String,
    /// Information about the file itself.
    pub metadata: Option<Metadata>,
    /// Standalone waypoints.
    pub waypoints: Vec<WayPoint>,
    /// Routes.
    pub routes: Vec<Route>,
    /// Recorded tracks.
    pub tracks: Vec<Track>,
}

impl Gpx {
    /// Creates an empty document attributed to `creator`.
    pub fn new(creator: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
            metadata: None,
            waypoints: Vec::new(),
            routes: Vec::new(),
            tracks: Vec::new(),
        }
    }

    fn reader() -> impl ElementReader<Value = Gpx> {
        elem(
            "gpx",
            (attr::<String>("version"), attr::<String>("creator")),
            (
                opt(Metadata::reader()),
                list(WayPoint::reader("wpt")),
                list(Route::reader()),
                list(Track::reader()),
            ),
            |(version, creator), (metadata, waypoints, routes, tracks)| {
                if version != VERSION {
                    return Err(Error::schema(format!(
                        "unsupported GPX version '{}', expected '{}'",
                        version, VERSION
                    )));
                }
                Ok(Gpx {
                    creator,
                    metadata,
                    waypoints,
                    routes,
                    tracks,
                })
            },
        )
    }

    /// Parses a document from a string. Content after the closing
    /// `</gpx>` is an error.
    pub fn from_xml(text: &str) -> Result<Gpx> {
        let mut cur = Cursor::new(text);
        let gpx = Self::reader().read(&mut cur)?;
        cur.expect_eof()?;
        Ok(gpx)
    }

    /// Reads a document from any `io::Read` source.
    pub fn read(mut reader: impl Read) -> Result<Gpx> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_xml(&text)
    }

    /// Writes the document in compact canonical form.
    pub fn write<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut xml = XmlWriter::new(writer);
        self.write_document(&mut xml)
    }

    /// Writes the document with two-space indentation.
    pub fn write_pretty<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut xml = XmlWriter::with_indent(writer, IndentConfig::default());
        self.write_document(&mut xml)
    }

    /// Serializes the document to a compact canonical string.
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        String::from_utf8(buf).map_err(|_| Error::new(ErrorKind::InvalidUtf8))
    }

    fn write_document<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.write_declaration("1.0", Some("UTF-8"))?;
        xml.start_element("gpx")?;
        xml.write_attribute("version", VERSION)?;
        xml.write_attribute("creator", &self.creator)?;
        xml.write_attribute("xmlns", NAMESPACE)?;
        if let Some(metadata) = &self.metadata {
            metadata.write_xml(xml)?;
        }
        for wpt in &self.waypoints {
            wpt.write_xml("wpt", xml)?;
        }
        for rte in &self.routes {
            rte.write_xml(xml)?;
        }
        for trk in &self.tracks {
            trk.write_xml(xml)?;
        }
        xml.end_element()?;
        xml.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Latitude, Longitude};

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpx-wire" xmlns="http://www.topografix.com/GPX/1/1">
  <wpt lat="48.2081743" lon="16.3738189">
    <ele>160</ele>
  </wpt>
</gpx>"#;

    #[test]
    fn test_parse_minimal_document() {
        let gpx = Gpx::from_xml(MINIMAL).unwrap();
        assert_eq!(gpx.creator, "gpx-wire");
        assert_eq!(gpx.waypoints.len(), 1);
        let wpt = &gpx.waypoints[0];
        assert_eq!(wpt.latitude.degrees(), 48.2081743);
        assert_eq!(wpt.longitude.degrees(), 16.3738189);
        assert_eq!(wpt.elevation.unwrap().meters(), 160.0);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let err = Gpx::from_xml(r#"<gpx version="1.0" creator="x"/>"#).unwrap_err();
        match err.kind() {
            ErrorKind::SchemaViolation(msg) => assert!(msg.contains("1.0")),
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_creator_rejected() {
        let err = Gpx::from_xml(r#"<gpx version="1.1"/>"#).unwrap_err();
        match err.kind() {
            ErrorKind::MissingAttribute(name) => assert_eq!(name, "creator"),
            other => panic!("expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err =
            Gpx::from_xml(r#"<gpx version="1.1" creator="x"/><gpx version="1.1" creator="y"/>"#)
                .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TrailingContent));
    }

    #[test]
    fn test_document_roundtrip() {
        let gpx = Gpx::from_xml(MINIMAL).unwrap();
        let out = gpx.to_xml().unwrap();
        let reparsed = Gpx::from_xml(&out).unwrap();
        assert_eq!(reparsed, gpx);
    }

    #[test]
    fn test_output_is_deterministic() {
        let gpx = Gpx::from_xml(MINIMAL).unwrap();
        assert_eq!(gpx.to_xml().unwrap(), gpx.to_xml().unwrap());
    }

    #[test]
    fn test_canonical_output_shape() {
        let mut gpx = Gpx::new("unit-test");
        gpx.waypoints.push(crate::model::WayPoint::new(
            Latitude::new(48.5).unwrap(),
            Longitude::new(16.25).unwrap(),
        ));
        let out = gpx.to_xml().unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <gpx version=\"1.1\" creator=\"unit-test\" \
             xmlns=\"http://www.topografix.com/GPX/1/1\">\
             <wpt lat=\"48.5\" lon=\"16.25\"/></gpx>"
        );
    }

    #[test]
    fn test_read_from_io() {
        let gpx = Gpx::read(MINIMAL.as_bytes()).unwrap();
        assert_eq!(gpx.waypoints.len(), 1);
    }

    #[test]
    fn test_pretty_output_reparses() {
        let gpx = Gpx::from_xml(MINIMAL).unwrap();
        let mut buf = Vec::new();
        gpx.write_pretty(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(Gpx::from_xml(&text).unwrap(), gpx);
    }

    #[test]
    fn test_full_document_with_all_sections() {
        let xml = r#"<gpx version="1.1" creator="eTrex 30">
            <metadata><name>export</name></metadata>
            <wpt lat="48.20" lon="16.37"/>
            <rte><rtept lat="48.20" lon="16.37"/></rte>
            <trk><trkseg><trkpt lat="48.20" lon="16.37"/></trkseg></trk>
        </gpx>"#;
        let gpx = Gpx::from_xml(xml).unwrap();
        assert!(gpx.metadata.is_some());
        assert_eq!(gpx.waypoints.len(), 1);
        assert_eq!(gpx.routes.len(), 1);
        assert_eq!(gpx.tracks.len(), 1);
    }
}
