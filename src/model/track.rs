//! The `<trk>` element: a recorded trace, held as an ordered list of
//! segments which in turn hold track points.

use crate::model::{Link, WayPoint};
use crate::read::{elem, leaf, list, opt, ElementReader};
use crate::write::XmlWriter;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One continuous span of a track. A new segment starts where the
/// recording was interrupted, e.g. after losing GPS reception.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackSegment {
    /// The track points, in recording order.
    pub points: Vec<WayPoint>,
}

impl TrackSegment {
    fn reader() -> impl ElementReader<Value = TrackSegment> {
        elem(
            "trkseg",
            (),
            (list(WayPoint::reader("trkpt")),),
            |(), (points,)| Ok(TrackSegment { points }),
        )
    }

    fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("trkseg")?;
        for point in &self.points {
            point.write_xml("trkpt", xml)?;
        }
        xml.end_element()
    }
}

/// A recorded track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    /// The GPS name of the track.
    pub name: Option<String>,
    /// A GPS comment.
    pub comment: Option<String>,
    /// A text description for the user.
    pub description: Option<String>,
    /// The source of the data.
    pub source: Option<String>,
    /// Links to external information.
    pub links: Vec<Link>,
    /// The GPS track number.
    pub number: Option<u32>,
    /// A classification of the track.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The segments, in recording order. Empty segments are kept; they
    /// still mark a recording interruption.
    pub segments: Vec<TrackSegment>,
}

impl Track {
    pub(crate) fn reader() -> impl ElementReader<Value = Track> {
        elem(
            "trk",
            (),
            (
                opt(leaf::<String>("name")),
                opt(leaf::<String>("cmt")),
                opt(leaf::<String>("desc")),
                opt(leaf::<String>("src")),
                list(Link::reader()),
                opt(leaf::<u32>("number")),
                opt(leaf::<String>("type")),
                list(TrackSegment::reader()),
            ),
            |(), (name, comment, description, source, links, number, kind, segments)| {
                Ok(Track {
                    name,
                    comment,
                    description,
                    source,
                    links,
                    number,
                    kind,
                    segments,
                })
            },
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("trk")?;
        xml.opt_leaf("name", &self.name)?;
        xml.opt_leaf("cmt", &self.comment)?;
        xml.opt_leaf("desc", &self.description)?;
        xml.opt_leaf("src", &self.source)?;
        for link in &self.links {
            link.write_xml(xml)?;
        }
        xml.opt_leaf("number", &self.number)?;
        xml.opt_leaf("type", &self.kind)?;
        for segment in &self.segments {
            segment.write_xml(xml)?;
        }
        xml.end_element()
    }
}
