//! The `<rte>` element: an ordered list of waypoints leading to a
//! destination.

use crate::model::{Link, WayPoint};
use crate::read::{elem, leaf, list, opt, ElementReader};
use crate::write::XmlWriter;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// A route: turn points leading to a destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    /// The GPS name of the route.
    pub name: Option<String>,
    /// A GPS comment.
    pub comment: Option<String>,
    /// A text description for the user.
    pub description: Option<String>,
    /// The source of the data.
    pub source: Option<String>,
    /// Links to external information.
    pub links: Vec<Link>,
    /// The GPS route number.
    pub number: Option<u32>,
    /// A classification of the route.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The route points, in travel order.
    pub points: Vec<WayPoint>,
}

impl Route {
    pub(crate) fn reader() -> impl ElementReader<Value = Route> {
        elem(
            "rte",
            (),
            (
                opt(leaf::<String>("name")),
                opt(leaf::<String>("cmt")),
                opt(leaf::<String>("desc")),
                opt(leaf::<String>("src")),
                list(Link::reader()),
                opt(leaf::<u32>("number")),
                opt(leaf::<String>("type")),
                list(WayPoint::reader("rtept")),
            ),
            |(), (name, comment, description, source, links, number, kind, points)| {
                Ok(Route {
                    name,
                    comment,
                    description,
                    source,
                    links,
                    number,
                    kind,
                    points,
                })
            },
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("rte")?;
        xml.opt_leaf("name", &self.name)?;
        xml.opt_leaf("cmt", &self.comment)?;
        xml.opt_leaf("desc", &self.description)?;
        xml.opt_leaf("src", &self.source)?;
        for link in &self.links {
            link.write_xml(xml)?;
        }
        xml.opt_leaf("number", &self.number)?;
        xml.opt_leaf("type", &self.kind)?;
        for point in &self.points {
            point.write_xml("rtept", xml)?;
        }
        xml.end_element()
    }
}
