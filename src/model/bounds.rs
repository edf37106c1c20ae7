//! The `<bounds>` element: the lat/lon extent covered by the file.

use crate::error::{Error, Result};
use crate::read::{attr, elem, ElementReader};
use crate::types::{Latitude, Longitude};
use crate::write::XmlWriter;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// A geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// The southern edge.
    pub min_latitude: Latitude,
    /// The western edge.
    pub min_longitude: Longitude,
    /// The northern edge.
    pub max_latitude: Latitude,
    /// The eastern edge.
    pub max_longitude: Longitude,
}

impl Bounds {
    /// Creates a bounding box, failing when a minimum exceeds its
    /// maximum.
    pub fn new(
        min_latitude: Latitude,
        min_longitude: Longitude,
        max_latitude: Latitude,
        max_longitude: Longitude,
    ) -> Result<Self> {
        if min_latitude > max_latitude || min_longitude > max_longitude {
            return Err(Error::domain("bounds minimum exceeds maximum"));
        }
        Ok(Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        })
    }

    pub(crate) fn reader() -> impl ElementReader<Value = Bounds> {
        elem(
            "bounds",
            (
                attr::<Latitude>("minlat"),
                attr::<Longitude>("minlon"),
                attr::<Latitude>("maxlat"),
                attr::<Longitude>("maxlon"),
            ),
            (),
            |(minlat, minlon, maxlat, maxlon), ()| Bounds::new(minlat, minlon, maxlat, maxlon),
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element("bounds")?;
        xml.scalar_attr("minlat", &self.min_latitude)?;
        xml.scalar_attr("minlon", &self.min_longitude)?;
        xml.scalar_attr("maxlat", &self.max_latitude)?;
        xml.scalar_attr("maxlon", &self.max_longitude)?;
        xml.end_element()
    }
}
