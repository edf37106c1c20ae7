//! Waypoints: a single recorded position. The same shape backs
//! standalone `<wpt>` elements, route points (`<rtept>`) and track
//! points (`<trkpt>`), so the reader and writer take the tag as a
//! parameter.

use crate::error::Result;
use crate::model::Link;
use crate::read::{attr, elem, leaf, list, opt, ElementReader};
use crate::types::{Degrees, DgpsStation, Fix, Latitude, Length, Longitude, Speed};
use crate::write::XmlWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// A single geographic point with optional GPS telemetry.
///
/// Only the position is mandatory; every other field is optional and
/// round-trips independently of the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WayPoint {
    /// Latitude of the point.
    pub latitude: Latitude,
    /// Longitude of the point.
    pub longitude: Longitude,
    /// Elevation above mean sea level.
    pub elevation: Option<Length>,
    /// Instantaneous speed at the point (a GPX 1.0 carry-over many
    /// devices still emit).
    pub speed: Option<Speed>,
    /// Creation time of the point, normalized to UTC.
    pub time: Option<DateTime<Utc>>,
    /// Magnetic variation at the point.
    pub magnetic_variation: Option<Degrees>,
    /// Height of the geoid above the WGS84 ellipsoid.
    pub geoid_height: Option<Length>,
    /// The GPS name of the point.
    pub name: Option<String>,
    /// A GPS comment.
    pub comment: Option<String>,
    /// A text description for the user.
    pub description: Option<String>,
    /// The source of the data, e.g. the device name.
    pub source: Option<String>,
    /// Links to additional information.
    pub links: Vec<Link>,
    /// The display symbol name.
    pub symbol: Option<String>,
    /// A classification of the point.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The kind of GPS fix.
    pub fix: Option<Fix>,
    /// Number of satellites used for the fix.
    pub sat: Option<u32>,
    /// Horizontal dilution of precision.
    pub hdop: Option<f64>,
    /// Vertical dilution of precision.
    pub vdop: Option<f64>,
    /// Position dilution of precision.
    pub pdop: Option<f64>,
    /// Seconds since the last DGPS update.
    pub age_of_dgps_data: Option<f64>,
    /// Id of the DGPS station used.
    pub dgps_id: Option<DgpsStation>,
}

impl WayPoint {
    /// Creates a waypoint at a position with every other field unset.
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
            speed: None,
            time: None,
            magnetic_variation: None,
            geoid_height: None,
            name: None,
            comment: None,
            description: None,
            source: None,
            links: Vec::new(),
            symbol: None,
            kind: None,
            fix: None,
            sat: None,
            hdop: None,
            vdop: None,
            pdop: None,
            age_of_dgps_data: None,
            dgps_id: None,
        }
    }

    /// Creates a waypoint from raw coordinates, failing on values
    /// outside the valid lat/lon ranges.
    pub fn of(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self::new(Latitude::new(latitude)?, Longitude::new(longitude)?))
    }

    pub(crate) fn reader(tag: &'static str) -> impl ElementReader<Value = WayPoint> {
        elem(
            tag,
            (attr::<Latitude>("lat"), attr::<Longitude>("lon")),
            (
                opt(leaf::<Length>("ele")),
                opt(leaf::<Speed>("speed")),
                opt(leaf::<DateTime<Utc>>("time")),
                opt(leaf::<Degrees>("magvar")),
                opt(leaf::<Length>("geoidheight")),
                opt(leaf::<String>("name")),
                opt(leaf::<String>("cmt")),
                opt(leaf::<String>("desc")),
                opt(leaf::<String>("src")),
                list(Link::reader()),
                opt(leaf::<String>("sym")),
                opt(leaf::<String>("type")),
                opt(leaf::<Fix>("fix")),
                opt(leaf::<u32>("sat")),
                opt(leaf::<f64>("hdop")),
                opt(leaf::<f64>("vdop")),
                opt(leaf::<f64>("pdop")),
                opt(leaf::<f64>("ageofdgpsdata")),
                opt(leaf::<DgpsStation>("dgpsid")),
            ),
            |(latitude, longitude),
             (
                elevation,
                speed,
                time,
                magnetic_variation,
                geoid_height,
                name,
                comment,
                description,
                source,
                links,
                symbol,
                kind,
                fix,
                sat,
                hdop,
                vdop,
                pdop,
                age_of_dgps_data,
                dgps_id,
            )| {
                Ok(WayPoint {
                    latitude,
                    longitude,
                    elevation,
                    speed,
                    time,
                    magnetic_variation,
                    geoid_height,
                    name,
                    comment,
                    description,
                    source,
                    links,
                    symbol,
                    kind,
                    fix,
                    sat,
                    hdop,
                    vdop,
                    pdop,
                    age_of_dgps_data,
                    dgps_id,
                })
            },
        )
    }

    pub(crate) fn write_xml<W: Write>(&self, tag: &str, xml: &mut XmlWriter<W>) -> io::Result<()> {
        xml.start_element(tag)?;
        xml.scalar_attr("lat", &self.latitude)?;
        xml.scalar_attr("lon", &self.longitude)?;
        xml.opt_leaf("ele", &self.elevation)?;
        xml.opt_leaf("speed", &self.speed)?;
        xml.opt_leaf("time", &self.time)?;
        xml.opt_leaf("magvar", &self.magnetic_variation)?;
        xml.opt_leaf("geoidheight", &self.geoid_height)?;
        xml.opt_leaf("name", &self.name)?;
        xml.opt_leaf("cmt", &self.comment)?;
        xml.opt_leaf("desc", &self.description)?;
        xml.opt_leaf("src", &self.source)?;
        for link in &self.links {
            link.write_xml(xml)?;
        }
        xml.opt_leaf("sym", &self.symbol)?;
        xml.opt_leaf("type", &self.kind)?;
        xml.opt_leaf("fix", &self.fix)?;
        xml.opt_leaf("sat", &self.sat)?;
        xml.opt_leaf("hdop", &self.hdop)?;
        xml.opt_leaf("vdop", &self.vdop)?;
        xml.opt_leaf("pdop", &self.pdop)?;
        xml.opt_leaf("ageofdgpsdata", &self.age_of_dgps_data)?;
        xml.opt_leaf("dgpsid", &self.dgps_id)?;
        xml.end_element()
    }
}
