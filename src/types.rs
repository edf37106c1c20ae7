//! Validated scalar value types of the GPX data model.
//!
//! Each type owns its numeric domain: the constructor rejects values
//! outside it, so a constructed value is always valid and the rest of
//! the crate never re-checks ranges. Each type also carries its wire
//! text form through the [`Scalar`] pair.

use crate::error::{Error, Result};
use crate::scalar::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;

fn parse_checked<T, F>(text: &str, build: F) -> std::result::Result<T, String>
where
    F: FnOnce(f64) -> Result<T>,
{
    let value = f64::parse_text(text)?;
    build(value).map_err(|e| e.to_string())
}

/// WGS84 latitude in decimal degrees, in `[-90, +90]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Latitude(f64);

impl Latitude {
    /// Creates a latitude, failing outside `[-90, +90]`.
    pub fn new(degrees: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&degrees) {
            return Err(Error::out_of_range(format!(
                "latitude must be in [-90, 90], got {}",
                degrees
            )));
        }
        Ok(Self(degrees))
    }

    /// The latitude in decimal degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Latitude {
    type Error = Error;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Latitude> for f64 {
    fn from(lat: Latitude) -> f64 {
        lat.0
    }
}

impl Scalar for Latitude {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        parse_checked(text, Self::new)
    }

    fn format_text(&self) -> String {
        self.0.format_text()
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// WGS84 longitude in decimal degrees, in `[-180, +180)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl Longitude {
    /// Creates a longitude, failing outside `[-180, +180)`.
    pub fn new(degrees: f64) -> Result<Self> {
        if !(-180.0..180.0).contains(&degrees) {
            return Err(Error::out_of_range(format!(
                "longitude must be in [-180, 180), got {}",
                degrees
            )));
        }
        Ok(Self(degrees))
    }

    /// The longitude in decimal degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Longitude {
    type Error = Error;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Longitude> for f64 {
    fn from(lon: Longitude) -> f64 {
        lon.0
    }
}

impl Scalar for Longitude {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        parse_checked(text, Self::new)
    }

    fn format_text(&self) -> String {
        self.0.format_text()
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// An angle in decimal degrees, in `[0, 360)`. Used for magnetic
/// variation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Degrees(f64);

impl Degrees {
    /// Creates an angle, failing outside `[0, 360)`.
    pub fn new(degrees: f64) -> Result<Self> {
        if !(0.0..360.0).contains(&degrees) {
            return Err(Error::out_of_range(format!(
                "degrees must be in [0, 360), got {}",
                degrees
            )));
        }
        Ok(Self(degrees))
    }

    /// The angle in decimal degrees.
    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Degrees {
    type Error = Error;

    fn try_from(degrees: f64) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Degrees> for f64 {
    fn from(deg: Degrees) -> f64 {
        deg.0
    }
}

impl Scalar for Degrees {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        parse_checked(text, Self::new)
    }

    fn format_text(&self) -> String {
        self.0.format_text()
    }
}

/// A length in meters. Used for elevation and geoid height.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Length(f64);

impl Length {
    /// Creates a length from meters, failing on non-finite input.
    pub fn from_meters(meters: f64) -> Result<Self> {
        if !meters.is_finite() {
            return Err(Error::out_of_range("length must be finite"));
        }
        Ok(Self(meters))
    }

    /// The length in meters.
    #[inline]
    pub fn meters(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Length {
    type Error = Error;

    fn try_from(meters: f64) -> Result<Self> {
        Self::from_meters(meters)
    }
}

impl From<Length> for f64 {
    fn from(len: Length) -> f64 {
        len.0
    }
}

impl Scalar for Length {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        parse_checked(text, Self::from_meters)
    }

    fn format_text(&self) -> String {
        self.0.format_text()
    }
}

/// A speed in meters per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Speed(f64);

impl Speed {
    /// Creates a speed from meters per second, failing on negative or
    /// non-finite input.
    pub fn from_mps(mps: f64) -> Result<Self> {
        if !mps.is_finite() || mps < 0.0 {
            return Err(Error::out_of_range(format!(
                "speed must be finite and non-negative, got {}",
                mps
            )));
        }
        Ok(Self(mps))
    }

    /// The speed in meters per second.
    #[inline]
    pub fn mps(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Speed {
    type Error = Error;

    fn try_from(mps: f64) -> Result<Self> {
        Self::from_mps(mps)
    }
}

impl From<Speed> for f64 {
    fn from(speed: Speed) -> f64 {
        speed.0
    }
}

impl Scalar for Speed {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        parse_checked(text, Self::from_mps)
    }

    fn format_text(&self) -> String {
        self.0.format_text()
    }
}

/// A DGPS station id, in `[0, 1023]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct DgpsStation(u16);

impl DgpsStation {
    /// Creates a DGPS station id, failing above 1023.
    pub fn new(id: u16) -> Result<Self> {
        if id > 1023 {
            return Err(Error::out_of_range(format!(
                "dgps station must be in [0, 1023], got {}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// The station id.
    #[inline]
    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for DgpsStation {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        Self::new(id)
    }
}

impl From<DgpsStation> for u16 {
    fn from(station: DgpsStation) -> u16 {
        station.0
    }
}

impl Scalar for DgpsStation {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        let id: u16 = text.parse().map_err(|_| "invalid station id".to_string())?;
        Self::new(id).map_err(|e| e.to_string())
    }

    fn format_text(&self) -> String {
        let mut buffer = itoa::Buffer::new();
        buffer.format(self.0).to_string()
    }
}

/// The kind of GPS fix a point was recorded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fix {
    /// No fix.
    #[serde(rename = "none")]
    None,
    /// Two-dimensional fix.
    #[serde(rename = "2d")]
    TwoD,
    /// Three-dimensional fix.
    #[serde(rename = "3d")]
    ThreeD,
    /// Differential GPS fix.
    #[serde(rename = "dgps")]
    Dgps,
    /// Military precise positioning service fix.
    #[serde(rename = "pps")]
    Pps,
}

impl Fix {
    /// The wire name of this fix kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Fix::None => "none",
            Fix::TwoD => "2d",
            Fix::ThreeD => "3d",
            Fix::Dgps => "dgps",
            Fix::Pps => "pps",
        }
    }
}

impl Scalar for Fix {
    fn parse_text(text: &str) -> std::result::Result<Self, String> {
        match text {
            "none" => Ok(Fix::None),
            "2d" => Ok(Fix::TwoD),
            "3d" => Ok(Fix::ThreeD),
            "dgps" => Ok(Fix::Dgps),
            "pps" => Ok(Fix::Pps),
            other => Err(format!("unknown fix kind '{}'", other)),
        }
    }

    fn format_text(&self) -> String {
        self.as_str().to_string()
    }
}

impl fmt::Display for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_range() {
        assert!(Latitude::new(48.2081743).is_ok());
        assert!(Latitude::new(-90.0).is_ok());
        assert!(Latitude::new(90.0).is_ok());
        assert!(Latitude::new(90.0001).is_err());
        assert!(Latitude::new(-91.0).is_err());
        assert!(Latitude::new(f64::NAN).is_err());
    }

    #[test]
    fn test_longitude_range() {
        assert!(Longitude::new(16.3738189).is_ok());
        assert!(Longitude::new(-180.0).is_ok());
        assert!(Longitude::new(180.0).is_err());
        assert!(Longitude::new(179.9999).is_ok());
    }

    #[test]
    fn test_degrees_range() {
        assert!(Degrees::new(0.0).is_ok());
        assert!(Degrees::new(359.9).is_ok());
        assert!(Degrees::new(360.0).is_err());
        assert!(Degrees::new(-0.1).is_err());
    }

    #[test]
    fn test_speed_rejects_negative() {
        assert!(Speed::from_mps(3.5).is_ok());
        assert!(Speed::from_mps(-0.1).is_err());
    }

    #[test]
    fn test_dgps_station_range() {
        assert!(DgpsStation::new(0).is_ok());
        assert!(DgpsStation::new(1023).is_ok());
        assert!(DgpsStation::new(1024).is_err());
    }

    #[test]
    fn test_latitude_scalar_roundtrip() {
        let lat = Latitude::parse_text("48.2081743").unwrap();
        assert_eq!(lat.format_text(), "48.2081743");
        assert!(Latitude::parse_text("abc").is_err());
        assert!(Latitude::parse_text("120").is_err());
    }

    #[test]
    fn test_fix_scalar() {
        assert_eq!(Fix::parse_text("2d").unwrap(), Fix::TwoD);
        assert_eq!(Fix::ThreeD.format_text(), "3d");
        assert!(Fix::parse_text("4d").is_err());
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: std::result::Result<Latitude, _> = serde_json::from_str("48.2");
        assert!(ok.is_ok());
        let bad: std::result::Result<Latitude, _> = serde_json::from_str("123.0");
        assert!(bad.is_err());
    }

    #[test]
    fn test_fix_serde_names() {
        assert_eq!(serde_json::to_string(&Fix::TwoD).unwrap(), "\"2d\"");
        let fix: Fix = serde_json::from_str("\"dgps\"").unwrap();
        assert_eq!(fix, Fix::Dgps);
    }
}
