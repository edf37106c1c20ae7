//! # gpx_wire
//!
//! A bidirectional mapping between GPX 1.1 documents and a typed,
//! immutable domain model.
//!
//! ## Features
//!
//! - Hand-rolled zero-copy XML tokenization using SIMD-accelerated
//!   string searching
//! - Schema-directed element readers with statically typed child slots
//! - Range-checked value types: an out-of-range latitude cannot be
//!   constructed, parsed or deserialized
//! - A mirror writer producing deterministic, canonical output
//! - Comprehensive error reporting with line/column positions
//!
//! ## Quick Start
//!
//! ```rust
//! use gpx_wire::Gpx;
//!
//! let xml = r#"<gpx version="1.1" creator="eTrex 30">
//!     <wpt lat="48.2081743" lon="16.3738189">
//!         <ele>160</ele>
//!         <name>Stephansdom</name>
//!     </wpt>
//! </gpx>"#;
//!
//! let gpx = Gpx::from_xml(xml).unwrap();
//! let wpt = &gpx.waypoints[0];
//! assert_eq!(wpt.latitude.degrees(), 48.2081743);
//! assert_eq!(wpt.elevation.unwrap().meters(), 160.0);
//! assert_eq!(wpt.name.as_deref(), Some("Stephansdom"));
//! ```
//!
//! ## Building Documents
//!
//! All model types are plain data with public fields; build them with
//! a constructor plus struct update, then serialize:
//!
//! ```rust
//! use gpx_wire::{Gpx, WayPoint};
//!
//! let mut gpx = Gpx::new("gpx-wire");
//! gpx.waypoints.push(WayPoint::of(48.2081743, 16.3738189).unwrap());
//!
//! let xml = gpx.to_xml().unwrap();
//! assert!(xml.contains(r#"<wpt lat="48.2081743" lon="16.3738189"/>"#));
//! ```
//!
//! ## Round Trips
//!
//! Output is canonical: child elements appear in schema order, floats
//! in their shortest form, timestamps normalized to UTC. Parsing a
//! written document yields an equal value:
//!
//! ```rust
//! use gpx_wire::Gpx;
//!
//! let xml = r#"<gpx version="1.1" creator="x">
//!     <trk><trkseg><trkpt lat="47.0" lon="15.4"/></trkseg></trk>
//! </gpx>"#;
//!
//! let gpx = Gpx::from_xml(xml).unwrap();
//! let written = gpx.to_xml().unwrap();
//! assert_eq!(Gpx::from_xml(&written).unwrap(), gpx);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod cursor;
pub mod error;
pub mod escape;
pub mod format;
pub mod model;
pub mod read;
pub mod reader;
pub mod scalar;
pub mod types;
pub mod write;

// Re-export main types and functions
pub use cursor::{Cursor, Token};
pub use error::{Error, ErrorKind, Position, Result};
pub use escape::{escape, unescape};
pub use format::{Location, LocationFormatter};
pub use model::{
    Bounds, Copyright, Email, Gpx, Link, Metadata, Person, Route, Track, TrackSegment, WayPoint,
    NAMESPACE, VERSION,
};
pub use read::ElementReader;
pub use reader::{Attribute, XmlEvent, XmlReader};
pub use scalar::Scalar;
pub use types::{Degrees, DgpsStation, Fix, Latitude, Length, Longitude, Speed};
pub use write::{IndentConfig, XmlWriter};
