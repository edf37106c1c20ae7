//! The GPX domain model.
//!
//! All types are plain data with public fields. Instances are built
//! directly, by struct update from a constructor like
//! [`WayPoint::new`], or by parsing; once built they are never mutated
//! by the crate itself. Each type pairs a reader with a writer that
//! emits children in the same declared order, which is what makes
//! parse-then-write canonical.

mod bounds;
mod gpx;
mod link;
mod metadata;
mod route;
mod track;
mod waypoint;

pub use bounds::Bounds;
pub use gpx::{Gpx, NAMESPACE, VERSION};
pub use link::Link;
pub use metadata::{Copyright, Email, Metadata, Person};
pub use route::Route;
pub use track::{Track, TrackSegment};
pub use waypoint::WayPoint;
