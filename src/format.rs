//! Pattern-based printing of geographic positions.
//!
//! A [`LocationFormatter`] is built once from a pattern and can then be
//! used any number of times; it is immutable and thread-safe. Patterns
//! are a sequence of letters and symbols, e.g. `DD°MM'SS.SSS"X`
//! prints `48°12'29.427"N`.
//!
//! | Symbol | Meaning                        | Examples     |
//! |--------|--------------------------------|--------------|
//! | `D`    | degree part of latitude        | 34; 23.2332  |
//! | `M`    | minute part of latitude        | 45; 45.6     |
//! | `S`    | second part of latitude        | 7; 07        |
//! | `X`    | hemisphere of latitude         | N; S         |
//! | `d`    | degree part of longitude       | 34; 23.2332  |
//! | `m`    | minute part of longitude       | 45; 45.6     |
//! | `s`    | second part of longitude       | 7; 07        |
//! | `x`    | hemisphere of longitude        | E; W         |
//! | `E`    | elevation in meters            | 234; 1023    |
//! | `'`    | escape for literal text        |              |
//! | `''`   | single quote                   | '            |
//! | `[`    | optional section start         |              |
//! | `]`    | optional section end           |              |
//!
//! Repeating a letter sets the zero-padded minimum width; a decimal
//! point followed by a run of the same letter adds fixed fraction
//! digits (`SS.SSS`). An optional section is printed only when every
//! field it references is present.

use crate::types::{Latitude, Length, Longitude};
use std::fmt;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// A position to print: any subset of latitude, longitude and
/// elevation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    /// Latitude of the position.
    pub latitude: Option<Latitude>,
    /// Longitude of the position.
    pub longitude: Option<Longitude>,
    /// Elevation at the position.
    pub elevation: Option<Length>,
}

impl Location {
    /// Creates a location from a coordinate pair.
    pub fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            elevation: None,
        }
    }
}

impl From<&crate::model::WayPoint> for Location {
    fn from(wpt: &crate::model::WayPoint) -> Self {
        Self {
            latitude: Some(wpt.latitude),
            longitude: Some(wpt.longitude),
            elevation: wpt.elevation,
        }
    }
}

/// A malformed formatter pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// What is wrong with the pattern.
    pub reason: String,
}

impl PatternError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid location pattern: {}", self.reason)
    }
}

impl std::error::Error for PatternError {}

/// The location lacks a field the pattern requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFieldError {
    /// The absent field.
    pub field: &'static str,
}

impl fmt::Display for MissingFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "location has no {}", self.field)
    }
}

impl std::error::Error for MissingFieldError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lat,
    Lon,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Degrees {
        axis: Axis,
        width: usize,
        fraction: usize,
    },
    Minutes {
        axis: Axis,
        width: usize,
        fraction: usize,
    },
    Seconds {
        axis: Axis,
        width: usize,
        fraction: usize,
    },
    Hemisphere(Axis),
    Elevation {
        width: usize,
        fraction: usize,
    },
    Optional(Vec<Segment>),
}

/// Formatter for printing geographic locations.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFormatter {
    segments: Vec<Segment>,
}

impl LocationFormatter {
    /// Creates a formatter from a pattern.
    pub fn of_pattern(pattern: &str) -> Result<Self, PatternError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;
        let segments = parse_segments(&chars, &mut i, false)?;
        Ok(Self { segments })
    }

    /// The human latitude format `DD°MM'SS.SSS"X`, e.g.
    /// `48°12'29.427"N`.
    pub fn iso_human_lat() -> &'static LocationFormatter {
        static FMT: OnceLock<LocationFormatter> = OnceLock::new();
        FMT.get_or_init(|| LocationFormatter {
            segments: human_axis_segments(Axis::Lat),
        })
    }

    /// The human longitude format `dd°mm'ss.sss"x`, e.g.
    /// `16°22'25.748"E`.
    pub fn iso_human_lon() -> &'static LocationFormatter {
        static FMT: OnceLock<LocationFormatter> = OnceLock::new();
        FMT.get_or_init(|| LocationFormatter {
            segments: human_axis_segments(Axis::Lon),
        })
    }

    /// The human coordinate-pair format: latitude and longitude
    /// separated by a space, e.g. `48°12'29.427"N 16°22'25.748"E`.
    pub fn iso_human_lat_lon() -> &'static LocationFormatter {
        static FMT: OnceLock<LocationFormatter> = OnceLock::new();
        FMT.get_or_init(|| {
            let mut segments = human_axis_segments(Axis::Lat);
            segments.push(Segment::Literal(" ".to_string()));
            segments.extend(human_axis_segments(Axis::Lon));
            LocationFormatter { segments }
        })
    }

    /// Prints the location. Fails when the location lacks a field the
    /// pattern requires outside an optional section.
    pub fn format(&self, location: &Location) -> Result<String, MissingFieldError> {
        let mut out = String::new();
        format_segments(&self.segments, location, &mut out)?;
        Ok(out)
    }
}

fn human_axis_segments(axis: Axis) -> Vec<Segment> {
    vec![
        Segment::Degrees {
            axis,
            width: 2,
            fraction: 0,
        },
        Segment::Literal("°".to_string()),
        Segment::Minutes {
            axis,
            width: 2,
            fraction: 0,
        },
        Segment::Literal("'".to_string()),
        Segment::Seconds {
            axis,
            width: 2,
            fraction: 3,
        },
        Segment::Literal("\"".to_string()),
        Segment::Hemisphere(axis),
    ]
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn run_len(chars: &[char], i: &mut usize, c: char) -> usize {
    let start = *i;
    while *i < chars.len() && chars[*i] == c {
        *i += 1;
    }
    *i - start
}

fn parse_segments(
    chars: &[char],
    i: &mut usize,
    nested: bool,
) -> Result<Vec<Segment>, PatternError> {
    let mut segments = Vec::new();
    let mut literal = String::new();

    while *i < chars.len() {
        let c = chars[*i];
        match c {
            'D' | 'M' | 'S' | 'd' | 'm' | 's' | 'E' => {
                flush_literal(&mut literal, &mut segments);
                let width = run_len(chars, i, c);
                let mut fraction = 0;
                if *i + 1 < chars.len()
                    && (chars[*i] == '.' || chars[*i] == ',')
                    && chars[*i + 1] == c
                {
                    *i += 1;
                    fraction = run_len(chars, i, c);
                }
                segments.push(match c {
                    'D' => Segment::Degrees {
                        axis: Axis::Lat,
                        width,
                        fraction,
                    },
                    'M' => Segment::Minutes {
                        axis: Axis::Lat,
                        width,
                        fraction,
                    },
                    'S' => Segment::Seconds {
                        axis: Axis::Lat,
                        width,
                        fraction,
                    },
                    'd' => Segment::Degrees {
                        axis: Axis::Lon,
                        width,
                        fraction,
                    },
                    'm' => Segment::Minutes {
                        axis: Axis::Lon,
                        width,
                        fraction,
                    },
                    's' => Segment::Seconds {
                        axis: Axis::Lon,
                        width,
                        fraction,
                    },
                    _ => Segment::Elevation { width, fraction },
                });
            }
            'X' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Hemisphere(Axis::Lat));
                *i += 1;
            }
            'x' => {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::Hemisphere(Axis::Lon));
                *i += 1;
            }
            '[' => {
                flush_literal(&mut literal, &mut segments);
                *i += 1;
                segments.push(Segment::Optional(parse_segments(chars, i, true)?));
            }
            ']' => {
                if !nested {
                    return Err(PatternError::new("unmatched ']'"));
                }
                *i += 1;
                flush_literal(&mut literal, &mut segments);
                return Ok(segments);
            }
            '\'' => {
                *i += 1;
                let start_len = literal.len();
                loop {
                    if *i >= chars.len() {
                        return Err(PatternError::new("unterminated quote"));
                    }
                    if chars[*i] == '\'' {
                        if *i + 1 < chars.len() && chars[*i + 1] == '\'' {
                            literal.push('\'');
                            *i += 2;
                        } else {
                            *i += 1;
                            break;
                        }
                    } else {
                        literal.push(chars[*i]);
                        *i += 1;
                    }
                }
                // a bare '' is a literal single quote
                if literal.len() == start_len {
                    literal.push('\'');
                }
            }
            other => {
                literal.push(other);
                *i += 1;
            }
        }
    }

    if nested {
        return Err(PatternError::new("unterminated optional section"));
    }
    flush_literal(&mut literal, &mut segments);
    Ok(segments)
}

fn axis_value(location: &Location, axis: Axis) -> Result<f64, MissingFieldError> {
    match axis {
        Axis::Lat => location
            .latitude
            .map(Latitude::degrees)
            .ok_or(MissingFieldError { field: "latitude" }),
        Axis::Lon => location
            .longitude
            .map(Longitude::degrees)
            .ok_or(MissingFieldError { field: "longitude" }),
    }
}

fn push_number(out: &mut String, value: f64, width: usize, fraction: usize) {
    // writing into a String cannot fail
    let total = if fraction > 0 {
        width + 1 + fraction
    } else {
        width
    };
    let _ = write!(out, "{:0w$.p$}", value, w = total, p = fraction);
}

fn format_segments(
    segments: &[Segment],
    location: &Location,
    out: &mut String,
) -> Result<(), MissingFieldError> {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Hemisphere(axis) => {
                let value = axis_value(location, *axis)?;
                out.push(match (axis, value >= 0.0) {
                    (Axis::Lat, true) => 'N',
                    (Axis::Lat, false) => 'S',
                    (Axis::Lon, true) => 'E',
                    (Axis::Lon, false) => 'W',
                });
            }
            Segment::Degrees {
                axis,
                width,
                fraction,
            } => {
                let value = axis_value(location, *axis)?.abs();
                let value = if *fraction == 0 { value.trunc() } else { value };
                push_number(out, value, *width, *fraction);
            }
            Segment::Minutes {
                axis,
                width,
                fraction,
            } => {
                let value = axis_value(location, *axis)?.abs();
                let minutes = (value - value.trunc()) * 60.0;
                let minutes = if *fraction == 0 {
                    minutes.trunc()
                } else {
                    minutes
                };
                push_number(out, minutes, *width, *fraction);
            }
            Segment::Seconds {
                axis,
                width,
                fraction,
            } => {
                let value = axis_value(location, *axis)?.abs();
                let minutes = (value - value.trunc()) * 60.0;
                let seconds = (minutes - minutes.trunc()) * 60.0;
                let seconds = if *fraction == 0 {
                    seconds.trunc()
                } else {
                    seconds
                };
                push_number(out, seconds, *width, *fraction);
            }
            Segment::Elevation { width, fraction } => {
                let meters = location
                    .elevation
                    .map(Length::meters)
                    .ok_or(MissingFieldError { field: "elevation" })?;
                let meters = if *fraction == 0 { meters.trunc() } else { meters };
                push_number(out, meters, *width, *fraction);
            }
            Segment::Optional(inner) => {
                // a missing field silently drops the whole section
                let mut section = String::new();
                if format_segments(inner, location, &mut section).is_ok() {
                    out.push_str(&section);
                }
            }
        }
    }
    Ok(())
}
