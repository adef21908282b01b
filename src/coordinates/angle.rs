//! # Angle Representation Module
//!
//! This module provides exact angle representation that preserves the original
//! precision and format (degrees vs radians) of angular measurements, and the
//! role-tagged angles used for the longitude/latitude pair of each frame.
//!
//! ## Internal Storage
//!
//! The `Angle` struct uses an enum-based storage system:
//! - Values provided in degrees are stored exactly as degrees
//! - Values provided in radians are stored exactly as radians
//! - Conversion only occurs when explicitly requested via `to_degrees()` or `to_radians()`
//!
//! ## Roles
//!
//! A right ascension and an azimuth are both "a longitude"; they differ only in
//! the symbol and the preferred unit used to show them. [`TaggedAngle`] pairs an
//! [`Angle`] with an [`AngleRole`] instead of modelling every role as its own type.
//!
//! ## Examples
//!
//! ```rust
//! use starframe::coordinates::angle::{Angle, AngleRole, TaggedAngle};
//!
//! let ra = TaggedAngle::new(AngleRole::RightAscension, Angle::from_hours(7.755));
//! assert_eq!(ra.symbol(), "α");
//! assert!((ra.degrees() - 116.325).abs() < 1e-12);
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::constants::DEG_PER_HOUR;

/// Internal representation format for angle values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in radians
    Radians(f64),
}

/// Represents an angular measurement with exact precision preservation
///
/// The `Angle` type stores angular values in their original format
/// (degrees or radians) to maintain maximum precision. Conversion
/// between formats only occurs when explicitly requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    angle: AngleFormat,
}

impl Angle {
    /// Creates an angle from a value in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starframe::coordinates::angle::Angle;
    ///
    /// let right_angle = Angle::from_degrees(90.0);
    /// assert_eq!(right_angle.to_degrees(), 90.0);
    /// ```
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Creates an angle from hours of right ascension (1h = 15°)
    pub fn from_hours(hours: f64) -> Self {
        Self::from_degrees(hours * DEG_PER_HOUR)
    }

    /// Creates an angle from arcseconds
    pub fn from_arcseconds(arcseconds: f64) -> Self {
        Self::from_degrees(arcseconds / 3600.0)
    }

    /// Returns the angle value in degrees
    ///
    /// If the angle was originally stored in degrees, returns the exact
    /// original value.
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Radians(rad) => rad * (180.0 / PI),
        }
    }

    /// Returns the angle value in radians
    ///
    /// If the angle was originally stored in radians, returns the exact
    /// original value.
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg * (PI / 180.0),
            AngleFormat::Radians(rad) => rad,
        }
    }

    /// Returns the angle in hours (15° per hour)
    pub fn to_hours(&self) -> f64 {
        self.to_degrees() / DEG_PER_HOUR
    }

    /// Returns the angle in arcseconds
    pub fn to_arcseconds(&self) -> f64 {
        self.to_degrees() * 3600.0
    }

    /// Returns the internal format of this angle
    pub fn format(&self) -> AngleFormat {
        self.angle
    }

    /// The same angle wrapped into [0°, 360°), keeping the storage format
    pub fn normalized(&self) -> Angle {
        match self.angle {
            AngleFormat::Degrees(deg) => Angle::from_degrees(normalize_degrees(deg)),
            AngleFormat::Radians(rad) => Angle::from_radians(rad.rem_euclid(2.0 * PI)),
        }
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;

    fn add(self, other: Angle) -> Angle {
        match (self.angle, other.angle) {
            (AngleFormat::Radians(a), AngleFormat::Radians(b)) => Angle::from_radians(a + b),
            _ => Angle::from_degrees(self.to_degrees() + other.to_degrees()),
        }
    }
}

impl std::ops::Sub for Angle {
    type Output = Angle;

    fn sub(self, other: Angle) -> Angle {
        match (self.angle, other.angle) {
            (AngleFormat::Radians(a), AngleFormat::Radians(b)) => Angle::from_radians(a - b),
            _ => Angle::from_degrees(self.to_degrees() - other.to_degrees()),
        }
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        match self.angle {
            AngleFormat::Degrees(deg) => Angle::from_degrees(-deg),
            AngleFormat::Radians(rad) => Angle::from_radians(-rad),
        }
    }
}

/// Wrap a value in degrees into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// What an angle measures inside a coordinate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleRole {
    RightAscension,
    Declination,
    EclipticalLongitude,
    EclipticalLatitude,
    GalacticLongitude,
    GalacticLatitude,
    Azimuth,
    Altitude,
    SiderealTime,
    /// Separations, position angles and anything else without a frame role
    Plain,
}

impl AngleRole {
    /// The conventional symbol for the role
    pub fn symbol(&self) -> &'static str {
        match self {
            AngleRole::RightAscension => "α",
            AngleRole::Declination => "δ",
            AngleRole::EclipticalLongitude => "λ",
            AngleRole::EclipticalLatitude => "β",
            AngleRole::GalacticLongitude => "l",
            AngleRole::GalacticLatitude => "b",
            AngleRole::Azimuth => "A",
            AngleRole::Altitude => "h",
            AngleRole::SiderealTime => "θ",
            AngleRole::Plain => "",
        }
    }

    /// Whether values of this role are customarily shown in hours
    pub fn uses_hours(&self) -> bool {
        matches!(self, AngleRole::RightAscension | AngleRole::SiderealTime)
    }

    /// Whether this role is the longitude-like member of a coordinate pair
    pub fn is_longitude(&self) -> bool {
        matches!(
            self,
            AngleRole::RightAscension
                | AngleRole::EclipticalLongitude
                | AngleRole::GalacticLongitude
                | AngleRole::Azimuth
                | AngleRole::SiderealTime
        )
    }
}

/// An angle together with the role it plays in a coordinate frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaggedAngle {
    pub role: AngleRole,
    pub angle: Angle,
}

impl TaggedAngle {
    pub fn new(role: AngleRole, angle: Angle) -> Self {
        TaggedAngle { role, angle }
    }

    pub fn symbol(&self) -> &'static str {
        self.role.symbol()
    }

    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    pub fn radians(&self) -> f64 {
        self.angle.to_radians()
    }

    pub fn hours(&self) -> f64 {
        self.angle.to_hours()
    }
}

impl fmt::Display for TaggedAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = if self.role.uses_hours() {
            format_hours(self.degrees())
        } else if self.role.is_longitude() {
            format_degrees(self.degrees(), false)
        } else {
            format_degrees(self.degrees(), true)
        };
        if self.role == AngleRole::Plain {
            write!(f, "{}", value)
        } else {
            write!(f, "{}={}", self.symbol(), value)
        }
    }
}

/// Format an angle in degrees as `HHhMMmSS.sss`, wrapping into [0h, 24h)
pub fn format_hours(degrees: f64) -> String {
    let millis = (normalize_degrees(degrees) / DEG_PER_HOUR * 3_600_000.0).round() as u64;
    let millis = millis % (24 * 3_600_000);
    let (h, rest) = (millis / 3_600_000, millis % 3_600_000);
    let (m, rest) = (rest / 60_000, rest % 60_000);
    format!("{:02}h{:02}m{:02}.{:03}s", h, m, rest / 1000, rest % 1000)
}

/// Format an angle in degrees as `DDD°MM'SS.s"`, signed when `signed` is set
pub fn format_degrees(degrees: f64, signed: bool) -> String {
    let sign = if degrees < 0.0 { "-" } else if signed { "+" } else { "" };
    let tenths = (degrees.abs() * 36_000.0).round() as u64;
    let (d, rest) = (tenths / 36_000, tenths % 36_000);
    let (m, rest) = (rest / 600, rest % 600);
    format!("{}{:02}°{:02}'{:02}.{}\"", sign, d, m, rest / 10, rest % 10)
}

lazy_static! {
    /// `13h10m46.3668s`, `13h 10m`, `7h`
    static ref HMS: Regex =
        Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)h\s*(?:(\d+(?:\.\d+)?)m\s*)?(?:(\d+(?:\.\d+)?)s)?\s*$")
            .expect("valid regex");
    /// `+28°01'34.26"`, `-5d30m`, `12°`
    static ref DMS: Regex = Regex::new(
        r#"^\s*([+-])?\s*(\d+(?:\.\d+)?)\s*[°d]\s*(?:(\d+(?:\.\d+)?)\s*['m′]\s*)?(?:(\d+(?:\.\d+)?)\s*(?:"|s|″|'')?)?\s*$"#
    )
    .expect("valid regex");
    /// `13 10 46.37`, `-28:56:10.2`
    static ref SPACED: Regex = Regex::new(
        r"^\s*([+-])?(\d+(?:\.\d+)?)[\s:]+(\d+(?:\.\d+)?)(?:[\s:]+(\d+(?:\.\d+)?))?\s*$"
    )
    .expect("valid regex");
}

fn capture_f64(caps: &regex::Captures, index: usize) -> f64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse a sexagesimal or decimal angle
///
/// Accepts hour notation (`"13h10m46.37s"`), degree notation (`"+28°01'34.3\""`,
/// `"-5d30m"`), colon/space separated triples and plain decimals. Separated
/// triples and plain decimals are read as hours when `hours` is set and as
/// degrees otherwise.
///
/// # Examples
///
/// ```rust
/// use starframe::coordinates::angle::parse_sexagesimal;
///
/// let ra = parse_sexagesimal("13h10m46.3668s", true).unwrap();
/// assert!((ra.to_degrees() - 197.693195).abs() < 1e-6);
/// let dec = parse_sexagesimal("-28 56 10.23", false).unwrap();
/// assert!((dec.to_degrees() + 28.936175).abs() < 1e-6);
/// ```
pub fn parse_sexagesimal(input: &str, hours: bool) -> Option<Angle> {
    if let Some(caps) = HMS.captures(input) {
        let h = capture_f64(&caps, 1);
        let value = h.abs() + capture_f64(&caps, 2) / 60.0 + capture_f64(&caps, 3) / 3600.0;
        return Some(Angle::from_hours(value.copysign(h)));
    }
    if let Some(caps) = DMS.captures(input) {
        let negative = caps.get(1).map(|m| m.as_str() == "-").unwrap_or(false);
        let value =
            capture_f64(&caps, 2) + capture_f64(&caps, 3) / 60.0 + capture_f64(&caps, 4) / 3600.0;
        return Some(Angle::from_degrees(if negative { -value } else { value }));
    }
    let (negative, value) = if let Some(caps) = SPACED.captures(input) {
        let negative = caps.get(1).map(|m| m.as_str() == "-").unwrap_or(false);
        let value =
            capture_f64(&caps, 2) + capture_f64(&caps, 3) / 60.0 + capture_f64(&caps, 4) / 3600.0;
        (negative, value)
    } else {
        let value = input.trim().parse::<f64>().ok()?;
        (value < 0.0, value.abs())
    };
    let value = if negative { -value } else { value };
    Some(if hours {
        Angle::from_hours(value)
    } else {
        Angle::from_degrees(value)
    })
}
