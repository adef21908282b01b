//! Earth rotation: Greenwich and local sidereal time
//!
//! Mean sidereal time uses the IAU 1982 expression (Meeus eq. 12.4) in Julian
//! days since J2000. Apparent sidereal time adds the equation of the
//! equinoxes, `Δψ · cos ε`, with ε the true obliquity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinates::angle::{normalize_degrees, Angle, AngleRole, TaggedAngle};
use crate::coordinates::system::PositionType;
use crate::nutationlib::{nutation, true_obliquity};
use crate::time::Time;
use crate::toposlib::GeographicalLocation;
use crate::Result;

/// Greenwich mean sidereal time in degrees, normalized to [0, 360)
pub fn greenwich_mean_sidereal_time(time: &Time) -> f64 {
    let d = time.days_since_j2000();
    let t = time.julian_centuries_since_j2000();
    let theta = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Equation of the equinoxes in degrees (apparent minus mean sidereal time)
pub fn equation_of_the_equinoxes(time: &Time) -> Result<f64> {
    let epsilon = true_obliquity(time)?.to_radians();
    Ok(nutation(time).delta_psi * epsilon.cos() / 3600.0)
}

/// Local sidereal time in degrees for a west-positive longitude
///
/// Mean sidereal time is returned for [`PositionType::Mean`]; any other
/// position type yields apparent sidereal time.
pub fn sidereal_time(time: &Time, longitude_west: f64, position_type: PositionType) -> Result<f64> {
    let mut theta = greenwich_mean_sidereal_time(time) - longitude_west;
    if position_type != PositionType::Mean {
        theta += equation_of_the_equinoxes(time)?;
    }
    Ok(normalize_degrees(theta))
}

/// A sidereal time together with whether it is mean or apparent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealTime {
    angle: Angle,
    position_type: PositionType,
}

impl SiderealTime {
    /// Local sidereal time at `location`
    pub fn new(
        time: &Time,
        location: &GeographicalLocation,
        position_type: PositionType,
    ) -> Result<Self> {
        let degrees = sidereal_time(time, location.longitude, position_type)?;
        Ok(SiderealTime {
            angle: Angle::from_degrees(degrees),
            position_type,
        })
    }

    /// Sidereal time at Greenwich
    pub fn greenwich(time: &Time, position_type: PositionType) -> Result<Self> {
        Self::new(time, &GeographicalLocation::new(0.0, 0.0), position_type)
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    pub fn hours(&self) -> f64 {
        self.angle.to_hours()
    }

    pub fn position_type(&self) -> PositionType {
        self.position_type
    }

    pub fn tagged(&self) -> TaggedAngle {
        TaggedAngle::new(AngleRole::SiderealTime, self.angle)
    }
}

impl fmt::Display for SiderealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tagged(), self.position_type)
    }
}
