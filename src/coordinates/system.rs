//! Coordinate system descriptors
//!
//! A [`CoordinateSystem`] says which frame a rectangular triple is expressed
//! in: the frame type, the observer origin, and the instants that pin down
//! time-dependent frames. It carries no behaviour beyond equality and display;
//! the conversion pipeline lives in [`super::conversion`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinates::angle::AngleRole;
use crate::time::Time;
use crate::toposlib::GeographicalLocation;

/// Frame family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    Icrs,
    Equatorial,
    Ecliptical,
    Galactic,
    Horizontal,
}

impl SystemType {
    /// Roles of the (longitude, latitude) pair in this frame
    pub fn roles(&self) -> (AngleRole, AngleRole) {
        match self {
            SystemType::Icrs | SystemType::Equatorial => {
                (AngleRole::RightAscension, AngleRole::Declination)
            }
            SystemType::Ecliptical => (
                AngleRole::EclipticalLongitude,
                AngleRole::EclipticalLatitude,
            ),
            SystemType::Galactic => (AngleRole::GalacticLongitude, AngleRole::GalacticLatitude),
            SystemType::Horizontal => (AngleRole::Azimuth, AngleRole::Altitude),
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SystemType::Icrs => "ICRS",
            SystemType::Equatorial => "equatorial",
            SystemType::Ecliptical => "ecliptical",
            SystemType::Galactic => "galactic",
            SystemType::Horizontal => "horizontal",
        };
        f.write_str(name)
    }
}

/// Where the frame is centred
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Origin {
    Barycentric,
    Heliocentric,
    Geocentric,
    Topocentric(GeographicalLocation),
}

impl Origin {
    pub fn location(&self) -> Option<&GeographicalLocation> {
        match self {
            Origin::Topocentric(location) => Some(location),
            _ => None,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Barycentric => f.write_str("barycentric"),
            Origin::Heliocentric => f.write_str("heliocentric"),
            Origin::Geocentric => f.write_str("geocentric"),
            Origin::Topocentric(location) => write!(f, "topocentric {}", location),
        }
    }
}

/// Which corrections a position includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    /// Referred to the mean equator and equinox
    Mean,
    /// Mean plus nutation
    True,
    /// True plus aberration (not modelled, so equal to true for directions)
    Apparent,
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PositionType::Mean => "mean",
            PositionType::True => "true",
            PositionType::Apparent => "apparent",
        };
        f.write_str(name)
    }
}

/// Immutable description of a reference frame
///
/// Two systems are equal when every field matches exactly; no tolerance is
/// applied to the instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub system_type: SystemType,
    /// Equinox of equatorial and ecliptical frames
    pub equinox: Option<Time>,
    /// Observation instant (horizontal frames, origin shifts)
    pub epoch: Option<Time>,
    /// Date of the ecliptic plane of ecliptical frames
    pub ecliptic: Option<Time>,
    pub origin: Origin,
    /// Whether the longitude grows counter-clockwise seen from the frame pole
    pub anti_clockwise: bool,
}

impl CoordinateSystem {
    /// The International Celestial Reference System (barycentric)
    pub fn icrs() -> Self {
        CoordinateSystem {
            system_type: SystemType::Icrs,
            equinox: None,
            epoch: None,
            ecliptic: None,
            origin: Origin::Barycentric,
            anti_clockwise: true,
        }
    }

    /// Equatorial frame of the given equinox, seen from `origin`
    pub fn equatorial(equinox: Time, origin: Origin) -> Self {
        CoordinateSystem {
            system_type: SystemType::Equatorial,
            equinox: Some(equinox),
            epoch: None,
            ecliptic: None,
            origin,
            anti_clockwise: true,
        }
    }

    /// Barycentric equatorial frame of J2000.0, the conversion hub
    pub fn equatorial_j2000() -> Self {
        Self::equatorial(Time::J2000, Origin::Barycentric)
    }

    pub fn equatorial_j2050() -> Self {
        Self::equatorial(Time::J2050, Origin::Barycentric)
    }

    pub fn equatorial_b1950() -> Self {
        Self::equatorial(Time::B1950, Origin::Barycentric)
    }

    /// Ecliptical frame for the ecliptic of `ecliptic` and equinox `equinox`
    ///
    /// When only one of the two dates is given it is used for both.
    pub fn ecliptical(ecliptic: Option<Time>, equinox: Option<Time>, origin: Origin) -> Self {
        CoordinateSystem {
            system_type: SystemType::Ecliptical,
            equinox: equinox.or(ecliptic),
            epoch: None,
            ecliptic: ecliptic.or(equinox),
            origin,
            anti_clockwise: true,
        }
    }

    /// Ecliptic and equinox of J2000.0
    pub fn ecliptical_j2000(origin: Origin) -> Self {
        Self::ecliptical(Some(Time::J2000), Some(Time::J2000), origin)
    }

    /// The galactic frame (fixed to J2000, barycentric)
    pub fn galactic() -> Self {
        CoordinateSystem {
            system_type: SystemType::Galactic,
            equinox: Some(Time::J2000),
            epoch: None,
            ecliptic: None,
            origin: Origin::Barycentric,
            anti_clockwise: true,
        }
    }

    /// Local horizon of `location` at instant `epoch`
    ///
    /// Azimuth is measured from north through east, so the frame is clockwise.
    pub fn horizontal(epoch: Time, location: GeographicalLocation) -> Self {
        CoordinateSystem {
            system_type: SystemType::Horizontal,
            equinox: Some(epoch),
            epoch: Some(epoch),
            ecliptic: None,
            origin: Origin::Topocentric(location),
            anti_clockwise: false,
        }
    }

    /// Same frame seen from another origin
    pub fn with_origin(&self, origin: Origin) -> Self {
        CoordinateSystem {
            origin,
            ..self.clone()
        }
    }

    /// Same frame with an observation epoch attached
    pub fn with_epoch(&self, epoch: Time) -> Self {
        CoordinateSystem {
            epoch: Some(epoch),
            ..self.clone()
        }
    }

    /// The equinox the frame's equator is referred to (J2000 for ICRS and galactic)
    pub fn reference_equinox(&self) -> Option<Time> {
        match self.system_type {
            SystemType::Icrs | SystemType::Galactic => Some(Time::J2000),
            _ => self.equinox,
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.system_type)?;
        match self.system_type {
            SystemType::Equatorial => {
                if let Some(equinox) = self.equinox {
                    write!(f, " {}", equinox)?;
                }
            }
            SystemType::Ecliptical => {
                match (self.ecliptic, self.equinox) {
                    (Some(ecliptic), Some(equinox)) if ecliptic == equinox => {
                        write!(f, " {}", equinox)?
                    }
                    (Some(ecliptic), Some(equinox)) => {
                        write!(f, " ecliptic {} equinox {}", ecliptic, equinox)?
                    }
                    (Some(date), None) | (None, Some(date)) => write!(f, " {}", date)?,
                    (None, None) => {}
                }
            }
            SystemType::Horizontal => {
                if let Some(epoch) = self.epoch {
                    write!(f, " at {}", epoch)?;
                }
            }
            SystemType::Icrs | SystemType::Galactic => {}
        }
        write!(f, " {}", self.origin)
    }
}
