//! Positions of objects on the sky
//!
//! A [`Coordinates`] value stores one rectangular triple (in meters) plus the
//! [`CoordinateSystem`] it is expressed in. The spherical view is derived on
//! demand, so the two views can never disagree. Values are immutable; every
//! conversion produces a new one.
//!
//! When the distance to an object is unknown the triple is a unit vector of
//! 1 m and the spherical view reports no distance.
//!
//! # Example
//!
//! ```rust
//! use starframe::coordinates::angle::Angle;
//! use starframe::coordinates::{Coordinates, CoordinateSystem, PositionType};
//!
//! let centre = Coordinates::from_spherical(
//!     Angle::from_degrees(266.405_089),
//!     Angle::from_degrees(-28.936_175),
//!     None,
//!     CoordinateSystem::equatorial_j2000(),
//!     PositionType::Mean,
//! );
//! let galactic = centre
//!     .convert(&CoordinateSystem::galactic(), PositionType::Mean)
//!     .unwrap();
//! assert!(galactic.latitude().degrees().abs() < 1e-4);
//! ```

pub mod angle;
pub mod cartesian;
pub mod conversion;
pub mod separation;
pub mod system;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::AU_M;
use crate::units::{meter, Length};
use crate::{Result, StarframeError};
use angle::{normalize_degrees, Angle, TaggedAngle};
use cartesian::Cartesian3;

pub use system::{CoordinateSystem, Origin, PositionType, SystemType};

/// Longitude, latitude and (when known) distance of a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalCoordinates {
    pub longitude: TaggedAngle,
    pub latitude: TaggedAngle,
    pub distance: Option<Length>,
}

/// Rectangular components of a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularCoordinates {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

/// The position of one object in one coordinate system
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    /// Right-handed rectangular components in meters
    position: Cartesian3,
    system: CoordinateSystem,
    position_type: PositionType,
    distance_known: bool,
}

impl Coordinates {
    /// Build coordinates from spherical components
    ///
    /// The longitude is read in the direction the system counts it, so a
    /// horizontal azimuth grows from north through east.
    pub fn from_spherical(
        longitude: Angle,
        latitude: Angle,
        distance: Option<Length>,
        system: CoordinateSystem,
        position_type: PositionType,
    ) -> Self {
        let lon = if system.anti_clockwise {
            longitude.to_radians()
        } else {
            -longitude.to_radians()
        };
        let r = distance.map(|d| d.get::<meter>()).unwrap_or(1.0);
        Coordinates {
            position: Cartesian3::from_spherical(lon, latitude.to_radians(), r),
            system,
            position_type,
            distance_known: distance.is_some(),
        }
    }

    /// Shorthand for a direction given in degrees, without distance
    pub fn from_degrees(
        longitude: f64,
        latitude: f64,
        system: CoordinateSystem,
        position_type: PositionType,
    ) -> Self {
        Self::from_spherical(
            Angle::from_degrees(longitude),
            Angle::from_degrees(latitude),
            None,
            system,
            position_type,
        )
    }

    /// Build coordinates from rectangular components; the distance is known
    pub fn from_rectangular(
        x: Length,
        y: Length,
        z: Length,
        system: CoordinateSystem,
        position_type: PositionType,
    ) -> Self {
        Coordinates {
            position: Cartesian3::new(x.get::<meter>(), y.get::<meter>(), z.get::<meter>()),
            system,
            position_type,
            distance_known: true,
        }
    }

    pub(crate) fn from_parts(
        position: Cartesian3,
        system: CoordinateSystem,
        position_type: PositionType,
        distance_known: bool,
    ) -> Self {
        Coordinates {
            position,
            system,
            position_type,
            distance_known,
        }
    }

    /// Rectangular components in meters
    pub fn position(&self) -> Cartesian3 {
        self.position
    }

    /// Rectangular components in astronomical units
    pub fn position_au(&self) -> Cartesian3 {
        self.position / AU_M
    }

    pub fn system(&self) -> &CoordinateSystem {
        &self.system
    }

    pub fn position_type(&self) -> PositionType {
        self.position_type
    }

    pub fn distance_is_known(&self) -> bool {
        self.distance_known
    }

    /// The same direction with the distance dropped
    ///
    /// A point at the origin has no direction and is rejected.
    pub fn without_distance(&self) -> Result<Coordinates> {
        let direction = self.position.normalize().ok_or_else(|| {
            StarframeError::OutOfRange(format!("no direction to the origin of {}", self.system))
        })?;
        Ok(Coordinates {
            position: direction,
            distance_known: false,
            ..self.clone()
        })
    }

    /// Longitude/latitude in radians in the direction the system counts them
    fn spherical_radians(&self) -> (f64, f64, f64) {
        let (lon, lat, r) = self.position.to_spherical();
        let lon = if self.system.anti_clockwise {
            lon
        } else {
            (2.0 * std::f64::consts::PI - lon).rem_euclid(2.0 * std::f64::consts::PI)
        };
        (lon, lat, r)
    }

    pub fn longitude(&self) -> TaggedAngle {
        let (lon, _, _) = self.spherical_radians();
        let (role, _) = self.system.system_type.roles();
        TaggedAngle::new(role, Angle::from_degrees(normalize_degrees(lon.to_degrees())))
    }

    pub fn latitude(&self) -> TaggedAngle {
        let (_, lat, _) = self.spherical_radians();
        let (_, role) = self.system.system_type.roles();
        TaggedAngle::new(role, Angle::from_degrees(lat.to_degrees()))
    }

    /// Distance from the origin, `None` when it is not known
    pub fn distance(&self) -> Option<Length> {
        if self.distance_known {
            Some(Length::new::<meter>(self.position.magnitude()))
        } else {
            None
        }
    }

    pub fn spherical(&self) -> SphericalCoordinates {
        SphericalCoordinates {
            longitude: self.longitude(),
            latitude: self.latitude(),
            distance: self.distance(),
        }
    }

    pub fn rectangular(&self) -> RectangularCoordinates {
        RectangularCoordinates {
            x: Length::new::<meter>(self.position.x),
            y: Length::new::<meter>(self.position.y),
            z: Length::new::<meter>(self.position.z),
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.longitude(), self.latitude())?;
        if let Some(distance) = self.distance() {
            write!(f, " r={:.8} AU", distance.get::<meter>() / AU_M)?;
        }
        write!(f, " [{}", self.system)?;
        if self.position_type != PositionType::Mean {
            write!(f, ", {}", self.position_type)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Time;
    use crate::toposlib::GeographicalLocation;
    use crate::units::{astronomical_unit, kilometer, length_from_au};
    use angle::AngleRole;
    use approx::assert_relative_eq;

    #[test]
    fn test_spherical_views_agree() {
        let c = Coordinates::from_spherical(
            Angle::from_hours(7.755),
            Angle::from_degrees(28.026_183),
            Some(length_from_au(2.0)),
            CoordinateSystem::equatorial_j2000(),
            PositionType::Mean,
        );
        assert_relative_eq!(c.longitude().degrees(), 116.325, epsilon = 1e-10);
        assert_relative_eq!(c.latitude().degrees(), 28.026_183, epsilon = 1e-10);
        assert_relative_eq!(c.position_au().magnitude(), 2.0, epsilon = 1e-12);
        assert_eq!(c.longitude().role, AngleRole::RightAscension);

        let rect = c.rectangular();
        let again = Coordinates::from_rectangular(
            rect.x,
            rect.y,
            rect.z,
            c.system().clone(),
            PositionType::Mean,
        );
        assert_relative_eq!(again.longitude().degrees(), 116.325, epsilon = 1e-10);
    }

    #[test]
    fn test_unknown_distance_is_unit_meter() {
        let c = Coordinates::from_degrees(10.0, 20.0, CoordinateSystem::galactic(), PositionType::Mean);
        assert!(!c.distance_is_known());
        assert!(c.distance().is_none());
        assert_relative_eq!(c.position().magnitude(), 1.0, epsilon = 1e-15);
        assert!(c.spherical().distance.is_none());
    }

    #[test]
    fn test_clockwise_longitude() {
        let horizon = CoordinateSystem::horizontal(Time::J2000, GeographicalLocation::new(0.0, 52.0));
        let east = Coordinates::from_degrees(90.0, 10.0, horizon, PositionType::Mean);
        // Azimuth 90° is stored at -90° in the right-handed frame (y points west)
        assert_relative_eq!(east.position().y, -(10.0_f64.to_radians().cos()), epsilon = 1e-15);
        assert_relative_eq!(east.longitude().degrees(), 90.0, epsilon = 1e-12);
        assert_eq!(east.longitude().role, AngleRole::Azimuth);
        assert_eq!(east.latitude().role, AngleRole::Altitude);
    }

    #[test]
    fn test_without_distance() {
        let c = Coordinates::from_rectangular(
            Length::new::<astronomical_unit>(0.0),
            Length::new::<kilometer>(3.0),
            Length::new::<kilometer>(4.0),
            CoordinateSystem::icrs(),
            PositionType::Mean,
        );
        assert_relative_eq!(c.distance().unwrap().get::<kilometer>(), 5.0, epsilon = 1e-9);
        let direction = c.without_distance().unwrap();
        assert!(direction.distance().is_none());
        assert_relative_eq!(direction.latitude().degrees(), c.latitude().degrees(), epsilon = 1e-12);
    }

    #[test]
    fn test_origin_has_no_direction() {
        let origin = Coordinates::from_rectangular(
            Length::new::<meter>(0.0),
            Length::new::<meter>(0.0),
            Length::new::<meter>(0.0),
            CoordinateSystem::icrs(),
            PositionType::Mean,
        );
        assert!(matches!(
            origin.without_distance(),
            Err(StarframeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_equality_is_representational() {
        let a = Coordinates::from_degrees(10.0, 20.0, CoordinateSystem::equatorial_j2000(), PositionType::Mean);
        let b = Coordinates::from_degrees(10.0, 20.0, CoordinateSystem::icrs(), PositionType::Mean);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_display() {
        let c = Coordinates::from_spherical(
            Angle::from_degrees(116.328_942),
            Angle::from_degrees(28.026_183),
            None,
            CoordinateSystem::equatorial_j2000(),
            PositionType::Mean,
        );
        assert_eq!(
            c.to_string(),
            "α=07h45m18.946s δ=+28°01'34.3\" [equatorial J2000.0 barycentric]"
        );
    }
}
