//! Observer locations on the Earth's surface
//!
//! A [`GeographicalLocation`] is only ever used as the parameter of a
//! topocentric origin and of the local sidereal time, so it stays a plain
//! record: no ellipsoid model and no geocentric position.
//!
//! Longitudes follow the convention of the sidereal-time formula and are
//! **positive west of Greenwich**. Use [`GeographicalLocation::from_east_longitude`]
//! when starting from the usual east-positive geographic longitude.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coordinates::angle::{format_degrees, Angle};
use crate::coordinates::system::PositionType;
use crate::earthlib::SiderealTime;
use crate::time::Time;
use crate::units::{meter, Length};
use crate::Result;

/// A named place on the Earth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicalLocation {
    /// Optional display name
    pub name: Option<String>,
    /// Longitude in degrees, positive west of Greenwich
    pub longitude: f64,
    /// Geodetic latitude in degrees, positive north
    pub latitude: f64,
    /// Height above sea level in meters, if known
    pub elevation: Option<f64>,
}

impl GeographicalLocation {
    /// Create a location from a west-positive longitude and a latitude in degrees
    pub fn new(longitude_west: f64, latitude: f64) -> Self {
        GeographicalLocation {
            name: None,
            longitude: longitude_west,
            latitude,
            elevation: None,
        }
    }

    /// Create a location from the usual east-positive longitude
    pub fn from_east_longitude(longitude_east: f64, latitude: f64) -> Self {
        Self::new(-longitude_east, latitude)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_elevation(mut self, elevation: Length) -> Self {
        self.elevation = Some(elevation.get::<meter>());
        self
    }

    pub fn longitude_angle(&self) -> Angle {
        Angle::from_degrees(self.longitude)
    }

    pub fn latitude_angle(&self) -> Angle {
        Angle::from_degrees(self.latitude)
    }

    pub fn elevation_length(&self) -> Option<Length> {
        self.elevation.map(Length::new::<meter>)
    }

    /// Local sidereal time at this location
    pub fn sidereal_time(&self, time: &Time, position_type: PositionType) -> Result<SiderealTime> {
        SiderealTime::new(time, self, position_type)
    }
}

impl fmt::Display for GeographicalLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{} ", name)?;
        }
        let (lon, side) = if self.longitude >= 0.0 {
            (self.longitude, "W")
        } else {
            (-self.longitude, "E")
        };
        write!(
            f,
            "({}{} {})",
            format_degrees(lon, false),
            side,
            format_degrees(self.latitude, true)
        )
    }
}
