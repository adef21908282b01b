//! Planetary positions from VSOP87
//!
//! A [`Planet`] evaluates the best loaded series for its body and hands the
//! result to the conversion engine, so any frame and origin can be asked for.
//! Only the Earth (and Sun) series are built in; other planets need series
//! loaded with [`crate::Loader`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::coordinates::{CoordinateSystem, Coordinates, Origin, PositionType};
use crate::time::Time;
use crate::toposlib::GeographicalLocation;
use crate::vsop87::{Body, Vsop87, Vsop87Error};
use crate::{Result, StarframeError};

/// The eight major planets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// The VSOP87 body for this planet
    pub fn body(&self) -> Body {
        match self {
            Planet::Mercury => Body::Mercury,
            Planet::Venus => Body::Venus,
            Planet::Earth => Body::Earth,
            Planet::Mars => Body::Mars,
            Planet::Jupiter => Body::Jupiter,
            Planet::Saturn => Body::Saturn,
            Planet::Uranus => Body::Uranus,
            Planet::Neptune => Body::Neptune,
        }
    }

    pub fn name(&self) -> &'static str {
        self.body().name()
    }

    /// Position at `time` in `target` as `position_type` coordinates
    ///
    /// A target without epoch gets `time` as its epoch, which is also the
    /// instant used for any origin shift.
    pub fn position(
        &self,
        ephemeris: &Vsop87,
        time: &Time,
        target: &CoordinateSystem,
        position_type: PositionType,
    ) -> Result<Coordinates> {
        let target = match target.epoch {
            Some(_) => target.clone(),
            None => target.with_epoch(*time),
        };
        ephemeris
            .position(self.body(), time)?
            .convert_with(&target, position_type, ephemeris)
    }

    /// Mean equatorial coordinates referred to the equinox of date
    pub fn equatorial_coordinates(&self, ephemeris: &Vsop87, time: &Time, origin: Origin) -> Result<Coordinates> {
        let target = CoordinateSystem::equatorial(*time, origin);
        self.position(ephemeris, time, &target, PositionType::Mean)
    }

    /// Mean ecliptical coordinates referred to the ecliptic and equinox of date
    pub fn ecliptical_coordinates(&self, ephemeris: &Vsop87, time: &Time, origin: Origin) -> Result<Coordinates> {
        let target = CoordinateSystem::ecliptical(Some(*time), Some(*time), origin);
        self.position(ephemeris, time, &target, PositionType::Mean)
    }

    pub fn galactic_coordinates(&self, ephemeris: &Vsop87, time: &Time, origin: Origin) -> Result<Coordinates> {
        let target = CoordinateSystem::galactic().with_origin(origin);
        self.position(ephemeris, time, &target, PositionType::Mean)
    }

    /// Azimuth and altitude seen from `location`
    ///
    /// The geocentric direction is used; diurnal parallax is not applied and
    /// the result carries no distance. The direction is taken as a mean J2000
    /// position and `position_type` is applied in the final step onto the
    /// horizon, so true and apparent results include nutation and use the
    /// apparent sidereal time.
    pub fn horizontal_coordinates(
        &self,
        ephemeris: &Vsop87,
        time: &Time,
        location: &GeographicalLocation,
        position_type: PositionType,
    ) -> Result<Coordinates> {
        if *self == Planet::Earth {
            return Err(StarframeError::IncorrectCoordinateSystem(
                "the Earth has no direction from a site on the Earth".to_string(),
            ));
        }
        let geocentric = CoordinateSystem::equatorial(Time::J2000, Origin::Geocentric);
        let direction = self
            .position(ephemeris, time, &geocentric, PositionType::Mean)?
            .without_distance()?;
        let horizon = CoordinateSystem::horizontal(*time, location.clone());
        direction.convert_with(&horizon, position_type, ephemeris)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = Vsop87Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let body: Body = s.parse()?;
        Planet::ALL
            .iter()
            .copied()
            .find(|planet| planet.body() == body)
            .ok_or_else(|| Vsop87Error::UnknownBody(s.to_string()))
    }
}
