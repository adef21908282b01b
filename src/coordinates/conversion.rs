//! Conversion between coordinate systems
//!
//! Every conversion goes through the barycentric equatorial frame of J2000.0:
//! the source frame is rotated into the hub, the origin is shifted if needed,
//! and the result is rotated out into the target frame. Nutation is removed on
//! the way in and applied on the way out for true and apparent positions.
//!
//! Origin shifts use the VSOP87 heliocentric Earth and barycentric Sun. A
//! shift is only a relabel when the distance is unknown.

use log::debug;
use std::f64::consts::PI;

use super::cartesian::Cartesian3;
use super::system::{CoordinateSystem, Origin, PositionType, SystemType};
use super::Coordinates;
use crate::earthlib::sidereal_time;
use crate::framelib::inertial::ecliptic_frame;
use crate::framelib::{PoleFrame, EQUATORIAL_TO_GALACTIC, GALACTIC_TO_EQUATORIAL};
use crate::nutationlib::{mean_obliquity, nutation_matrix, true_obliquity};
use crate::precessionlib::precess_vector;
use crate::time::Time;
use crate::toposlib::GeographicalLocation;
use crate::vsop87::Vsop87;
use crate::{Result, StarframeError};

impl Coordinates {
    /// Express these coordinates in `target` as `position_type` positions
    ///
    /// Origin shifts use the built-in Earth and Sun series.
    pub fn convert(&self, target: &CoordinateSystem, position_type: PositionType) -> Result<Coordinates> {
        self.convert_with(target, position_type, Vsop87::builtin())
    }

    /// Like [`Coordinates::convert`], with an explicit set of VSOP87 series
    pub fn convert_with(
        &self,
        target: &CoordinateSystem,
        position_type: PositionType,
        ephemeris: &Vsop87,
    ) -> Result<Coordinates> {
        if self.system() == target && self.position_type() == position_type {
            return Ok(self.clone());
        }
        debug!(
            "Converting from {} ({}) to {} ({})",
            self.system(),
            self.position_type(),
            target,
            position_type
        );

        let hub = frame_to_equatorial_j2000(self)?;
        let hub = shift_origin(hub, self.distance_is_known(), self.system(), target, ephemeris)?;
        let position = frame_from_equatorial_j2000(&hub, target, position_type)?;
        Ok(Coordinates::from_parts(
            position,
            target.clone(),
            position_type,
            self.distance_is_known(),
        ))
    }
}

/// Rotate coordinates into mean equatorial J2000 components
///
/// Only the frame changes; the origin of the vector is left alone.
pub fn frame_to_equatorial_j2000(coordinates: &Coordinates) -> Result<Cartesian3> {
    let system = coordinates.system();
    let position_type = coordinates.position_type();
    let v = coordinates.position();

    match system.system_type {
        SystemType::Icrs => Ok(v),
        SystemType::Equatorial => {
            let equinox = required_equinox(system)?;
            let mean = remove_nutation(&v, &equinox, position_type)?;
            Ok(precess_vector(&mean, &equinox, &Time::J2000))
        }
        SystemType::Ecliptical => {
            let (ecliptic, equinox) = ecliptic_dates(system)?;
            let obliquity = obliquity(&ecliptic, position_type)?;
            let equatorial = ecliptic_frame(obliquity).to_parent(&v);
            let mean = remove_nutation(&equatorial, &equinox, position_type)?;
            Ok(precess_vector(&mean, &equinox, &Time::J2000))
        }
        SystemType::Galactic => Ok(v.rotated_by(&GALACTIC_TO_EQUATORIAL)),
        SystemType::Horizontal => {
            let (epoch, location) = horizon(system)?;
            let equatorial = horizon_frame(&epoch, location, position_type)?.to_parent(&v);
            let mean = remove_nutation(&equatorial, &epoch, position_type)?;
            Ok(precess_vector(&mean, &epoch, &Time::J2000))
        }
    }
}

/// Rotate mean equatorial J2000 components into `target`
pub fn frame_from_equatorial_j2000(
    v: &Cartesian3,
    target: &CoordinateSystem,
    position_type: PositionType,
) -> Result<Cartesian3> {
    match target.system_type {
        SystemType::Icrs => Ok(*v),
        SystemType::Equatorial => {
            let equinox = required_equinox(target)?;
            let mean = precess_vector(v, &Time::J2000, &equinox);
            apply_nutation(&mean, &equinox, position_type)
        }
        SystemType::Ecliptical => {
            let (ecliptic, equinox) = ecliptic_dates(target)?;
            let mean = precess_vector(v, &Time::J2000, &equinox);
            let equatorial = apply_nutation(&mean, &equinox, position_type)?;
            let obliquity = obliquity(&ecliptic, position_type)?;
            Ok(ecliptic_frame(obliquity).from_parent(&equatorial))
        }
        SystemType::Galactic => Ok(v.rotated_by(&EQUATORIAL_TO_GALACTIC)),
        SystemType::Horizontal => {
            let (epoch, location) = horizon(target)?;
            let mean = precess_vector(v, &Time::J2000, &epoch);
            let equatorial = apply_nutation(&mean, &epoch, position_type)?;
            Ok(horizon_frame(&epoch, location, position_type)?.from_parent(&equatorial))
        }
    }
}

/// Move a hub vector from the source origin to the target origin
fn shift_origin(
    v: Cartesian3,
    distance_known: bool,
    source: &CoordinateSystem,
    target: &CoordinateSystem,
    ephemeris: &Vsop87,
) -> Result<Cartesian3> {
    if source.origin == target.origin || !distance_known {
        return Ok(v);
    }
    if matches!(source.origin, Origin::Topocentric(_)) || matches!(target.origin, Origin::Topocentric(_)) {
        return Err(StarframeError::NotImplemented(format!(
            "origin shift from {} to {} for a point at known distance",
            source.origin, target.origin
        )));
    }

    let epoch = target.epoch.or(source.epoch).unwrap_or_else(Time::now);
    let offset = heliocentric_offset(&source.origin, &epoch, ephemeris)?
        - heliocentric_offset(&target.origin, &epoch, ephemeris)?;
    debug!(
        "Origin shift {} -> {} at {}: {:.3e} m",
        source.origin,
        target.origin,
        epoch,
        offset.magnitude()
    );
    Ok(v + offset)
}

/// Heliocentric position of an origin point in hub components, meters
fn heliocentric_offset(origin: &Origin, epoch: &Time, ephemeris: &Vsop87) -> Result<Cartesian3> {
    match origin {
        Origin::Heliocentric => Ok(Cartesian3::new(0.0, 0.0, 0.0)),
        Origin::Geocentric => ephemeris.earth_heliocentric(epoch),
        Origin::Barycentric => Ok(-ephemeris.sun_barycentric(epoch)?),
        Origin::Topocentric(_) => Err(StarframeError::NotImplemented(
            "heliocentric position of an observing site".to_string(),
        )),
    }
}

fn required_equinox(system: &CoordinateSystem) -> Result<Time> {
    system.equinox.ok_or(StarframeError::EquinoxNotDefined)
}

/// Ecliptic date and equinox of an ecliptical frame; either defaults to the other
fn ecliptic_dates(system: &CoordinateSystem) -> Result<(Time, Time)> {
    let ecliptic = system.ecliptic.or(system.equinox);
    let equinox = system.equinox.or(system.ecliptic);
    match (ecliptic, equinox) {
        (Some(ecliptic), Some(equinox)) => Ok((ecliptic, equinox)),
        _ => Err(StarframeError::EquinoxNotDefined),
    }
}

fn horizon(system: &CoordinateSystem) -> Result<(Time, &GeographicalLocation)> {
    let epoch = system.epoch.ok_or(StarframeError::EpochNotDefined)?;
    let location = system
        .origin
        .location()
        .ok_or(StarframeError::GeographicLocationNotDefined)?;
    Ok((epoch, location))
}

/// Obliquity in radians, true for true and apparent positions
fn obliquity(date: &Time, position_type: PositionType) -> Result<f64> {
    let angle = match position_type {
        PositionType::Mean => mean_obliquity(date)?,
        _ => true_obliquity(date)?,
    };
    Ok(angle.to_radians())
}

/// Horizon frame: x north, y west, z zenith
fn horizon_frame(
    epoch: &Time,
    location: &GeographicalLocation,
    position_type: PositionType,
) -> Result<PoleFrame> {
    let lst = sidereal_time(epoch, location.longitude, position_type)?;
    Ok(PoleFrame::new(lst.to_radians(), location.latitude.to_radians(), PI))
}

fn apply_nutation(v: &Cartesian3, date: &Time, position_type: PositionType) -> Result<Cartesian3> {
    if position_type == PositionType::Mean {
        return Ok(*v);
    }
    Ok(v.rotated_by(&nutation_matrix(date)?))
}

fn remove_nutation(v: &Cartesian3, date: &Time, position_type: PositionType) -> Result<Cartesian3> {
    if position_type == PositionType::Mean {
        return Ok(*v);
    }
    Ok(v.rotated_by(&nutation_matrix(date)?.transpose()))
}
