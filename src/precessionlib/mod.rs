//! Precession between equinoxes
//!
//! Implements the rigorous method with the low-precision ζ, z, θ series of
//! Meeus, *Astronomical Algorithms* ch. 21. `T` is the time from J2000 to the
//! starting equinox and `t` the time from the starting to the final equinox,
//! both in Julian centuries.

use crate::constants::ASEC2RAD;
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::system::{CoordinateSystem, SystemType};
use crate::coordinates::Coordinates;
use crate::framelib::{rotation_y, rotation_z};
use crate::time::Time;
use crate::{Result, StarframeError};
use nalgebra::Matrix3;

/// Precession angles in arcseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecessionAngles {
    pub zeta: f64,
    pub z: f64,
    pub theta: f64,
}

/// Compute ζ, z and θ for precession from equinox `from` to equinox `to`
pub fn precession_angles(from: &Time, to: &Time) -> PrecessionAngles {
    let big_t = from.julian_centuries_since_j2000();
    let t = (to.jd() - from.jd()) / crate::constants::DAYS_PER_JULIAN_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let linear = (2306.2181 + 1.396_56 * big_t - 0.000_139 * big_t * big_t) * t;
    let zeta = linear + (0.301_88 - 0.000_344 * big_t) * t2 + 0.017_998 * t3;
    let z = linear + (1.094_68 + 0.000_066 * big_t) * t2 + 0.018_203 * t3;
    let theta = (2004.3109 - 0.853_30 * big_t - 0.000_217 * big_t * big_t) * t
        - (0.426_65 + 0.000_217 * big_t) * t2
        - 0.041_833 * t3;

    PrecessionAngles { zeta, z, theta }
}

/// Precess a right ascension and declination (degrees) between two equinoxes
///
/// Returns `(ra, dec)` in degrees with the right ascension in [0, 360).
pub fn precess_radec(ra: f64, dec: f64, from: &Time, to: &Time) -> (f64, f64) {
    let angles = precession_angles(from, to);
    let zeta = angles.zeta * ASEC2RAD;
    let z = angles.z * ASEC2RAD;
    let theta = angles.theta * ASEC2RAD;

    let (sin_dec, cos_dec) = dec.to_radians().sin_cos();
    let (sin_ra, cos_ra) = (ra.to_radians() + zeta).sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    let a = cos_dec * sin_ra;
    let b = cos_theta * cos_dec * cos_ra - sin_theta * sin_dec;
    let c = sin_theta * cos_dec * cos_ra + cos_theta * sin_dec;

    let new_ra = (a.atan2(b) + z).to_degrees().rem_euclid(360.0);
    let new_dec = c.clamp(-1.0, 1.0).asin().to_degrees();
    (new_ra, new_dec)
}

/// Precess a rectangular equatorial vector, keeping its length
pub fn precess_vector(v: &Cartesian3, from: &Time, to: &Time) -> Cartesian3 {
    let (lon, lat, distance) = v.to_spherical();
    if distance == 0.0 || from == to {
        return *v;
    }
    let (ra, dec) = precess_radec(lon.to_degrees(), lat.to_degrees(), from, to);
    Cartesian3::from_spherical(ra.to_radians(), dec.to_radians(), distance)
}

/// The same precession as a rotation matrix, `R3(-z) · R2(θ) · R3(-ζ)`
pub fn precession_matrix(from: &Time, to: &Time) -> Matrix3<f64> {
    let angles = precession_angles(from, to);
    rotation_z(-angles.z * ASEC2RAD)
        * rotation_y(angles.theta * ASEC2RAD)
        * rotation_z(-angles.zeta * ASEC2RAD)
}

/// Precess equatorial (or ICRS) coordinates to a new equinox
///
/// ICRS input is treated as equinox J2000. Any other frame is rejected with
/// `IncorrectCoordinateSystem`; convert to an equatorial frame first.
pub fn precess(coordinates: &Coordinates, to_equinox: &Time) -> Result<Coordinates> {
    let system = coordinates.system();
    let from_equinox = match system.system_type {
        SystemType::Icrs => Time::J2000,
        SystemType::Equatorial => system.equinox.ok_or(StarframeError::EquinoxNotDefined)?,
        other => {
            return Err(StarframeError::IncorrectCoordinateSystem(format!(
                "precession needs an equatorial frame, got {}",
                other
            )))
        }
    };

    let position = precess_vector(&coordinates.position(), &from_equinox, to_equinox);
    let mut target = CoordinateSystem::equatorial(*to_equinox, system.origin.clone());
    target.epoch = system.epoch;
    Ok(Coordinates::from_parts(
        position,
        target,
        coordinates.position_type(),
        coordinates.distance_is_known(),
    ))
}
