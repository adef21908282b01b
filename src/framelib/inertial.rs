use super::{euler_zyz, PoleFrame};
use crate::constants::ASEC2RAD;
use nalgebra::Matrix3;
use once_cell::sync::Lazy;

/// Right ascension of the north galactic pole, degrees (J2000)
pub const GALACTIC_POLE_RA: f64 = 192.859_484_02;
/// Declination of the north galactic pole, degrees (J2000)
pub const GALACTIC_POLE_DEC: f64 = 27.128_296_37;
/// Ascending node angle of the galactic plane, degrees
pub const GALACTIC_NODE: f64 = 249.927_604_599_865_1;

/// Mean obliquity of the ecliptic at J2000.0, arcseconds
pub const OBLIQUITY_J2000_ARCSEC: f64 = 84_381.448;

/// The galactic frame as a pole frame of equatorial J2000
pub fn galactic_frame() -> PoleFrame {
    PoleFrame::from_degrees(
        GALACTIC_POLE_RA,
        GALACTIC_POLE_DEC,
        GALACTIC_NODE - GALACTIC_POLE_RA,
    )
}

/// The ecliptic frame for a given obliquity (radians) as a pole frame of the
/// equatorial frame of the same equinox
pub fn ecliptic_frame(obliquity: f64) -> PoleFrame {
    PoleFrame::new(
        1.5 * std::f64::consts::PI,
        std::f64::consts::FRAC_PI_2 - obliquity,
        std::f64::consts::FRAC_PI_2,
    )
}

/// Matrix from equatorial to ecliptic components for a given obliquity (radians)
pub fn ecliptic_matrix(obliquity: f64) -> Matrix3<f64> {
    ecliptic_frame(obliquity).matrix()
}

pub static EQUATORIAL_TO_GALACTIC: Lazy<Matrix3<f64>> = Lazy::new(|| {
    let frame = galactic_frame();
    euler_zyz(frame.pole_lon, frame.pole_lat, frame.node)
});

// Rotation matrices are orthogonal, so the inverse is the transpose
pub static GALACTIC_TO_EQUATORIAL: Lazy<Matrix3<f64>> =
    Lazy::new(|| EQUATORIAL_TO_GALACTIC.transpose());

pub static EQUATORIAL_TO_ECLIPTIC_J2000: Lazy<Matrix3<f64>> =
    Lazy::new(|| ecliptic_matrix(OBLIQUITY_J2000_ARCSEC * ASEC2RAD));
