//! Reference frame rotations
//!
//! Every fixed or slowly varying frame in the crate (galactic, ecliptic of a
//! date, the local horizon) is described by where its north pole sits in the
//! equatorial frame plus one angle about that pole. [`PoleFrame`] turns those
//! three numbers into the Z-Y-Z passive rotation that carries equatorial
//! rectangular components into the frame, and back.

pub mod inertial;

use crate::coordinates::cartesian::Cartesian3;
use nalgebra::Matrix3;

pub use inertial::{
    ecliptic_matrix, EQUATORIAL_TO_ECLIPTIC_J2000, EQUATORIAL_TO_GALACTIC,
    GALACTIC_TO_EQUATORIAL, GALACTIC_NODE, GALACTIC_POLE_DEC, GALACTIC_POLE_RA,
    OBLIQUITY_J2000_ARCSEC,
};

/// Passive rotation about Z by `angle` radians
pub fn rotation_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Passive rotation about Y by `angle` radians
pub fn rotation_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

/// Passive rotation about X by `angle` radians
pub fn rotation_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

/// Pole-change rotation `Rz(node) · Ry(π/2 − pole_lat) · Rz(pole_lon)`
///
/// `pole_lon`/`pole_lat` locate the new frame's north pole in the parent
/// frame; `node` then turns the new frame about its own pole so that its
/// zero of longitude lands where it should. All angles are in radians.
pub fn euler_zyz(pole_lon: f64, pole_lat: f64, node: f64) -> Matrix3<f64> {
    rotation_z(node) * rotation_y(std::f64::consts::FRAC_PI_2 - pole_lat) * rotation_z(pole_lon)
}

/// A frame defined by its pole position in a parent frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleFrame {
    /// Longitude of the frame pole in the parent frame, radians
    pub pole_lon: f64,
    /// Latitude of the frame pole in the parent frame, radians
    pub pole_lat: f64,
    /// Rotation about the new pole, radians
    pub node: f64,
}

impl PoleFrame {
    pub fn new(pole_lon: f64, pole_lat: f64, node: f64) -> Self {
        PoleFrame {
            pole_lon,
            pole_lat,
            node,
        }
    }

    /// Same as [`PoleFrame::new`] with every angle in degrees
    pub fn from_degrees(pole_lon: f64, pole_lat: f64, node: f64) -> Self {
        Self::new(pole_lon.to_radians(), pole_lat.to_radians(), node.to_radians())
    }

    /// Matrix taking parent-frame components into this frame
    pub fn matrix(&self) -> Matrix3<f64> {
        euler_zyz(self.pole_lon, self.pole_lat, self.node)
    }

    /// Express a parent-frame vector in this frame
    pub fn from_parent(&self, v: &Cartesian3) -> Cartesian3 {
        v.rotated_z(self.pole_lon)
            .rotated_y(std::f64::consts::FRAC_PI_2 - self.pole_lat)
            .rotated_z(self.node)
    }

    /// Express a vector of this frame in the parent frame
    pub fn to_parent(&self, v: &Cartesian3) -> Cartesian3 {
        v.rotated_z(-self.node)
            .rotated_y(self.pole_lat - std::f64::consts::FRAC_PI_2)
            .rotated_z(-self.pole_lon)
    }
}
