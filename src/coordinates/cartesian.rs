//! # Cartesian Coordinate Module
//!
//! `Cartesian3` is the intermediate format for every frame change in the crate.
//! Positions are held as plain right-handed rectangular components; which frame
//! they belong to is tracked by the owning [`Coordinates`](super::Coordinates).
//!
//! ## Axis Convention
//!
//! For any frame with a longitude `lon` and latitude `lat`:
//! - **X-axis**: toward `lon = 0°, lat = 0°`
//! - **Y-axis**: toward `lon = 90°, lat = 0°`
//! - **Z-axis**: toward the frame's north pole (`lat = +90°`)
//!
//! ## Rotations
//!
//! The `rotated_*` helpers apply *passive* rotations: the vector stays fixed in
//! space and the axes turn by the given angle, which is what a change of frame
//! needs.
//!
//! ```rust
//! use starframe::coordinates::cartesian::Cartesian3;
//!
//! let x = Cartesian3::new(1.0, 0.0, 0.0);
//! // Turning the axes by +90° about Z leaves the old X axis at longitude -90°
//! let turned = x.rotated_z(std::f64::consts::FRAC_PI_2);
//! assert!((turned.y + 1.0).abs() < 1e-15);
//! ```

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Three-dimensional rectangular position or direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component (toward longitude 0°)
    pub x: f64,
    /// Y-component (toward longitude 90°)
    pub y: f64,
    /// Z-component (toward the frame pole)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian coordinate
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a Cartesian coordinate from spherical components
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude-like angle in radians
    /// * `lat` - Latitude-like angle in radians
    /// * `distance` - Radial distance (use 1.0 for unit vectors)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use starframe::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
    /// assert!(pole.x.abs() < 1e-15);
    /// assert!((pole.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_spherical(lon: f64, lat: f64, distance: f64) -> Self {
        let cos_lat = lat.cos();
        Cartesian3 {
            x: distance * cos_lat * lon.cos(),
            y: distance * cos_lat * lon.sin(),
            z: distance * lat.sin(),
        }
    }

    /// Converts to spherical components `(lon, lat, distance)`
    ///
    /// The longitude is normalized to [0, 2π) and the latitude lies in
    /// [-π/2, π/2]. The zero vector maps to `(0, 0, 0)`.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let lat = self.z.atan2(self.x.hypot(self.y));
        let mut lon = self.y.atan2(self.x);
        if lon < 0.0 {
            lon += 2.0 * PI;
        }
        if lon >= 2.0 * PI {
            lon -= 2.0 * PI;
        }

        (lon, lat, distance)
    }

    /// Euclidean length of the vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Angle between two directions in radians, in [0, π]
    ///
    /// Uses `atan2(|a×b|, a·b)`, which stays accurate for nearly parallel and
    /// nearly opposite vectors.
    pub fn angular_distance(&self, other: &Cartesian3) -> f64 {
        self.cross(other).magnitude().atan2(self.dot(other))
    }

    /// Passive rotation about the X axis by `angle` radians
    pub fn rotated_x(&self, angle: f64) -> Cartesian3 {
        let (s, c) = angle.sin_cos();
        Cartesian3 {
            x: self.x,
            y: c * self.y + s * self.z,
            z: -s * self.y + c * self.z,
        }
    }

    /// Passive rotation about the Y axis by `angle` radians
    pub fn rotated_y(&self, angle: f64) -> Cartesian3 {
        let (s, c) = angle.sin_cos();
        Cartesian3 {
            x: c * self.x - s * self.z,
            y: self.y,
            z: s * self.x + c * self.z,
        }
    }

    /// Passive rotation about the Z axis by `angle` radians
    pub fn rotated_z(&self, angle: f64) -> Cartesian3 {
        let (s, c) = angle.sin_cos();
        Cartesian3 {
            x: c * self.x + s * self.y,
            y: -s * self.x + c * self.y,
            z: self.z,
        }
    }

    /// Apply a 3x3 matrix to this vector
    pub fn rotated_by(&self, matrix: &Matrix3<f64>) -> Cartesian3 {
        Cartesian3::from_vector3(matrix * self.to_vector3())
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}
