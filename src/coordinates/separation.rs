//! Angular separation and position angle between two points
//!
//! Both operations first bring the other point into the frame of `self`, so
//! points given in different systems can be compared directly.

use super::angle::{normalize_degrees, Angle};
use super::Coordinates;
use crate::Result;

impl Coordinates {
    /// Great-circle distance to `other`
    ///
    /// Uses the haversine form, which stays accurate for tiny separations.
    pub fn angular_separation(&self, other: &Coordinates) -> Result<Angle> {
        let other = other.convert(self.system(), self.position_type())?;
        let (lon1, lat1) = (self.longitude().radians(), self.latitude().radians());
        let (lon2, lat2) = (other.longitude().radians(), other.latitude().radians());

        let half_dlat = ((lat2 - lat1) / 2.0).sin();
        let half_dlon = ((lon2 - lon1) / 2.0).sin();
        let hav = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
        Ok(Angle::from_radians(2.0 * hav.sqrt().min(1.0).asin()))
    }

    /// Position angle of `other` seen from `self`, north through east in [0°, 360°)
    pub fn relative_position_angle(&self, other: &Coordinates) -> Result<Angle> {
        let other = other.convert(self.system(), self.position_type())?;
        let (lon1, lat1) = (self.longitude().radians(), self.latitude().radians());
        let (lon2, lat2) = (other.longitude().radians(), other.latitude().radians());

        let dlon = lon2 - lon1;
        let pa = dlon
            .sin()
            .atan2(lat1.cos() * lat2.tan() - lat1.sin() * dlon.cos());
        Ok(Angle::from_degrees(normalize_degrees(pa.to_degrees())))
    }
}
