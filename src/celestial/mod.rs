//! Regions of the sky
//!
//! Areas are used to select catalogue objects. The only shape so far is the
//! equirectangular box bounded by two right ascensions and two declinations
//! in the mean equatorial J2000 frame. A box whose south-west corner lies at
//! a larger right ascension than its north-east corner wraps through 0h.

use crate::coordinates::angle::Angle;
use crate::coordinates::{CoordinateSystem, Coordinates, PositionType};
use crate::Result;

/// A region of the sky
#[derive(Debug, Clone, PartialEq)]
pub enum CelestialArea {
    Equirectangular(EquirectangularArea),
}

impl CelestialArea {
    /// The frame the area boundaries are expressed in
    pub fn coordinate_system(&self) -> CoordinateSystem {
        match self {
            CelestialArea::Equirectangular(_) => EquirectangularArea::coordinate_system(),
        }
    }

    /// The smallest equirectangular box holding the area
    pub fn bounding_box(&self) -> &EquirectangularArea {
        match self {
            CelestialArea::Equirectangular(area) => area,
        }
    }

    pub fn contains(&self, coordinates: &Coordinates) -> Result<bool> {
        match self {
            CelestialArea::Equirectangular(area) => area.contains(coordinates),
        }
    }

    pub fn intersects(&self, other: &CelestialArea) -> bool {
        match self {
            CelestialArea::Equirectangular(area) => area.intersects(other),
        }
    }
}

impl From<EquirectangularArea> for CelestialArea {
    fn from(area: EquirectangularArea) -> Self {
        CelestialArea::Equirectangular(area)
    }
}

/// A right ascension/declination box in mean equatorial J2000
#[derive(Debug, Clone, PartialEq)]
pub struct EquirectangularArea {
    south_west: Coordinates,
    north_east: Coordinates,
}

impl EquirectangularArea {
    /// Create a box from its south-west and north-east corners
    ///
    /// The corners may be given in any frame; they are converted to mean
    /// equatorial J2000 first.
    pub fn new(south_west: &Coordinates, north_east: &Coordinates) -> Result<Self> {
        let frame = Self::coordinate_system();
        Ok(EquirectangularArea {
            south_west: south_west.convert(&frame, PositionType::Mean)?,
            north_east: north_east.convert(&frame, PositionType::Mean)?,
        })
    }

    /// Create a box from corner right ascensions in hours and declinations in degrees
    pub fn from_hours(sw_ra: f64, sw_dec: f64, ne_ra: f64, ne_dec: f64) -> Result<Self> {
        let corner = |ra: f64, dec: f64| {
            Coordinates::from_spherical(
                Angle::from_hours(ra),
                Angle::from_degrees(dec),
                None,
                Self::coordinate_system(),
                PositionType::Mean,
            )
        };
        Self::new(&corner(sw_ra, sw_dec), &corner(ne_ra, ne_dec))
    }

    pub fn coordinate_system() -> CoordinateSystem {
        CoordinateSystem::equatorial_j2000()
    }

    pub fn south_west(&self) -> &Coordinates {
        &self.south_west
    }

    pub fn north_east(&self) -> &Coordinates {
        &self.north_east
    }

    pub fn south_east(&self) -> Coordinates {
        self.corner(&self.north_east, &self.south_west)
    }

    pub fn north_west(&self) -> Coordinates {
        self.corner(&self.south_west, &self.north_east)
    }

    fn corner(&self, longitude_from: &Coordinates, latitude_from: &Coordinates) -> Coordinates {
        Coordinates::from_spherical(
            longitude_from.longitude().angle,
            latitude_from.latitude().angle,
            None,
            Self::coordinate_system(),
            PositionType::Mean,
        )
    }

    /// Whether the box wraps through right ascension 0h
    pub fn crosses_zero_ra(&self) -> bool {
        self.south_west.longitude().degrees() > self.north_east.longitude().degrees()
    }

    /// Whether the point lies inside the box, edges included
    pub fn contains(&self, coordinates: &Coordinates) -> Result<bool> {
        let point = coordinates.convert(&Self::coordinate_system(), PositionType::Mean)?;
        let lat = point.latitude().degrees();
        if lat < self.south_west.latitude().degrees() || lat > self.north_east.latitude().degrees() {
            return Ok(false);
        }

        let lon = point.longitude().degrees();
        let sw = self.south_west.longitude().degrees();
        let ne = self.north_east.longitude().degrees();
        if self.crosses_zero_ra() {
            Ok(lon >= sw || lon <= ne)
        } else {
            Ok(lon >= sw && lon <= ne)
        }
    }

    /// Whether the box overlaps the bounding box of `other`
    ///
    /// Right ascensions are compared in hours. When either box wraps through
    /// 0h the spans are shifted by -24h onto a common interval and tested again.
    pub fn intersects(&self, other: &CelestialArea) -> bool {
        debug_assert_eq!(other.coordinate_system(), Self::coordinate_system());
        let other = other.bounding_box();
        let other_sw_lat = other.south_west.latitude().degrees();
        let other_ne_lat = other.north_east.latitude().degrees();
        if !(other_sw_lat < self.north_east.latitude().degrees()
            && other_ne_lat > self.south_west.latitude().degrees())
        {
            return false;
        }

        let mut self_ne = self.north_east.longitude().hours();
        let mut self_sw = self.south_west.longitude().hours();
        let mut other_ne = other.north_east.longitude().hours();
        let mut other_sw = other.south_west.longitude().hours();

        if other_sw < self_ne && other_ne > self_sw {
            return true;
        }
        if !self.crosses_zero_ra() && !other.crosses_zero_ra() {
            return false;
        }

        if self.crosses_zero_ra() {
            self_sw -= 24.0;
        }
        if other.crosses_zero_ra() {
            other_sw -= 24.0;
        }
        if other_sw > 12.0 {
            other_sw -= 24.0;
        }
        if self_sw > 12.0 || self_ne > 12.0 {
            self_sw -= 24.0;
            self_ne -= 24.0;
        }
        if other_sw > 12.0 || other_ne > 12.0 {
            other_sw -= 24.0;
            other_ne -= 24.0;
        }
        other_sw < self_ne && other_ne > self_sw
    }
}
