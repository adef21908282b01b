//! Typed distances built on the `uom` crate
//!
//! Rectangular coordinates are carried as `uom` lengths so that callers never
//! have to guess whether a number is in meters or astronomical units. The
//! built-in `uom` astronomical unit is slightly off the IAU 2012 value, so the
//! AU helpers here go through [`AU_M`](crate::constants::AU_M) explicitly.

pub use uom::si::f64::Length;
pub use uom::si::length::astronomical_unit;
pub use uom::si::length::kilometer;
pub use uom::si::length::meter;

use crate::constants::AU_M;

/// Convert AU to meters using the IAU 2012 exact value
pub fn au_to_m(au: f64) -> f64 {
    au * AU_M
}

/// Convert meters to AU using the IAU 2012 exact value
pub fn m_to_au(m: f64) -> f64 {
    m / AU_M
}

/// Build a length from a value in AU
pub fn length_from_au(au: f64) -> Length {
    Length::new::<meter>(au_to_m(au))
}

/// Express a length in AU
pub fn length_to_au(length: Length) -> f64 {
    m_to_au(length.get::<meter>())
}
