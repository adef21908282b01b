//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in meters (per IAU 2012 Resolution B2)
pub const AU_M: f64 = 149_597_870_700.0;
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// B1900.0 epoch as Julian date
pub const B1900: f64 = 2_415_020.313_52;
/// B1950.0 epoch as Julian date
pub const B1950: f64 = 2_433_282.423_5;
/// Unix epoch (1970-01-01T00:00:00) as Julian date
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
/// Days in a tropical (Besselian) year
pub const DAYS_PER_BESSELIAN_YEAR: f64 = 365.242_198_781;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Days in a Julian millennium
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;

// Angles
/// Arcseconds in a complete circle
pub const ASEC360: f64 = 1_296_000.0;
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Degrees of rotation per hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;
