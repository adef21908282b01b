//! Time module for astronomical time calculations
//!
//! Instants are kept as Terrestrial Time Julian dates. The coordinate engine
//! only ever needs "days since J2000" in one form or another (centuries for
//! nutation and precession, millennia for VSOP87), so `Time` is a thin,
//! copyable wrapper around a single `f64` with the standard epochs and the
//! calendar glue to `chrono`.
//!
//! UTC and TT are not distinguished when converting from calendar dates; the
//! ~69 s offset is well below the precision of the series used here.

use crate::constants::{
    B1900, B1950, DAYS_PER_BESSELIAN_YEAR, DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_MILLENNIUM,
    DAYS_PER_JULIAN_YEAR, DAY_S, J2000, UNIX_EPOCH_JD,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),

    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Calendar error: {0}")]
    CalendarError(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// An instant on the Terrestrial Time scale, stored as a Julian date
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Time {
    jd: f64,
}

impl Time {
    /// The J2000.0 standard epoch, 2000 January 1 12:00 TT
    pub const J2000: Time = Time { jd: J2000 };

    /// The B1900.0 Besselian epoch
    pub const B1900: Time = Time { jd: B1900 };

    /// The B1950.0 Besselian epoch, 1949 December 31 22:09 TT
    pub const B1950: Time = Time { jd: B1950 };

    /// The J2050.0 standard epoch, 2050 January 1 12:00 TT
    pub const J2050: Time = Time {
        jd: J2000 + 50.0 * DAYS_PER_JULIAN_YEAR,
    };

    /// Create a time from a TT Julian date
    pub fn from_jd(jd: f64) -> Self {
        Time { jd }
    }

    /// Create a time from Julian centuries since J2000
    pub fn from_julian_centuries(centuries: f64) -> Self {
        Time {
            jd: J2000 + centuries * DAYS_PER_JULIAN_CENTURY,
        }
    }

    /// The Julian epoch for a (possibly fractional) year, e.g. `julian_year(2000.0)` is J2000.0
    pub fn julian_year(year: f64) -> Self {
        Time {
            jd: J2000 + (year - 2000.0) * DAYS_PER_JULIAN_YEAR,
        }
    }

    /// The Besselian epoch for a (possibly fractional) year, e.g. `besselian_year(1950.0)`
    pub fn besselian_year(year: f64) -> Self {
        Time {
            jd: B1900 + (year - 1900.0) * DAYS_PER_BESSELIAN_YEAR,
        }
    }

    /// Create a time from a UTC datetime
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        Time {
            jd: UNIX_EPOCH_JD + seconds / DAY_S,
        }
    }

    /// Get the current time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Get the TT Julian date
    pub fn jd(&self) -> f64 {
        self.jd
    }

    /// Alias of [`Time::jd`], matching the naming used for other time scales
    pub fn tt(&self) -> f64 {
        self.jd
    }

    /// Get the TT as Julian years (e.g. 2000.0 at J2000)
    pub fn j(&self) -> f64 {
        2000.0 + (self.jd - J2000) / DAYS_PER_JULIAN_YEAR
    }

    /// Get the Besselian year of this instant
    pub fn besselian(&self) -> f64 {
        1900.0 + (self.jd - B1900) / DAYS_PER_BESSELIAN_YEAR
    }

    /// Days elapsed since J2000.0
    pub fn days_since_j2000(&self) -> f64 {
        self.jd - J2000
    }

    /// Julian centuries since J2000.0, the `T` of most IAU series
    pub fn julian_centuries_since_j2000(&self) -> f64 {
        (self.jd - J2000) / DAYS_PER_JULIAN_CENTURY
    }

    /// Julian millennia since J2000.0, the time argument of VSOP87
    pub fn julian_millennia_since_j2000(&self) -> f64 {
        (self.jd - J2000) / DAYS_PER_JULIAN_MILLENNIUM
    }

    /// Get the UTC datetime
    pub fn utc_datetime(&self) -> Result<DateTime<Utc>> {
        let seconds = (self.jd - UNIX_EPOCH_JD) * DAY_S;
        if !seconds.is_finite() {
            return Err(TimeError::OutOfRange(format!("JD {}", self.jd)));
        }
        // Julian dates near the present only resolve to ~40 µs, so round to whole milliseconds
        let millis = (seconds * 1e3).round() as i64;
        DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            TimeError::CalendarError(format!("JD {} has no calendar representation", self.jd))
        })
    }

    /// Format UTC time as ISO 8601 string
    pub fn utc_iso(&self) -> Result<String> {
        Ok(self
            .utc_datetime()?
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string())
    }

    /// Parse a time given either as a bare Julian date, a `J`/`B` epoch
    /// (`"J2000"`, `"B1950.0"`) or an RFC 3339 timestamp
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if let Some(year) = text.strip_prefix('J') {
            let year: f64 = year
                .parse()
                .map_err(|_| TimeError::InvalidFormat(input.to_string()))?;
            return Ok(Self::julian_year(year));
        }
        if let Some(year) = text.strip_prefix('B') {
            let year: f64 = year
                .parse()
                .map_err(|_| TimeError::InvalidFormat(input.to_string()))?;
            return Ok(Self::besselian_year(year));
        }
        if let Ok(jd) = text.parse::<f64>() {
            return Ok(Self::from_jd(jd));
        }
        DateTime::parse_from_rfc3339(text)
            .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| TimeError::InvalidFormat(format!("{}: {}", input, e)))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Time::J2000 {
            write!(f, "J2000.0")
        } else if *self == Time::B1950 {
            write!(f, "B1950.0")
        } else {
            write!(f, "JD {:.5}", self.jd)
        }
    }
}

impl Add<f64> for Time {
    type Output = Time;

    /// Add a number of days
    fn add(self, days: f64) -> Self::Output {
        Time {
            jd: self.jd + days,
        }
    }
}

impl Sub<f64> for Time {
    type Output = Time;

    /// Subtract a number of days
    fn sub(self, days: f64) -> Self::Output {
        Time {
            jd: self.jd - days,
        }
    }
}

impl Sub<Time> for Time {
    type Output = f64;

    /// Difference in days
    fn sub(self, other: Time) -> Self::Output {
        self.jd - other.jd
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time::from_datetime(dt)
    }
}
