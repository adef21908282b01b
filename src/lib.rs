//! Starframe: celestial coordinate systems and conversions between them
//!
//! This crate converts positions between the ICRS, equatorial, ecliptical,
//! galactic and horizontal frames, for any equinox and from any of the
//! barycentric, heliocentric, geocentric or topocentric origins. Origin
//! shifts use the VSOP87 planetary theory. Positions can also be placed in
//! their constellation.

use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod celestial;
pub mod constants;
pub mod constellationlib;
pub mod coordinates;
pub mod data;
pub mod earthlib;
pub mod framelib;
pub mod nutationlib;
pub mod planetlib;
pub mod precessionlib;
pub mod time;
pub mod toposlib;
pub mod units;
pub mod vsop87;

// Re-export commonly used types
pub use celestial::{CelestialArea, EquirectangularArea};
pub use constellationlib::{Constellation, Constellations};
pub use coordinates::{CoordinateSystem, Coordinates, Origin, PositionType, SystemType};
pub use planetlib::Planet;
pub use time::Time;
pub use toposlib::GeographicalLocation;
pub use vsop87::Vsop87;

/// Main error type for the starframe library
#[derive(Debug, Error)]
pub enum StarframeError {
    #[error("Equinox not defined for this coordinate system")]
    EquinoxNotDefined,

    #[error("Epoch not defined for this coordinate system")]
    EpochNotDefined,

    #[error("Geographic location not defined for this coordinate system")]
    GeographicLocationNotDefined,

    #[error("Incorrect coordinate system: {0}")]
    IncorrectCoordinateSystem(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] vsop87::Vsop87Error),

    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Result type for starframe operations
pub type Result<T> = std::result::Result<T, StarframeError>;

/// Entry point for loading VSOP87 and constellation data
pub struct Loader {
    data_dir: Option<PathBuf>,
}

impl Loader {
    /// Create a new loader with default data directory
    pub fn new() -> Self {
        Self { data_dir: None }
    }

    /// Set a custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// The directory series files are read from
    pub fn data_dir(&self) -> PathBuf {
        data::resolve_data_dir(self.data_dir.as_deref())
    }

    /// Load every series file in the data directory over the built-in series
    ///
    /// A missing default directory is not an error, only the built-in series
    /// is returned then. A missing explicit directory is an error.
    pub fn load_vsop87(&self) -> Result<Vsop87> {
        let dir = self.data_dir();
        if !dir.is_dir() {
            if self.data_dir.is_some() {
                return Err(StarframeError::DataError(format!(
                    "VSOP87 data directory {} does not exist",
                    dir.display()
                )));
            }
            debug!(
                "No VSOP87 data directory at {}, using the built-in series",
                dir.display()
            );
            return Ok(Vsop87::with_builtin());
        }
        Ok(Vsop87::load_dir(&dir)?)
    }

    /// The directory constellation tables are read from
    pub fn constellation_dir(&self) -> PathBuf {
        data::resolve_constellation_dir(self.data_dir.as_deref())
    }

    /// Load the constellation names and boundaries
    ///
    /// There are no built-in tables, so a missing directory is an error.
    pub fn load_constellations(&self) -> Result<Constellations> {
        let dir = self.constellation_dir();
        if !dir.is_dir() {
            return Err(StarframeError::DataError(format!(
                "constellation data directory {} does not exist",
                dir.display()
            )));
        }
        Constellations::load_dir(&dir)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
