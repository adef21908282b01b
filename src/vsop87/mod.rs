//! VSOP87 planetary theory
//!
//! [`Vsop87`] is an immutable collection of [`Series`], at most one per
//! (body, version). A truncated VSOP87D Earth series and a truncated VSOP87E
//! Sun series are compiled into the crate, so shifts between the barycentric,
//! heliocentric and geocentric origins work without any data files. Full
//! series for any version can be loaded from a directory and replace them.
//!
//! Series are evaluated with `T` in Julian millennia since J2000. Precision
//! degrades slowly away from J2000 and no range check is made.

pub mod errors;
pub mod names;
pub mod series;

use log::{debug, error, warn};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::constants::AU_M;
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::conversion::frame_to_equatorial_j2000;
use crate::coordinates::{CoordinateSystem, Coordinates, Origin, PositionType};
use crate::data::{list_series_files, read_series_file};
use crate::time::Time;

pub use errors::Vsop87Error;
pub use names::{Body, Version};
pub use series::{Series, Term};

/// Text of the truncated VSOP87D Earth series shipped with the crate
const BUILTIN_EARTH: &str = include_str!("data/VSOP87D.ear");

/// Barycentric Sun: the four giant planets to first order in eccentricity
const BUILTIN_SUN: &str = include_str!("data/VSOP87E.sun");

static BUILTIN: Lazy<Vsop87> = Lazy::new(Vsop87::with_builtin);

/// Version preference when a body is available in more than one version
const PREFERENCE: [Version; 5] = [Version::A, Version::B, Version::C, Version::D, Version::E];

/// A set of loaded VSOP87 series
#[derive(Debug, Clone, Default)]
pub struct Vsop87 {
    series: BTreeMap<(Body, Version), Series>,
    /// Keys still holding a compiled-in series
    builtin: BTreeSet<(Body, Version)>,
}

impl Vsop87 {
    /// An empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared collection holding only the built-in Earth and Sun series
    pub fn builtin() -> &'static Vsop87 {
        &BUILTIN
    }

    /// A new collection holding the built-in Earth and Sun series
    pub fn with_builtin() -> Self {
        let mut vsop = Self::new();
        for (name, text) in [("VSOP87D Earth", BUILTIN_EARTH), ("VSOP87E Sun", BUILTIN_SUN)] {
            match Series::parse(text) {
                Ok(series) => {
                    let key = (series.body(), series.version());
                    vsop.insert(series);
                    vsop.builtin.insert(key);
                }
                Err(e) => error!("Built-in {} series is unreadable: {}", name, e),
            }
        }
        vsop
    }

    /// Load every recognised series file in `dir` on top of the built-in series
    ///
    /// Files that fail to parse are logged and skipped; an unreadable
    /// directory is an error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> errors::Result<Self> {
        let mut vsop = Self::with_builtin();
        for path in list_series_files(dir.as_ref())? {
            match read_series_file(&path) {
                Ok(series) => {
                    vsop.insert(series);
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        debug!(
            "VSOP87 data from {}: {} series",
            dir.as_ref().display(),
            vsop.series.len()
        );
        Ok(vsop)
    }

    /// Add a series, replacing any series of the same body and version
    pub fn insert(&mut self, series: Series) -> Option<Series> {
        let key = (series.body(), series.version());
        self.builtin.remove(&key);
        self.series.insert(key, series)
    }

    pub fn series(&self, body: Body, version: Version) -> Option<&Series> {
        self.series.get(&(body, version))
    }

    /// Whether the series for `body` and `version` is a compiled-in one
    pub fn is_builtin(&self, body: Body, version: Version) -> bool {
        self.builtin.contains(&(body, version))
    }

    /// Bodies with at least one loaded series
    pub fn bodies(&self) -> Vec<Body> {
        let mut bodies: Vec<Body> = self.series.keys().map(|(body, _)| *body).collect();
        bodies.dedup();
        bodies
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The preferred loaded series for a body (A, B, C, D, then E)
    pub fn best_series(&self, body: Body) -> errors::Result<&Series> {
        PREFERENCE
            .iter()
            .find_map(|version| self.series(body, *version))
            .ok_or(Vsop87Error::SeriesUnavailable(body))
    }

    /// Position of a body at `time` as ecliptical coordinates
    ///
    /// The frame is the ecliptic and equinox of the series (J2000 or date),
    /// the origin is the Sun (the barycentre for version E) and the epoch is
    /// `time`. The Sun itself is placed at the heliocentric origin when the
    /// collection holds no version E Sun series.
    pub fn position(&self, body: Body, time: &Time) -> crate::Result<Coordinates> {
        match self.best_series(body) {
            Ok(series) => Ok(series_coordinates(series, time)),
            Err(_) if body == Body::Sun => Ok(Coordinates::from_parts(
                Cartesian3::new(0.0, 0.0, 0.0),
                CoordinateSystem::ecliptical_j2000(Origin::Heliocentric).with_epoch(*time),
                PositionType::Mean,
                true,
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Heliocentric position of the Earth in equatorial J2000 components, meters
    ///
    /// A loaded heliocentric series (A to D) is used first, then the
    /// difference of the barycentric Earth and Sun (E), then the built-in
    /// heliocentric series.
    pub fn earth_heliocentric(&self, time: &Time) -> crate::Result<Cartesian3> {
        let heliocentric = |loaded: bool| {
            PREFERENCE[..4]
                .iter()
                .filter(|version| self.is_builtin(Body::Earth, **version) != loaded)
                .find_map(|version| self.series(Body::Earth, *version))
        };
        if let Some(series) = heliocentric(true) {
            return frame_to_equatorial_j2000(&series_coordinates(series, time));
        }
        if let Some(earth) = self.series(Body::Earth, Version::E) {
            let earth = frame_to_equatorial_j2000(&series_coordinates(earth, time))?;
            return Ok(earth - self.sun_barycentric(time)?);
        }
        let series = heliocentric(false).ok_or(Vsop87Error::SeriesUnavailable(Body::Earth))?;
        frame_to_equatorial_j2000(&series_coordinates(series, time))
    }

    /// Barycentric position of the Sun in equatorial J2000 components, meters
    pub fn sun_barycentric(&self, time: &Time) -> crate::Result<Cartesian3> {
        let series = self
            .series(Body::Sun, Version::E)
            .ok_or(Vsop87Error::SeriesUnavailable(Body::Sun))?;
        frame_to_equatorial_j2000(&series_coordinates(series, time))
    }
}

/// The coordinate system a series' output is expressed in at `time`
pub fn series_system(version: Version, time: &Time) -> CoordinateSystem {
    let date = if version.is_of_date() {
        *time
    } else {
        Time::J2000
    };
    let origin = if version.is_barycentric() {
        Origin::Barycentric
    } else {
        Origin::Heliocentric
    };
    CoordinateSystem::ecliptical(Some(date), Some(date), origin).with_epoch(*time)
}

/// Evaluate a series as ecliptical coordinates with known distance
pub fn series_coordinates(series: &Series, time: &Time) -> Coordinates {
    Coordinates::from_parts(
        series.rectangular(time) * AU_M,
        series_system(series.version(), time),
        PositionType::Mean,
        true,
    )
}
