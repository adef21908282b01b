//! Constellation names and identification from a position
//!
//! Two tables are read from the data directory:
//!
//! - `constellations.json` holds the names, genitives, abbreviations and
//!   origins of the constellations, in alphabetical order.
//! - `constellations.dat` holds the boundary arcs of Roman (1987),
//!   *Identification of a Constellation from a Position* (CDS VI/42).
//!
//! Every boundary is an arc of constant declination in the geocentric
//! equatorial frame of B1875.0. Arcs are sorted by decreasing declination,
//! so the first arc with `ra_min <= ra < ra_max` and `dec >= dec_min` names
//! the constellation holding the point.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::coordinates::{CoordinateSystem, Coordinates, Origin, PositionType};
use crate::data::{find_data_file, read_text_file};
use crate::time::Time;
use crate::vsop87::Vsop87;
use crate::{Result, StarframeError};

/// Name table file
pub const NAMES_FILE: &str = "constellations.json";

/// Boundary table file
pub const BOUNDARIES_FILE: &str = "constellations.dat";

/// One constellation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    /// Latin name
    pub name: String,
    pub genitive: String,
    /// Abbreviations keyed by scheme (`IAU`, `NASA`, ...)
    pub abbreviations: BTreeMap<String, String>,
    pub origin: ConstellationOrigin,
}

impl Constellation {
    /// The three-letter IAU abbreviation, `None` for non-IAU constellations
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviations.get("IAU").map(String::as_str)
    }

    /// Abbreviations match exactly; names and genitives ignore case
    fn matches(&self, key: &str) -> bool {
        self.abbreviations.values().any(|a| a == key)
            || self.name.eq_ignore_ascii_case(key)
            || self.genitive.eq_ignore_ascii_case(key)
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation().unwrap_or(&self.name))
    }
}

/// Where a constellation comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationOrigin {
    pub ancient: bool,
    #[serde(default)]
    pub year: Option<i32>,
    /// Person or publication that first mentions it
    pub source: String,
    #[serde(default)]
    pub precursor: Option<Precursor>,
}

/// The constellation a modern one was carved from or named after
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precursor {
    pub name: String,
    #[serde(rename = "partOf")]
    pub part_of: bool,
}

#[derive(Deserialize)]
struct NamesFile {
    #[serde(default)]
    version: String,
    #[serde(default)]
    source: String,
    constellations: Vec<Constellation>,
}

/// One arc of constant declination, angles in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub abbreviation: String,
}

impl Boundary {
    /// Parse one table line: lower and upper right ascension in hours,
    /// lower declination in degrees, IAU abbreviation
    ///
    /// Right ascensions are tabulated to four decimals of an hour but are
    /// whole minutes of time; they are rounded back to the minute.
    pub fn parse(line_no: usize, line: &str) -> Result<Boundary> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(StarframeError::DataError(format!(
                "{} line {}: expected 4 fields, found {}",
                BOUNDARIES_FILE,
                line_no,
                fields.len()
            )));
        }
        let number = |field: &str, what: &str| {
            field.parse::<f64>().map_err(|_| {
                StarframeError::DataError(format!(
                    "{} line {}: bad {} {:?}",
                    BOUNDARIES_FILE, line_no, what, field
                ))
            })
        };
        let minutes = |hours: f64| (hours * 60.0).round() * 0.25;

        Ok(Boundary {
            ra_min: minutes(number(fields[0], "lower right ascension")?),
            ra_max: minutes(number(fields[1], "upper right ascension")?),
            dec_min: number(fields[2], "declination")?,
            abbreviation: fields[3].to_string(),
        })
    }

    pub fn contains(&self, ra: f64, dec: f64) -> bool {
        ra >= self.ra_min && ra < self.ra_max && dec >= self.dec_min
    }
}

/// The constellation tables
#[derive(Debug, Clone, Default)]
pub struct Constellations {
    version: String,
    source: String,
    constellations: Vec<Constellation>,
    boundaries: Vec<Boundary>,
}

impl Constellations {
    /// The frame the boundaries are drawn in: geocentric equatorial B1875.0
    pub fn catalogue_system() -> CoordinateSystem {
        CoordinateSystem::equatorial(Time::besselian_year(1875.0), Origin::Geocentric)
    }

    /// Build the tables from the text of the name and boundary files
    pub fn parse(names_json: &str, boundaries: &str) -> Result<Self> {
        let names: NamesFile = serde_json::from_str(names_json)
            .map_err(|e| StarframeError::DataError(format!("{}: {}", NAMES_FILE, e)))?;
        let boundaries = boundaries
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| Boundary::parse(index + 1, line))
            .collect::<Result<Vec<_>>>()?;

        let tables = Constellations {
            version: names.version,
            source: names.source,
            constellations: names.constellations,
            boundaries,
        };
        for boundary in &tables.boundaries {
            if tables.find(&boundary.abbreviation).is_none() {
                warn!("Boundary arc of unknown constellation {}", boundary.abbreviation);
            }
        }
        Ok(tables)
    }

    /// Read both tables from `dir`; either file may be gzip-compressed
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = find_data_file(dir, name).ok_or_else(|| {
                StarframeError::DataError(format!("{} not found in {}", name, dir.display()))
            })?;
            Ok::<_, StarframeError>(read_text_file(path)?)
        };
        let tables = Self::parse(&read(NAMES_FILE)?, &read(BOUNDARIES_FILE)?)?;
        debug!(
            "Constellations from {}: {} names, {} boundary arcs",
            dir.display(),
            tables.len(),
            tables.boundaries.len()
        );
        Ok(tables)
    }

    /// Version string of the name table
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Source of the name table
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constellations.is_empty()
    }

    /// The constellation at `index` in alphabetical order
    pub fn get(&self, index: usize) -> Option<&Constellation> {
        self.constellations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constellation> {
        self.constellations.iter()
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Look a constellation up by abbreviation, name or genitive
    pub fn find(&self, key: &str) -> Option<&Constellation> {
        self.constellations.iter().find(|c| c.matches(key))
    }

    /// The constellation holding a position
    ///
    /// Origin shifts of points at a known distance use the built-in series.
    pub fn containing(&self, coordinates: &Coordinates) -> Result<Option<&Constellation>> {
        self.containing_with(coordinates, Vsop87::builtin())
    }

    /// Like [`Constellations::containing`], with an explicit set of VSOP87 series
    pub fn containing_with(
        &self,
        coordinates: &Coordinates,
        ephemeris: &Vsop87,
    ) -> Result<Option<&Constellation>> {
        let catalogue = coordinates.convert_with(&Self::catalogue_system(), PositionType::True, ephemeris)?;
        let ra = catalogue.longitude().degrees();
        let dec = catalogue.latitude().degrees();
        Ok(self
            .boundaries
            .iter()
            .find(|boundary| boundary.contains(ra, dec))
            .and_then(|boundary| self.find(&boundary.abbreviation)))
    }

    /// Whether `constellation` holds the position
    pub fn contains(&self, constellation: &Constellation, coordinates: &Coordinates) -> Result<bool> {
        Ok(self
            .containing(coordinates)?
            .map_or(false, |found| found.name == constellation.name))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// A name table in the published layout
    pub const NAMES: &str = r#"{
        "version": "1.0",
        "source": "https://www.iau.org/public/themes/constellations/",
        "constellations": [
            {"name": "Andromeda", "genitive": "Andromedae",
             "abbreviations": {"IAU": "And", "NASA": "Andr"},
             "origin": {"ancient": true, "source": "Ptolemy"}},
            {"name": "Canis Minor", "genitive": "Canis Minoris",
             "abbreviations": {"IAU": "CMi", "NASA": "CMin"},
             "origin": {"ancient": true, "source": "Ptolemy"}},
            {"name": "Cepheus", "genitive": "Cephei",
             "abbreviations": {"IAU": "Cep", "NASA": "Ceph"},
             "origin": {"ancient": true, "source": "Ptolemy"}},
            {"name": "Octans", "genitive": "Octantis",
             "abbreviations": {"IAU": "Oct", "NASA": "Octn"},
             "origin": {"ancient": false, "year": 1752, "source": "Lacaille"}},
            {"name": "Ursa Minor", "genitive": "Ursae Minoris",
             "abbreviations": {"IAU": "UMi", "NASA": "UMin"},
             "origin": {"ancient": true, "source": "Ptolemy"}},
            {"name": "Quadrans Muralis", "genitive": "Quadrantis Muralis",
             "abbreviations": {},
             "origin": {"ancient": false, "year": 1795, "source": "Lalande",
                        "precursor": {"name": "Bootes", "partOf": true}}}
        ]
    }"#;

    /// Polar arcs in the Roman layout, closed by the all-sky Octans arc
    pub const BOUNDARIES: &str = "\
 0.0000 24.0000  88.0000 UMi
 8.0000 14.5000  86.5000 UMi
21.0000 23.0000  86.1667 UMi
18.0000 21.0000  86.0000 UMi
 0.0000  8.0000  85.0000 Cep

 0.0000 24.0000 -90.0000 Oct
";
}
