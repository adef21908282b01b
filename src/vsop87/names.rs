//! VSOP87 body and version names
//!
//! This module maps between bodies, the three-letter file extensions of the
//! official VSOP87 distribution and the names used in the file headers.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::errors::Vsop87Error;

/// A body covered by at least one VSOP87 version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    EarthMoonBarycenter,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    /// Only present in the barycentric version E
    Sun,
}

/// (body, file extension, header names)
const BODY_TABLE: [(Body, &str, &[&str]); 10] = [
    (Body::Mercury, "mer", &["MERCURY"]),
    (Body::Venus, "ven", &["VENUS"]),
    (Body::Earth, "ear", &["EARTH"]),
    (Body::EarthMoonBarycenter, "emb", &["EMB", "EARTH-MOON"]),
    (Body::Mars, "mar", &["MARS"]),
    (Body::Jupiter, "jup", &["JUPITER"]),
    (Body::Saturn, "sat", &["SATURN"]),
    (Body::Uranus, "ura", &["URANUS"]),
    (Body::Neptune, "nep", &["NEPTUNE"]),
    (Body::Sun, "sun", &["SUN"]),
];

lazy_static! {
    /// Map from file extensions to bodies
    static ref BODY_EXTENSIONS: HashMap<&'static str, Body> = {
        let mut m = HashMap::new();
        for &(body, ext, _) in BODY_TABLE.iter() {
            m.insert(ext, body);
        }
        m
    };

    /// Map from upper-case names (header names and display names) to bodies
    static ref BODY_NAMES: HashMap<String, Body> = {
        let mut m = HashMap::new();
        for &(body, _, names) in BODY_TABLE.iter() {
            for name in names.iter() {
                m.insert(name.to_string(), body);
            }
            m.insert(body.name().to_uppercase(), body);
        }
        m
    };
}

impl Body {
    /// The eight planets, innermost first
    pub const PLANETS: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::EarthMoonBarycenter => "Earth-Moon barycenter",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Sun => "Sun",
        }
    }

    /// Extension of the body's file in the VSOP87 distribution
    pub fn extension(&self) -> &'static str {
        BODY_TABLE
            .iter()
            .find(|(body, _, _)| body == self)
            .map(|(_, ext, _)| *ext)
            .unwrap_or("")
    }

    pub fn from_extension(ext: &str) -> Option<Body> {
        BODY_EXTENSIONS.get(ext.to_lowercase().as_str()).copied()
    }

    /// Look a body up by display name or header name, ignoring case
    pub fn from_name(name: &str) -> Option<Body> {
        BODY_NAMES.get(&name.trim().to_uppercase()).copied()
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = Vsop87Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::from_name(s)
            .or_else(|| Body::from_extension(s))
            .ok_or_else(|| Vsop87Error::UnknownBody(s.to_string()))
    }
}

/// VSOP87 version: which variables, centre and reference frame a file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    /// Heliocentric rectangular, ecliptic and equinox J2000
    A,
    /// Heliocentric spherical, ecliptic and equinox J2000
    B,
    /// Heliocentric rectangular, ecliptic and equinox of date
    C,
    /// Heliocentric spherical, ecliptic and equinox of date
    D,
    /// Barycentric rectangular, ecliptic and equinox J2000
    E,
}

impl Version {
    pub const ALL: [Version; 5] = [Version::A, Version::B, Version::C, Version::D, Version::E];

    pub fn letter(&self) -> char {
        match self {
            Version::A => 'A',
            Version::B => 'B',
            Version::C => 'C',
            Version::D => 'D',
            Version::E => 'E',
        }
    }

    pub fn from_letter(letter: char) -> Option<Version> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Version::A),
            'B' => Some(Version::B),
            'C' => Some(Version::C),
            'D' => Some(Version::D),
            'E' => Some(Version::E),
            _ => None,
        }
    }

    /// Version from the digit in column 2 of a term line (1 = A … 5 = E)
    pub fn from_digit(digit: char) -> Option<Version> {
        match digit {
            '1' => Some(Version::A),
            '2' => Some(Version::B),
            '3' => Some(Version::C),
            '4' => Some(Version::D),
            '5' => Some(Version::E),
            _ => None,
        }
    }

    /// Whether the variables are (L, B, R) rather than (X, Y, Z)
    pub fn is_spherical(&self) -> bool {
        matches!(self, Version::B | Version::D)
    }

    /// Whether the frame is the ecliptic and equinox of date rather than J2000
    pub fn is_of_date(&self) -> bool {
        matches!(self, Version::C | Version::D)
    }

    pub fn is_barycentric(&self) -> bool {
        matches!(self, Version::E)
    }

    /// Official file name for a body, e.g. `VSOP87D.ear`
    pub fn file_name(&self, body: Body) -> String {
        format!("VSOP87{}.{}", self.letter(), body.extension())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VSOP87{}", self.letter())
    }
}
