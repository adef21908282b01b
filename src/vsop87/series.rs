//! Parsing and evaluation of a single VSOP87 series file
//!
//! A file holds, for one body and one version, three variables (X/Y/Z or
//! L/B/R). Each variable is split into groups by power of time, and each
//! group is announced by a header line giving the group's term count.
//!
//! Term lines use the fixed Fortran layout
//! `(1x,4i1,i5,12i3,f15.11,2f18.11,f14.11,f20.11)`; only the version digit,
//! the variable and power digits, and the final three reals A, B, C are used.

use std::io::BufRead;

use super::errors::{format_err, Result, Vsop87Error};
use super::names::{Body, Version};
use crate::constants::TAU;
use crate::coordinates::cartesian::Cartesian3;
use crate::time::Time;

/// Column ranges of the amplitude, phase and frequency fields
const AMPLITUDE_COLUMNS: std::ops::Range<usize> = 79..97;
const PHASE_COLUMNS: std::ops::Range<usize> = 97..111;
const FREQUENCY_COLUMNS_START: usize = 111;

/// One periodic term `A · cos(B + C·T)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

impl Term {
    pub fn value(&self, t: f64) -> f64 {
        self.amplitude * (self.phase + self.frequency * t).cos()
    }
}

/// All terms of one body in one VSOP87 version
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    version: Version,
    body: Body,
    /// `groups[variable][power]`
    groups: [Vec<Vec<Term>>; 3],
}

struct GroupHeader {
    line: usize,
    variable: usize,
    power: usize,
    expected: usize,
}

fn parse_header(line_no: usize, line: &str) -> Result<(Version, Body, GroupHeader)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 9 || tokens[1] != "VERSION" || tokens[4] != "VARIABLE" {
        return Err(format_err(line_no, "malformed header"));
    }

    let letter = tokens[2]
        .chars()
        .next()
        .ok_or_else(|| format_err(line_no, "missing version"))?;
    let version = Version::from_letter(letter).ok_or(Vsop87Error::UnsupportedVersion(letter))?;
    let body = Body::from_name(tokens[3])
        .ok_or_else(|| Vsop87Error::UnknownBody(tokens[3].to_string()))?;

    let variable: usize = tokens[5]
        .parse()
        .map_err(|_| format_err(line_no, format!("bad variable index {:?}", tokens[5])))?;
    if !(1..=3).contains(&variable) {
        return Err(format_err(line_no, format!("variable index {} out of range", variable)));
    }
    let power: usize = tokens[7]
        .trim_start_matches("*T**")
        .parse()
        .map_err(|_| format_err(line_no, format!("bad power of time {:?}", tokens[7])))?;
    let expected: usize = tokens[8]
        .parse()
        .map_err(|_| format_err(line_no, format!("bad term count {:?}", tokens[8])))?;

    Ok((
        version,
        body,
        GroupHeader {
            line: line_no,
            variable: variable - 1,
            power,
            expected,
        },
    ))
}

fn parse_field(line_no: usize, line: &str, range: std::ops::Range<usize>, name: &str) -> Result<f64> {
    line.get(range)
        .map(str::trim)
        .and_then(|field| field.parse::<f64>().ok())
        .ok_or_else(|| format_err(line_no, format!("unreadable {}", name)))
}

fn parse_term(line_no: usize, line: &str, header: &GroupHeader, version: Version) -> Result<Term> {
    let bytes = line.as_bytes();
    if bytes.len() < 5 {
        return Err(format_err(line_no, "term line too short"));
    }
    let digit = bytes[1] as char;
    match Version::from_digit(digit) {
        Some(v) if v == version => {}
        Some(v) => {
            return Err(format_err(
                line_no,
                format!("term of {} inside a {} file", v, version),
            ))
        }
        None => return Err(Vsop87Error::UnsupportedVersion(digit)),
    }
    let variable = (bytes[3] as char).to_digit(10);
    let power = (bytes[4] as char).to_digit(10);
    if variable != Some(header.variable as u32 + 1) || power != Some(header.power as u32) {
        return Err(format_err(line_no, "term does not match its group header"));
    }

    let amplitude = parse_field(line_no, line, AMPLITUDE_COLUMNS, "amplitude")?;
    let phase = parse_field(line_no, line, PHASE_COLUMNS, "phase")?;
    let frequency = line
        .get(FREQUENCY_COLUMNS_START..)
        .map(str::trim)
        .and_then(|field| field.parse::<f64>().ok())
        .ok_or_else(|| format_err(line_no, "unreadable frequency"))?;

    Ok(Term {
        amplitude,
        phase,
        frequency,
    })
}

fn close_group(header: &GroupHeader, found: usize) -> Result<()> {
    if found != header.expected {
        return Err(format_err(
            header.line,
            format!("header announces {} terms, found {}", header.expected, found),
        ));
    }
    Ok(())
}

impl Series {
    /// Parse a series from the text of a VSOP87 file
    pub fn parse(text: &str) -> Result<Series> {
        Self::from_lines(text.lines().map(|l| Ok(l.to_string())))
    }

    /// Parse a series from any buffered reader (plain or decompressed)
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Series> {
        Self::from_lines(reader.lines().map(|l| {
            l.map_err(|e| Vsop87Error::InvalidFormat {
                line: 0,
                message: e.to_string(),
            })
        }))
    }

    fn from_lines<I>(lines: I) -> Result<Series>
    where
        I: Iterator<Item = Result<String>>,
    {
        let mut identity: Option<(Version, Body)> = None;
        let mut groups: [Vec<Vec<Term>>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        let mut current: Option<(GroupHeader, usize)> = None;

        for (index, line) in lines.enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            if line.trim_start().starts_with("VSOP87") {
                let (version, body, header) = parse_header(line_no, line)?;
                match identity {
                    None => identity = Some((version, body)),
                    Some(known) if known != (version, body) => {
                        return Err(format_err(line_no, "header changes body or version"))
                    }
                    Some(_) => {}
                }
                if let Some((previous, found)) = current.take() {
                    close_group(&previous, found)?;
                }
                let powers = &mut groups[header.variable];
                if powers.len() <= header.power {
                    powers.resize(header.power + 1, Vec::new());
                }
                current = Some((header, 0));
                continue;
            }

            let (version, _) =
                identity.ok_or_else(|| format_err(line_no, "term line before any header"))?;
            let (header, found) = current
                .as_mut()
                .ok_or_else(|| format_err(line_no, "term line before any header"))?;
            let term = parse_term(line_no, line, header, version)?;
            groups[header.variable][header.power].push(term);
            *found += 1;
        }

        if let Some((previous, found)) = current {
            close_group(&previous, found)?;
        }
        let (version, body) = identity.ok_or_else(|| format_err(0, "no VSOP87 header found"))?;

        Ok(Series {
            version,
            body,
            groups,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn body(&self) -> Body {
        self.body
    }

    /// Total number of periodic terms over all variables and powers
    pub fn term_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|powers| powers.iter())
            .map(|terms| terms.len())
            .sum()
    }

    /// Evaluate one variable (0, 1 or 2) at `t` Julian millennia since J2000
    pub fn evaluate_variable(&self, variable: usize, t: f64) -> f64 {
        self.groups
            .get(variable)
            .map(|powers| {
                powers.iter().rev().fold(0.0, |acc, terms| {
                    acc * t + terms.iter().map(|term| term.value(t)).sum::<f64>()
                })
            })
            .unwrap_or(0.0)
    }

    /// The three raw variables at `time`: X, Y, Z in AU or L, B (radians), R (AU)
    pub fn evaluate(&self, time: &Time) -> [f64; 3] {
        let t = time.julian_millennia_since_j2000();
        let mut values = [
            self.evaluate_variable(0, t),
            self.evaluate_variable(1, t),
            self.evaluate_variable(2, t),
        ];
        if self.version.is_spherical() {
            values[0] = values[0].rem_euclid(TAU);
        }
        values
    }

    /// Rectangular ecliptic position in AU in the series' own frame
    pub fn rectangular(&self, time: &Time) -> Cartesian3 {
        let [a, b, c] = self.evaluate(time);
        if self.version.is_spherical() {
            Cartesian3::from_spherical(a, b, c)
        } else {
            Cartesian3::new(a, b, c)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{header, term_line};
    use super::*;
    use approx::assert_relative_eq;

    fn tiny_series() -> String {
        [
            header('A', "MARS", 1, 0, 2),
            term_line(1, 4, 1, 0, 1, 1.5, 0.0, 0.0),
            term_line(1, 4, 1, 0, 2, 0.1, 0.5, 3340.6),
            header('A', "MARS", 1, 1, 1),
            term_line(1, 4, 1, 1, 1, 0.01, 0.0, 0.0),
            header('A', "MARS", 2, 0, 1),
            term_line(1, 4, 2, 0, 1, -0.25, 0.0, 0.0),
            header('A', "MARS", 3, 0, 1),
            term_line(1, 4, 3, 0, 1, 0.02, 1.0, 0.0),
        ]
        .join("\n")
    }

    #[test]
    fn test_term_line_layout() {
        let line = term_line(1, 4, 1, 0, 1, 1.5, 0.25, 3340.6);
        assert_eq!(line.len(), 131);
        assert_eq!(line[79..97].trim(), "1.50000000000");
    }

    #[test]
    fn test_parse_and_evaluate() {
        let series = Series::parse(&tiny_series()).unwrap();
        assert_eq!(series.version(), Version::A);
        assert_eq!(series.body(), Body::Mars);
        assert_eq!(series.term_count(), 6);

        let t = 0.1;
        let expected_x = 1.5 + 0.1 * (0.5_f64 + 3340.6 * t).cos() + 0.01 * t;
        assert_relative_eq!(series.evaluate_variable(0, t), expected_x, epsilon = 1e-12);
        assert_relative_eq!(series.evaluate_variable(1, t), -0.25, epsilon = 1e-15);
        assert_relative_eq!(series.evaluate_variable(2, t), 0.02 * 1.0_f64.cos(), epsilon = 1e-15);
        assert_eq!(series.evaluate_variable(7, t), 0.0);

        let at_j2000 = series.rectangular(&Time::J2000);
        assert_relative_eq!(at_j2000.x, 1.5 + 0.1 * 0.5_f64.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_term_count_mismatch() {
        let text = tiny_series().replacen("*T**0        2 TERMS", "*T**0        3 TERMS", 1);
        assert!(matches!(
            Series::parse(&text),
            Err(Vsop87Error::InvalidFormat { line: 1, .. })
        ));
    }

    #[test]
    fn test_unsupported_version_digit() {
        let text = [header('A', "MARS", 1, 0, 1), term_line(0, 4, 1, 0, 1, 1.0, 0.0, 0.0)].join("\n");
        assert!(matches!(
            Series::parse(&text),
            Err(Vsop87Error::UnsupportedVersion('0'))
        ));
    }

    #[test]
    fn test_unknown_body_and_missing_header() {
        let text = header('A', "PLUTO", 1, 0, 0);
        assert!(matches!(Series::parse(&text), Err(Vsop87Error::UnknownBody(_))));

        let orphan = term_line(1, 4, 1, 0, 1, 1.0, 0.0, 0.0);
        assert!(matches!(
            Series::parse(&orphan),
            Err(Vsop87Error::InvalidFormat { line: 1, .. })
        ));
        assert!(Series::parse("").is_err());
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let text = tiny_series();
        let from_reader = Series::from_reader(std::io::Cursor::new(text.as_bytes())).unwrap();
        assert_eq!(from_reader, Series::parse(&text).unwrap());
    }
}
