//! Loading VSOP87 series from a data directory

use approx::assert_relative_eq;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

use starframe::units::{length_from_au, m_to_au};
use starframe::vsop87::{Body, Version, Vsop87Error};
use starframe::{
    CoordinateSystem, Coordinates, Loader, Origin, Planet, PositionType, StarframeError, Time,
};

fn term_line(version: u8, variable: u8, power: u8, n: usize, a: f64, b: f64, c: f64) -> String {
    let mut line = format!(" {}0{}{}{:5}", version, variable, power, n);
    line.push_str(&"  0".repeat(12));
    line.push_str(&format!("{:15.11}{:18.11}", 0.0, 0.0));
    line.push_str(&format!("{:18.11}{:14.11}{:20.11}", a, b, c));
    line
}

fn header(letter: char, body: &str, variable: u8, power: u8, count: usize) -> String {
    format!(
        " VSOP87 VERSION {}1    {:<9} VARIABLE {} (XYZ)       *T**{}      {:3} TERMS    HELIOCENTRIC",
        letter, body, variable, power, count
    )
}

/// A rectangular series with a constant position and a slow drift in x
fn rectangular_series(letter: char, body: &str, xyz: [f64; 3], drift: f64) -> String {
    let digit = letter as u8 - b'A' + 1;
    let mut lines = vec![
        header(letter, body, 1, 0, 1),
        term_line(digit, 1, 0, 1, xyz[0], 0.0, 0.0),
        header(letter, body, 1, 1, 1),
        term_line(digit, 1, 1, 1, drift, 0.0, 0.0),
    ];
    for (variable, value) in [(2u8, xyz[1]), (3u8, xyz[2])] {
        lines.push(header(letter, body, variable, 0, 1));
        lines.push(term_line(digit, variable, 0, 1, value, 0.0, 0.0));
    }
    lines.join("\n")
}

fn write_gz(path: &Path, text: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_loader_reads_plain_and_gzipped_files() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("VSOP87A.mar"),
        rectangular_series('A', "MARS", [1.5, 0.2, 0.03], 0.1),
    )
    .unwrap();
    write_gz(
        &dir.path().join("VSOP87E.sun.gz"),
        &rectangular_series('E', "SUN", [0.005, -0.003, 0.0], 0.0),
    );

    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();
    assert_eq!(vsop.len(), 3);
    assert_eq!(vsop.bodies(), vec![Body::Earth, Body::Mars, Body::Sun]);
    assert!(vsop.series(Body::Sun, Version::E).is_some());

    // One Julian millennium after J2000 the drift term adds 0.1 AU to x
    let later = Time::from_jd(2_451_545.0 + 365_250.0);
    let mars = vsop.position(Body::Mars, &later).unwrap();
    assert_relative_eq!(mars.position_au().x, 1.6, epsilon = 1e-12);
    assert_eq!(mars.system().origin, Origin::Heliocentric);
    assert_eq!(mars.system().equinox, Some(Time::J2000));
}

#[test]
fn test_barycentric_shift_uses_the_sun() {
    let dir = tempdir().unwrap();
    write_gz(
        &dir.path().join("VSOP87E.sun.gz"),
        &rectangular_series('E', "SUN", [0.005, -0.003, 0.001], 0.0),
    );
    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();

    let sun_bary = vsop.sun_barycentric(&Time::J2000).unwrap();
    let expected = (0.005f64.powi(2) + 0.003f64.powi(2) + 0.001f64.powi(2)).sqrt();
    assert_relative_eq!(m_to_au(sun_bary.magnitude()), expected, epsilon = 1e-12);

    // The Sun itself, barycentric, moved to the heliocentric origin lands on zero
    let sun = vsop.position(Body::Sun, &Time::J2000).unwrap();
    assert_eq!(sun.system().origin, Origin::Barycentric);
    let helio = sun
        .convert_with(
            &CoordinateSystem::equatorial(Time::J2000, Origin::Heliocentric),
            PositionType::Mean,
            &vsop,
        )
        .unwrap();
    assert!(m_to_au(helio.position().magnitude()) < 1e-12);
}

#[test]
fn test_bad_files_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("VSOP87B.jup"), "this is not a series\n").unwrap();
    fs::write(
        dir.path().join("VSOP87A.mar"),
        rectangular_series('A', "MARS", [1.5, 0.0, 0.0], 0.0),
    )
    .unwrap();
    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();
    assert!(vsop.series(Body::Jupiter, Version::B).is_none());
    assert!(vsop.series(Body::Mars, Version::A).is_some());
}

#[test]
fn test_absent_planet_series_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("VSOP87A.mar"),
        rectangular_series('A', "MARS", [1.5, 0.0, 0.0], 0.0),
    )
    .unwrap();
    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();
    let err = Planet::Jupiter
        .equatorial_coordinates(&vsop, &Time::J2000, Origin::Barycentric)
        .unwrap_err();
    assert!(matches!(
        err,
        StarframeError::Ephemeris(Vsop87Error::SeriesUnavailable(Body::Jupiter))
    ));
    // The origin offsets still come from the built-in series
    assert!(Planet::Mars
        .galactic_coordinates(&vsop, &Time::J2000, Origin::Barycentric)
        .is_ok());
}

#[test]
fn test_planet_from_loaded_series() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("VSOP87A.mar"),
        rectangular_series('A', "MARS", [1.5, 0.0, 0.0], 0.0),
    )
    .unwrap();
    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();
    let time = Time::J2000;

    let helio = Planet::Mars
        .equatorial_coordinates(&vsop, &time, Origin::Heliocentric)
        .unwrap();
    // The equinox direction is shared by the ecliptic and the equator
    let au = helio.position_au();
    assert_relative_eq!(au.x, 1.5, epsilon = 1e-12);
    assert!(au.y.abs() < 1e-12 && au.z.abs() < 1e-12);

    let geo = Planet::Mars
        .equatorial_coordinates(&vsop, &time, Origin::Geocentric)
        .unwrap();
    let earth = vsop.earth_heliocentric(&time).unwrap();
    let expected = helio.position() - earth;
    assert_relative_eq!(geo.position().x, expected.x, max_relative = 1e-12);
    assert_relative_eq!(geo.position().y, expected.y, max_relative = 1e-12);
    assert_relative_eq!(geo.position().z, expected.z, max_relative = 1e-12);
}

#[test]
fn test_barycentric_files_alone_give_the_heliocentric_earth() {
    let dir = tempdir().unwrap();
    write_gz(
        &dir.path().join("VSOP87E.ear.gz"),
        &rectangular_series('E', "EARTH", [1.0, 0.0, 0.0], 0.0),
    );
    write_gz(
        &dir.path().join("VSOP87E.sun.gz"),
        &rectangular_series('E', "SUN", [0.005, -0.003, 0.001], 0.0),
    );
    let vsop = Loader::new().with_data_dir(dir.path()).load_vsop87().unwrap();
    assert!(!vsop.is_builtin(Body::Sun, Version::E));

    // The Sun seen from the Earth moves to the heliocentric origin
    let ecliptic = |origin| CoordinateSystem::ecliptical_j2000(origin).with_epoch(Time::J2000);
    let sun_from_earth = Coordinates::from_rectangular(
        length_from_au(-0.995),
        length_from_au(-0.003),
        length_from_au(0.001),
        ecliptic(Origin::Geocentric),
        PositionType::Mean,
    );
    let helio = sun_from_earth
        .convert_with(&ecliptic(Origin::Heliocentric), PositionType::Mean, &vsop)
        .unwrap();
    assert!(m_to_au(helio.position().magnitude()) < 1e-12);
}
