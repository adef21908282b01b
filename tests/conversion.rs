//! End-to-end checks of the conversion pipeline

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use starframe::coordinates::angle::{parse_sexagesimal, Angle};
use starframe::precessionlib::precess;
use starframe::units::length_from_au;
use starframe::{
    CoordinateSystem, Coordinates, GeographicalLocation, Origin, PositionType, StarframeError,
    Time,
};

fn j2000(ra: f64, dec: f64) -> Coordinates {
    Coordinates::from_degrees(ra, dec, CoordinateSystem::equatorial_j2000(), PositionType::Mean)
}

fn random_star(rng: &mut StdRng) -> Coordinates {
    let ra = rng.gen_range(0.0..360.0);
    let dec = rng.gen_range(-1.0f64..1.0).asin().to_degrees();
    j2000(ra, dec)
}

/// Angle between two positions in degrees, independent of longitude wrap
fn separation_deg(a: &Coordinates, b: &Coordinates) -> f64 {
    a.position().angular_distance(&b.position()).to_degrees()
}

fn targets() -> Vec<(CoordinateSystem, PositionType)> {
    let date = Time::julian_year(2024.25);
    let site = GeographicalLocation::new(-4.9, 52.4).with_name("Groningen");
    vec![
        (CoordinateSystem::icrs(), PositionType::Mean),
        (CoordinateSystem::galactic(), PositionType::Mean),
        (CoordinateSystem::equatorial_b1950(), PositionType::Mean),
        (CoordinateSystem::equatorial_j2050(), PositionType::Mean),
        (CoordinateSystem::equatorial(date, Origin::Barycentric), PositionType::True),
        (CoordinateSystem::ecliptical_j2000(Origin::Barycentric), PositionType::Mean),
        (
            CoordinateSystem::ecliptical(Some(date), Some(date), Origin::Barycentric),
            PositionType::Apparent,
        ),
        (
            CoordinateSystem::ecliptical(Some(Time::B1950), Some(date), Origin::Barycentric),
            PositionType::Mean,
        ),
        (CoordinateSystem::horizontal(date, site.clone()), PositionType::Mean),
        (CoordinateSystem::horizontal(date, site), PositionType::Apparent),
    ]
}

#[test]
fn test_round_trip_through_every_frame() {
    let mut rng = StdRng::seed_from_u64(0x5EED_1234);
    for (target, position_type) in targets() {
        for _ in 0..50 {
            let star = random_star(&mut rng);
            let there = star.convert(&target, position_type).unwrap();
            let back = there
                .convert(star.system(), PositionType::Mean)
                .unwrap();
            let error = separation_deg(&star, &back);
            assert!(error < 1e-6, "{} via {}: off by {}°", star, target, error);
        }
    }
}

#[test]
fn test_round_trip_known_distance_between_origins() {
    let time = Time::from_jd(2_455_197.5);
    let mut rng = StdRng::seed_from_u64(42);
    let geocentric = CoordinateSystem::equatorial(Time::J2000, Origin::Geocentric).with_epoch(time);
    let heliocentric = CoordinateSystem::ecliptical(Some(time), Some(time), Origin::Heliocentric);

    for _ in 0..20 {
        let star = random_star(&mut rng);
        let body = Coordinates::from_spherical(
            star.longitude().angle,
            star.latitude().angle,
            Some(length_from_au(rng.gen_range(0.5..40.0))),
            geocentric.clone(),
            PositionType::Mean,
        );
        let helio = body.convert(&heliocentric, PositionType::Mean).unwrap();
        assert!(helio.distance_is_known());
        let back = helio.convert(&geocentric, PositionType::Mean).unwrap();
        assert!(separation_deg(&body, &back) < 1e-6);
        assert_relative_eq!(
            back.position().magnitude(),
            body.position().magnitude(),
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_round_trip_through_the_barycentre() {
    let time = Time::from_jd(2_451_910.5);
    let mut rng = StdRng::seed_from_u64(7);
    let geocentric = CoordinateSystem::ecliptical(Some(time), Some(time), Origin::Geocentric).with_epoch(time);
    let barycentric = CoordinateSystem::equatorial_j2000().with_epoch(time);

    for _ in 0..20 {
        let star = random_star(&mut rng);
        let body = Coordinates::from_spherical(
            star.longitude().angle,
            star.latitude().angle,
            Some(length_from_au(rng.gen_range(0.3..40.0))),
            geocentric.clone(),
            PositionType::Mean,
        );
        let bary = body.convert(&barycentric, PositionType::Mean).unwrap();
        assert!(bary.distance_is_known());
        let back = bary.convert(&geocentric, PositionType::Mean).unwrap();
        assert!(separation_deg(&body, &back) < 1e-6);
        assert_relative_eq!(
            back.position().magnitude(),
            body.position().magnitude(),
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_heliocentric_to_barycentric_offset_is_the_sun() {
    let time = Time::julian_year(2012.0);
    let sun = starframe::Vsop87::builtin().sun_barycentric(&time).unwrap();
    let helio = CoordinateSystem::equatorial(Time::J2000, Origin::Heliocentric).with_epoch(time);

    // The Sun itself, at the heliocentric origin, lands on its barycentric position
    let origin = Coordinates::from_rectangular(
        length_from_au(0.0),
        length_from_au(0.0),
        length_from_au(0.0),
        helio.clone(),
        PositionType::Mean,
    );
    let moved = origin
        .convert(&CoordinateSystem::equatorial_j2000(), PositionType::Mean)
        .unwrap();
    assert_relative_eq!((moved.position() - sun).magnitude(), 0.0, epsilon = 1e-6);

    // Any other point moves by the same vector
    let body = Coordinates::from_spherical(
        Angle::from_degrees(123.0),
        Angle::from_degrees(-4.0),
        Some(length_from_au(5.2)),
        helio,
        PositionType::Mean,
    );
    let moved = body
        .convert(&CoordinateSystem::equatorial_j2000(), PositionType::Mean)
        .unwrap();
    let offset = moved.position() - body.position();
    assert_relative_eq!((offset - sun).magnitude(), 0.0, epsilon = 1e-3);
}

#[test]
fn test_identity_is_exact() {
    let star = j2000(201.298_247, -11.161_322);
    let same = star
        .convert(&CoordinateSystem::equatorial_j2000(), PositionType::Mean)
        .unwrap();
    assert_eq!(same, star);
    assert_eq!(same.longitude(), star.longitude());
}

#[rstest]
#[case(0.0, 0.0, 0.0, 0.0)]
#[case(0.0, 90.0, 90.0, 66.560_708_9)]
fn test_equator_and_ecliptic_at_equinox(
    #[case] ra: f64,
    #[case] dec: f64,
    #[case] lon: f64,
    #[case] lat: f64,
) {
    let ecl = j2000(ra, dec)
        .convert(&CoordinateSystem::ecliptical_j2000(Origin::Barycentric), PositionType::Mean)
        .unwrap();
    let dlon = (ecl.longitude().degrees() - lon).rem_euclid(360.0);
    assert!(dlon.min(360.0 - dlon) < 1e-7);
    assert_relative_eq!(ecl.latitude().degrees(), lat, epsilon = 1e-7);
}

#[test]
fn test_galactic_centre_fixed_point() {
    let centre = j2000(266.405_089, -28.936_175);
    let gal = centre
        .convert(&CoordinateSystem::galactic(), PositionType::Mean)
        .unwrap();
    let l = gal.longitude().degrees();
    assert!(l.min(360.0 - l) < 1e-4, "l = {}", l);
    assert!(gal.latitude().degrees().abs() < 1e-4);

    let back = gal
        .convert(&CoordinateSystem::equatorial_j2000(), PositionType::Mean)
        .unwrap();
    assert_relative_eq!(back.longitude().degrees(), 266.405_089, epsilon = 1e-6);
    assert_relative_eq!(back.latitude().degrees(), -28.936_175, epsilon = 1e-6);
}

#[test]
fn test_precession_forward_and_back() {
    let star = j2000(88.792_939, 7.407_064);
    let later = Time::julian_year(2100.0);
    let precessed = precess(&star, &later).unwrap();
    assert_eq!(precessed.system().equinox, Some(later));
    let back = precess(&precessed, &Time::J2000).unwrap();
    assert_relative_eq!(back.longitude().degrees(), 88.792_939, epsilon = 1e-6);
    assert_relative_eq!(back.latitude().degrees(), 7.407_064, epsilon = 1e-6);

    // The pipeline agrees with the dedicated helper
    let via_convert = star
        .convert(&CoordinateSystem::equatorial(later, Origin::Barycentric), PositionType::Mean)
        .unwrap();
    assert!(separation_deg(&precessed, &via_convert) < 1e-9);
}

#[test]
fn test_precess_rejects_other_frames() {
    let gal = Coordinates::from_degrees(10.0, 10.0, CoordinateSystem::galactic(), PositionType::Mean);
    assert!(matches!(
        precess(&gal, &Time::B1950),
        Err(StarframeError::IncorrectCoordinateSystem(_))
    ));
}

#[test]
fn test_horizontal_is_measured_from_north_through_east() {
    let epoch = Time::from_jd(2_460_000.5);
    let site = GeographicalLocation::new(0.0, 45.0);
    let horizon = CoordinateSystem::horizontal(epoch, site.clone());
    let lst = site.sidereal_time(&epoch, PositionType::Mean).unwrap().degrees();
    let of_date = CoordinateSystem::equatorial(epoch, Origin::Barycentric);

    // A star rising due east on the celestial equator
    let east = Coordinates::from_degrees(lst + 90.0, 0.0, of_date.clone(), PositionType::Mean);
    let local = east.convert(&horizon, PositionType::Mean).unwrap();
    assert_relative_eq!(local.longitude().degrees(), 90.0, epsilon = 1e-8);
    assert_relative_eq!(local.latitude().degrees(), 0.0, epsilon = 1e-8);

    // The culminating star at dec 0 stands due south at 45° altitude
    let south = Coordinates::from_degrees(lst, 0.0, of_date, PositionType::Mean);
    let local = south.convert(&horizon, PositionType::Mean).unwrap();
    assert_relative_eq!(local.longitude().degrees(), 180.0, epsilon = 1e-8);
    assert_relative_eq!(local.latitude().degrees(), 45.0, epsilon = 1e-8);
}

#[test]
fn test_geocentric_sun_from_builtin_series() {
    let time = Time::from_jd(2_448_908.5);
    let sun = starframe::Vsop87::builtin()
        .position(starframe::vsop87::Body::Sun, &time)
        .unwrap();
    let target = CoordinateSystem::ecliptical(Some(time), Some(time), Origin::Geocentric).with_epoch(time);
    let geo = sun.convert(&target, PositionType::Mean).unwrap();
    assert_relative_eq!(geo.longitude().degrees(), 199.907_372, epsilon = 1e-5);
    assert_relative_eq!(geo.position_au().magnitude(), 0.997_607_75, epsilon = 1e-6);
}

#[test]
fn test_separation_across_frames() {
    let arcturus = Coordinates::from_spherical(
        parse_sexagesimal("14h15m39.7s", true).unwrap(),
        parse_sexagesimal("+19°10'57\"", false).unwrap(),
        None,
        CoordinateSystem::equatorial_j2000(),
        PositionType::Mean,
    );
    let spica = j2000(201.2983, -11.1614)
        .convert(&CoordinateSystem::ecliptical_j2000(Origin::Barycentric), PositionType::Mean)
        .unwrap();
    let d = arcturus.angular_separation(&spica).unwrap();
    assert_relative_eq!(d.to_degrees(), 32.793, epsilon = 1e-3);

    let pa = arcturus.relative_position_angle(&spica).unwrap();
    assert!(pa.to_degrees() > 180.0 && pa.to_degrees() < 270.0);
}

#[test]
fn test_system_serialization_round_trip() {
    let system = CoordinateSystem::horizontal(
        Time::J2000,
        GeographicalLocation::new(-6.5, 53.2).with_name("Dwingeloo"),
    );
    let json = serde_json::to_string(&system).unwrap();
    let back: CoordinateSystem = serde_json::from_str(&json).unwrap();
    assert_eq!(back, system);
}

#[test]
fn test_display_of_converted_position() {
    let vega = Coordinates::from_spherical(
        Angle::from_hours(18.615_649),
        Angle::from_degrees(38.783_69),
        None,
        CoordinateSystem::equatorial_j2000(),
        PositionType::Mean,
    );
    let gal = vega
        .convert(&CoordinateSystem::galactic(), PositionType::Mean)
        .unwrap();
    let text = gal.to_string();
    assert!(text.starts_with("l="), "{}", text);
    assert!(text.ends_with("[galactic barycentric]"), "{}", text);
}
