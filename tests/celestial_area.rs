//! Intersection and containment of equirectangular areas

use rstest::rstest;

use starframe::coordinates::angle::Angle;
use starframe::{CelestialArea, CoordinateSystem, Coordinates, EquirectangularArea, PositionType};

fn area(sw_ra: f64, sw_dec: f64, ne_ra: f64, ne_dec: f64) -> CelestialArea {
    EquirectangularArea::from_hours(sw_ra, sw_dec, ne_ra, ne_dec)
        .unwrap()
        .into()
}

#[rstest]
#[case((12.6, 12.5, 12.9, 13.2), true)]
#[case((12.0, 12.5, 12.4, 13.2), true)]
#[case((12.4, 12.5, 12.6, 13.2), true)]
#[case((12.0, 12.5, 13.4, 13.2), true)]
#[case((11.8, 12.5, 12.2, 13.2), false)]
#[case((13.0, 12.5, 13.4, 13.2), false)]
#[case((12.0, 11.0, 12.4, 12.2), true)]
#[case((12.4, 12.2, 12.6, 12.4), true)]
#[case((12.0, 11.0, 13.4, 14.0), true)]
#[case((11.8, 13.5, 12.2, 13.9), false)]
#[case((13.0, 11.5, 13.4, 11.9), false)]
fn test_intersection_without_zero_crossing(#[case] other: (f64, f64, f64, f64), #[case] expected: bool) {
    let base = area(12.3, 12.0, 12.7, 13.0);
    let other = area(other.0, other.1, other.2, other.3);
    assert_eq!(base.intersects(&other), expected);
    assert_eq!(other.intersects(&base), expected);
}

#[rstest]
#[case((0.2, 12.5, 2.0, 13.2), true)]
#[case((0.1, 12.5, 0.5, 13.2), true)]
#[case((0.1, 12.5, 5.5, 13.2), true)]
#[case((2.0, 12.5, 1.99, 13.2), true)]
#[case((23.5, 12.5, 0.5, 13.2), true)]
#[case((20.5, 12.5, 4.5, 13.2), true)]
#[case((22.5, 12.5, 23.5, 13.2), true)]
#[case((22.0, 12.5, 23.5, 13.2), true)]
#[case((2.0, 12.5, 3.0, 13.2), false)]
#[case((22.0, 12.5, 22.3, 13.2), false)]
#[case((23.5, 11.0, 0.5, 12.2), true)]
#[case((23.5, 12.2, 0.5, 12.4), true)]
#[case((23.5, 11.0, 0.5, 14.0), true)]
#[case((23.5, 13.5, 0.5, 13.9), false)]
#[case((23.5, 11.5, 0.5, 11.9), false)]
fn test_intersection_with_zero_crossing(#[case] other: (f64, f64, f64, f64), #[case] expected: bool) {
    let base = area(22.5, 12.0, 1.5, 13.0);
    let other = area(other.0, other.1, other.2, other.3);
    assert_eq!(base.intersects(&other), expected);
    assert_eq!(other.intersects(&base), expected);
}

#[test]
fn test_two_wrapping_areas() {
    let small = area(0.1, 12.5, 0.5, 13.2);
    let almost_everything = area(0.4, 12.5, 0.3, 13.2);
    assert!(small.intersects(&almost_everything));
    assert!(almost_everything.intersects(&small));
}

#[test]
fn test_zero_crossing_containment() {
    let wrap = area(22.5, 12.0, 1.5, 13.0);
    let point = |ra: f64, dec: f64| {
        Coordinates::from_spherical(
            Angle::from_hours(ra),
            Angle::from_degrees(dec),
            None,
            CoordinateSystem::equatorial_j2000(),
            PositionType::Mean,
        )
    };
    assert!(wrap.contains(&point(23.9, 12.5)).unwrap());
    assert!(wrap.contains(&point(0.0, 12.5)).unwrap());
    assert!(wrap.contains(&point(1.5, 12.5)).unwrap());
    assert!(!wrap.contains(&point(6.0, 12.5)).unwrap());
    assert!(!wrap.contains(&point(23.9, 20.0)).unwrap());
}

#[test]
fn test_corners_given_in_galactic() {
    let sw = Coordinates::from_spherical(
        Angle::from_hours(22.5),
        Angle::from_degrees(12.0),
        None,
        CoordinateSystem::equatorial_j2000(),
        PositionType::Mean,
    )
    .convert(&CoordinateSystem::galactic(), PositionType::Mean)
    .unwrap();
    let ne = Coordinates::from_spherical(
        Angle::from_hours(1.5),
        Angle::from_degrees(13.0),
        None,
        CoordinateSystem::equatorial_j2000(),
        PositionType::Mean,
    );
    let wrap: CelestialArea = EquirectangularArea::new(&sw, &ne).unwrap().into();
    assert!(wrap.bounding_box().crosses_zero_ra());
    assert!(wrap.intersects(&area(23.5, 12.5, 0.5, 13.2)));
    assert!(!wrap.intersects(&area(2.0, 12.5, 3.0, 13.2)));
}
