//! Nutation and obliquity based on the IAU 1980 model
//!
//! Implements nutation in longitude (delta-psi) and obliquity (delta-epsilon)
//! from the 63-term IAU 1980 series, the mean obliquity of the ecliptic from
//! Laskar's polynomial, and the nutation rotation matrix used when a position
//! is referred to the true equator and equinox of date.

use crate::constants::ASEC2RAD;
use crate::coordinates::angle::Angle;
use crate::framelib::{rotation_x, rotation_z};
use crate::time::Time;
use crate::{Result, StarframeError};
use nalgebra::Matrix3;

/// Multipliers of (D, M, M', F, Ω) for each periodic term
#[rustfmt::skip]
const NUTATION_ARGUMENTS: [[i8; 5]; 63] = [
    [ 0,  0,  0,  0,  1],
    [-2,  0,  0,  2,  2],
    [ 0,  0,  0,  2,  2],
    [ 0,  0,  0,  0,  2],
    [ 0,  1,  0,  0,  0],
    [ 0,  0,  1,  0,  0],
    [-2,  1,  0,  2,  2],
    [ 0,  0,  0,  2,  1],
    [ 0,  0,  1,  2,  2],
    [-2, -1,  0,  2,  2],
    [-2,  0,  1,  0,  0],
    [-2,  0,  0,  2,  1],
    [ 0,  0, -1,  2,  2],
    [ 2,  0,  0,  0,  0],
    [ 0,  0,  1,  0,  1],
    [ 2,  0, -1,  2,  2],
    [ 0,  0, -1,  0,  1],
    [ 0,  0,  1,  2,  1],
    [-2,  0,  2,  0,  0],
    [ 0,  0, -2,  2,  1],
    [ 2,  0,  0,  2,  2],
    [ 0,  0,  2,  2,  2],
    [ 0,  0,  2,  0,  0],
    [-2,  0,  1,  2,  2],
    [ 0,  0,  0,  2,  0],
    [-2,  0,  0,  2,  0],
    [ 0,  0, -1,  2,  1],
    [ 0,  2,  0,  0,  0],
    [ 2,  0, -1,  0,  1],
    [-2,  2,  0,  2,  2],
    [ 0,  1,  0,  0,  1],
    [-2,  0,  1,  0,  1],
    [ 0, -1,  0,  0,  1],
    [ 0,  0,  2, -2,  0],
    [ 2,  0, -1,  2,  1],
    [ 2,  0,  1,  2,  2],
    [ 0,  1,  0,  2,  2],
    [-2,  1,  1,  0,  0],
    [ 0, -1,  0,  2,  2],
    [ 2,  0,  0,  2,  1],
    [ 2,  0,  1,  0,  0],
    [-2,  0,  2,  2,  2],
    [-2,  0,  1,  2,  1],
    [ 2,  0, -2,  0,  1],
    [ 2,  0,  0,  0,  1],
    [ 0, -1,  1,  0,  0],
    [-2, -1,  0,  2,  1],
    [-2,  0,  0,  0,  1],
    [ 0,  0,  2,  2,  1],
    [-2,  0,  2,  0,  1],
    [-2,  1,  0,  2,  1],
    [ 0,  0,  1, -2,  0],
    [-1,  0,  1,  0,  0],
    [-2,  1,  0,  0,  0],
    [ 1,  0,  0,  0,  0],
    [ 0,  0,  1,  2,  0],
    [ 0,  0, -2,  2,  2],
    [-1, -1,  1,  0,  0],
    [ 0,  1,  1,  0,  0],
    [ 0, -1,  1,  2,  2],
    [ 2, -1, -1,  2,  2],
    [ 0,  0,  3,  2,  2],
    [ 2, -1,  0,  2,  2],
];

/// Coefficients for each periodic term in units of 0.0001":
/// [Δψ sine, Δψ sine rate per century, Δε cosine, Δε cosine rate per century]
#[rustfmt::skip]
const NUTATION_COEFFICIENTS: [[f64; 4]; 63] = [
    [-171996.0,    -174.2,   92025.0,       8.9],
    [ -13187.0,      -1.6,    5736.0,      -3.1],
    [  -2274.0,      -0.2,     977.0,      -0.5],
    [   2062.0,       0.2,    -895.0,       0.5],
    [   1426.0,      -3.4,      54.0,      -0.1],
    [    712.0,       0.1,      -7.0,       0.0],
    [   -517.0,       1.2,     224.0,      -0.6],
    [   -386.0,      -0.4,     200.0,       0.0],
    [   -301.0,       0.0,     129.0,      -0.1],
    [    217.0,      -0.5,     -95.0,       0.3],
    [   -158.0,       0.0,       0.0,       0.0],
    [    129.0,       0.1,     -70.0,       0.0],
    [    123.0,       0.0,     -53.0,       0.0],
    [     63.0,       0.0,       0.0,       0.0],
    [     63.0,       0.1,     -33.0,       0.0],
    [    -59.0,       0.0,      26.0,       0.0],
    [    -58.0,      -0.1,      32.0,       0.0],
    [    -51.0,       0.0,      27.0,       0.0],
    [     48.0,       0.0,       0.0,       0.0],
    [     46.0,       0.0,     -24.0,       0.0],
    [    -38.0,       0.0,      16.0,       0.0],
    [    -31.0,       0.0,      13.0,       0.0],
    [     29.0,       0.0,       0.0,       0.0],
    [     29.0,       0.0,     -12.0,       0.0],
    [     26.0,       0.0,       0.0,       0.0],
    [    -22.0,       0.0,       0.0,       0.0],
    [     21.0,       0.0,     -10.0,       0.0],
    [     17.0,      -0.1,       0.0,       0.0],
    [     16.0,       0.0,      -8.0,       0.0],
    [    -16.0,       0.1,       7.0,       0.0],
    [    -15.0,       0.0,       9.0,       0.0],
    [    -13.0,       0.0,       7.0,       0.0],
    [    -12.0,       0.0,       6.0,       0.0],
    [     11.0,       0.0,       0.0,       0.0],
    [    -10.0,       0.0,       5.0,       0.0],
    [     -8.0,       0.0,       3.0,       0.0],
    [      7.0,       0.0,      -3.0,       0.0],
    [     -7.0,       0.0,       0.0,       0.0],
    [     -7.0,       0.0,       3.0,       0.0],
    [     -7.0,       0.0,       3.0,       0.0],
    [      6.0,       0.0,       0.0,       0.0],
    [      6.0,       0.0,      -3.0,       0.0],
    [      6.0,       0.0,      -3.0,       0.0],
    [     -6.0,       0.0,       3.0,       0.0],
    [     -6.0,       0.0,       3.0,       0.0],
    [      5.0,       0.0,       0.0,       0.0],
    [     -5.0,       0.0,       3.0,       0.0],
    [     -5.0,       0.0,       3.0,       0.0],
    [     -5.0,       0.0,       3.0,       0.0],
    [      4.0,       0.0,       0.0,       0.0],
    [      4.0,       0.0,       0.0,       0.0],
    [      4.0,       0.0,       0.0,       0.0],
    [     -4.0,       0.0,       0.0,       0.0],
    [     -4.0,       0.0,       0.0,       0.0],
    [     -4.0,       0.0,       0.0,       0.0],
    [      3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
    [     -3.0,       0.0,       0.0,       0.0],
];

/// Laskar's mean obliquity coefficients in arcseconds, for powers of U = T/100
const LASKAR_COEFFS: [f64; 11] = [
    84_381.448, -4_680.93, -1.55, 1_999.25, -51.38, -249.67, -39.05, 7.12, 27.87, 5.79, 2.45,
];

/// Delaunay-style fundamental arguments in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalArguments {
    /// Mean elongation of the Moon from the Sun
    pub d: f64,
    /// Mean anomaly of the Sun
    pub m: f64,
    /// Mean anomaly of the Moon
    pub m_prime: f64,
    /// Moon's argument of latitude
    pub f: f64,
    /// Longitude of the ascending node of the Moon's mean orbit
    pub omega: f64,
}

impl FundamentalArguments {
    fn as_array(&self) -> [f64; 5] {
        [self.d, self.m, self.m_prime, self.f, self.omega]
    }
}

/// Compute the fundamental arguments for `t` Julian centuries since J2000
pub fn fundamental_arguments(t: f64) -> FundamentalArguments {
    let t2 = t * t;
    let t3 = t2 * t;
    FundamentalArguments {
        d: 297.850_36 + 445_267.111_480 * t - 0.001_914_2 * t2 + t3 / 189_474.0,
        m: 357.527_72 + 35_999.050_340 * t - 0.000_160_3 * t2 - t3 / 300_000.0,
        m_prime: 134.962_98 + 477_198.867_398 * t + 0.008_697_2 * t2 + t3 / 56_250.0,
        f: 93.271_91 + 483_202.017_538 * t - 0.003_682_5 * t2 + t3 / 327_270.0,
        omega: 125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t2 + t3 / 450_000.0,
    }
}

/// Nutation in longitude and obliquity, both in arcseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub delta_psi: f64,
    pub delta_epsilon: f64,
}

impl Nutation {
    pub fn delta_psi_angle(&self) -> Angle {
        Angle::from_arcseconds(self.delta_psi)
    }

    pub fn delta_epsilon_angle(&self) -> Angle {
        Angle::from_arcseconds(self.delta_epsilon)
    }
}

/// Evaluate the IAU 1980 nutation series at `time`
pub fn nutation(time: &Time) -> Nutation {
    let t = time.julian_centuries_since_j2000();
    let args = fundamental_arguments(t).as_array();

    let mut delta_psi = 0.0;
    let mut delta_epsilon = 0.0;
    for (multipliers, coeffs) in NUTATION_ARGUMENTS.iter().zip(NUTATION_COEFFICIENTS.iter()) {
        let argument: f64 = multipliers
            .iter()
            .zip(args.iter())
            .map(|(&k, &a)| k as f64 * a)
            .sum::<f64>()
            .to_radians();
        delta_psi += (coeffs[0] + coeffs[1] * t) * argument.sin();
        delta_epsilon += (coeffs[2] + coeffs[3] * t) * argument.cos();
    }

    Nutation {
        delta_psi: delta_psi * 1e-4,
        delta_epsilon: delta_epsilon * 1e-4,
    }
}

/// Mean obliquity of the ecliptic in arcseconds
///
/// Laskar's polynomial is only valid within 10,000 years of J2000; outside
/// that range an `OutOfRange` error is returned instead of an extrapolation.
pub fn mean_obliquity_arcsec(time: &Time) -> Result<f64> {
    let u = time.julian_centuries_since_j2000() / 100.0;
    if u.abs() >= 1.0 {
        return Err(StarframeError::OutOfRange(format!(
            "mean obliquity is undefined for {} (more than 10,000 years from J2000)",
            time
        )));
    }
    // Horner evaluation from the highest power down
    Ok(LASKAR_COEFFS.iter().rev().fold(0.0, |acc, c| acc * u + c))
}

/// Mean obliquity of the ecliptic
pub fn mean_obliquity(time: &Time) -> Result<Angle> {
    Ok(Angle::from_arcseconds(mean_obliquity_arcsec(time)?))
}

/// True obliquity of the ecliptic: mean obliquity plus nutation in obliquity
pub fn true_obliquity(time: &Time) -> Result<Angle> {
    let mean = mean_obliquity_arcsec(time)?;
    Ok(Angle::from_arcseconds(mean + nutation(time).delta_epsilon))
}

/// Rotation from mean equator and equinox of date to true equator and equinox of date
pub fn nutation_matrix(time: &Time) -> Result<Matrix3<f64>> {
    let epsilon = mean_obliquity_arcsec(time)? * ASEC2RAD;
    let nut = nutation(time);
    let true_epsilon = epsilon + nut.delta_epsilon * ASEC2RAD;
    Ok(rotation_x(-true_epsilon) * rotation_z(-nut.delta_psi * ASEC2RAD) * rotation_x(epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nutation_reference_date() {
        // 1987 April 10, 0h TD
        let time = Time::from_jd(2_446_895.5);
        let nut = nutation(&time);
        assert_relative_eq!(nut.delta_psi, -3.788, epsilon = 1e-3);
        assert_relative_eq!(nut.delta_epsilon, 9.443, epsilon = 1e-3);
    }

    #[test]
    fn test_fundamental_arguments_at_j2000() {
        let args = fundamental_arguments(0.0);
        assert_eq!(args.d, 297.850_36);
        assert_eq!(args.omega, 125.044_52);
    }

    #[test]
    fn test_obliquity_reference_date() {
        let time = Time::from_jd(2_446_895.5);
        // 23°26'27.407"
        let mean = mean_obliquity(&time).unwrap();
        assert_relative_eq!(mean.to_arcseconds(), 84_387.407, epsilon = 1e-3);
        // 23°26'36.850"
        let true_eps = true_obliquity(&time).unwrap();
        assert_relative_eq!(true_eps.to_arcseconds(), 84_396.849, epsilon = 1e-3);
    }

    #[test]
    fn test_mean_obliquity_at_j2000() {
        let eps = mean_obliquity_arcsec(&Time::J2000).unwrap();
        assert_eq!(eps, 84_381.448);
    }

    #[test]
    fn test_obliquity_out_of_range() {
        let far = Time::julian_year(13_000.0);
        assert!(matches!(
            mean_obliquity(&far),
            Err(StarframeError::OutOfRange(_))
        ));
        assert!(true_obliquity(&Time::julian_year(-9_000.0)).is_err());
    }

    #[test]
    fn test_nutation_matrix_small_rotation() {
        let time = Time::from_jd(2_446_895.5);
        let n = nutation_matrix(&time).unwrap();
        assert_relative_eq!(n.determinant(), 1.0, epsilon = 1e-14);
        // The equinox moves by Δψ along the ecliptic; x barely changes
        assert_relative_eq!(n[(0, 0)], 1.0, epsilon = 1e-9);
        let nut = nutation(&time);
        let eps = mean_obliquity_arcsec(&time).unwrap() * ASEC2RAD;
        assert_relative_eq!(n[(0, 1)], -nut.delta_psi * ASEC2RAD * eps.cos(), epsilon = 1e-9);
    }
}
