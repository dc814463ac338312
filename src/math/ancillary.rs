use super::taylor::horner;
use std::f64::consts::PI;
use std::f64::consts::TAU;

#[inline]
#[must_use]
pub fn sq(x: f64) -> f64 {
    x * x
}

#[inline]
#[must_use]
pub fn cube(x: f64) -> f64 {
    x * x * x
}

/// Binomial coefficients of (1 - x)^(-1/2), i.e. C(2k, k) / 4^k, for k in 0..10
#[rustfmt::skip]
const RN_COEFFICIENTS: [f64; 10] = [
    1.0,
    0.5,
    0.375,
    0.3125,
    0.273_437_5,
    0.246_093_75,
    0.225_585_937_5,
    0.209_472_656_25,
    0.196_380_615_234_375,
    0.185_470_581_054_687_5,
];

/// The radius of curvature in the prime vertical, *N*, from the semimajor
/// axis `a`, the squared eccentricity `es` and the sine of the latitude.
///
/// For `es sin²𝜙 < 0.01`, which covers every terrestrial ellipsoid, the
/// reciprocal square root is replaced by its binomial expansion, truncated
/// after the 9th power. The truncation error is below 1e-20 relative.
#[inline]
#[must_use]
pub fn prime_vertical_radius(a: f64, es: f64, sinphi: f64) -> f64 {
    let x = es * sinphi * sinphi;
    if x < 0.01 {
        return a * horner(x, &RN_COEFFICIENTS);
    }
    a / (1. - x).sqrt()
}

/// The signed shortest angular difference `a - b`, normalized to (-𝜋, 𝜋].
///
/// Used wherever a longitude is reduced relative to a central meridian,
/// so the ±180° seam never produces a full turn of error.
#[must_use]
pub fn delta_lambda_min(a: f64, b: f64) -> f64 {
    let mut d = (a - b) % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

/// ts is the equivalent of Charles Karney's PROJ function `pj_tsfn`.
/// It determines the function ts(phi) as defined in Snyder (1987),
/// Eq. (7-10)
///
/// ts is the exponential of the negated isometric latitude, i.e.
/// exp(-𝜓), but evaluated in a numerically more stable way than
/// the naive isometric_latitude(...).exp()
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
/// Output:
///   ts: exp(-𝜓)  =  1 / (tan 𝜒 + sec 𝜒)
///   where 𝜓 is the isometric latitude (dimensionless)
///   and 𝜒 is the conformal latitude (radians)
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1987) eq. 14-15, PROJ's pj_msfn()
pub fn msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

// ----- Tests ---------------------------------------------------------------------
