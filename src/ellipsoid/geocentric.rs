//! Celestiodetic (longitude, latitude, height) to celestiocentric (X, Y, Z), and v.v.
use super::*;
use crate::math::ancillary::cube;
use crate::Error;
use std::f64::consts::FRAC_PI_2;

impl Ellipsoid {
    /// Geographical to cartesian. The closed form, using the fast
    /// approximation of the prime vertical radius of curvature.
    #[must_use]
    pub fn cartesian(&self, geodetic: [f64; 3]) -> [f64; 3] {
        let (lam, phi, h) = (geodetic[0], geodetic[1], geodetic[2]);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        if self.is_sphere() {
            let r = self.a + h;
            return [r * cosphi * coslam, r * cosphi * sinlam, r * sinphi];
        }

        let es = self.eccentricity_squared();
        let n = prime_vertical_radius(self.a, es, sinphi);
        [
            (n + h) * cosphi * coslam,
            (n + h) * cosphi * sinlam,
            (n * (1. - es) + h) * sinphi,
        ]
    }
}

// ----- C A R T E S I A N   T O   G E O G R A P H I C A L ---------------------------

/// Which branch of the cartesian-to-geographical inverse handles a given point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Near the surface, |Z| ≤ w
    NearLow,
    /// Near the surface, |Z| > w
    NearHigh,
    /// Up to 10 semimajor axes away
    Far,
    /// Beyond 10 semimajor axes
    VeryFar,
    /// Deep interior
    Interior,
}

/// The constants of the region based cartesian-to-geographical inverse.
/// Built once per ellipsoid.
///
/// With w² = X² + Y², the normalized squared distance q = w²/a² + Z²/b² is
/// 1 on the surface. The space is partitioned on q (and, near the surface, on
/// Z² vs. w²), and each region gets a starting value for the reduced
/// latitude, 𝛽, good enough that a fixed, small number of Bowring
/// ([1976](crate::Bibliography::Bow76), [1985](crate::Bibliography::Bow85))
/// iterations reaches full double precision. The far region starts from the
/// closed form by Fukushima ([2006](crate::Bibliography::Fuk06)), in the
/// formulation by Claessens ([2019](crate::Bibliography::Cla19)).
/// The deep interior, q < 0.5, is solved by Newton iteration instead.
#[derive(Clone, Copy, Debug)]
pub struct GeodeticRegions {
    a: f64,
    b: f64,
    /// 1/a²
    ia2: f64,
    /// 1/b²
    ib2: f64,
    /// Eccentricity squared, e²
    es: f64,
    /// Second eccentricity squared, e'²
    eps: f64,
    /// b/a
    ar: f64,
    /// 1.5 e⁴
    ce4: f64,
    /// Closer than this to the Z axis, the latitude is forced to one of the poles
    cutoff: f64,
    sphere: bool,
}

const Q_NEAR_MIN: f64 = 0.5;
const Q_NEAR_MAX: f64 = 1.5;
const Q_FAR_MAX: f64 = 100.;
const NEWTON_ITERATIONS: usize = 16;
const MAX_INTERIOR_ITERATIONS: usize = 64;

impl GeodeticRegions {
    #[must_use]
    pub fn new(ellps: &Ellipsoid) -> GeodeticRegions {
        let a = ellps.semimajor_axis();
        let b = ellps.semiminor_axis();
        let es = ellps.eccentricity_squared();
        GeodeticRegions {
            a,
            b,
            ia2: 1. / (a * a),
            ib2: 1. / (b * b),
            es,
            eps: ellps.second_eccentricity_squared(),
            ar: b / a,
            ce4: 1.5 * es * es,
            cutoff: a * 1e-16,
            sphere: ellps.is_sphere(),
        }
    }

    #[must_use]
    pub fn region(&self, w: f64, z: f64) -> Region {
        let q = w * w * self.ia2 + z * z * self.ib2;
        if (Q_NEAR_MIN..=Q_NEAR_MAX).contains(&q) {
            if z * z <= w * w {
                return Region::NearLow;
            }
            return Region::NearHigh;
        }
        if q > Q_NEAR_MAX && q <= Q_FAR_MAX {
            return Region::Far;
        }
        if q > Q_FAR_MAX {
            return Region::VeryFar;
        }
        Region::Interior
    }

    /// One Bowring step: from the (sin, cos) of the reduced latitude, to the
    /// unnormalized (sin, cos) of the geographical latitude
    #[inline]
    fn bowring(&self, w: f64, z: f64, sb: f64, cb: f64) -> (f64, f64) {
        (
            z + self.eps * self.b * cube(sb),
            w - self.es * self.a * cube(cb),
        )
    }

    /// Unnormalized (sin, cos) of the geographical latitude, to normalized
    /// (sin, cos) of the reduced latitude: tan 𝛽 = (1 - f) tan 𝜙
    #[inline]
    fn reduce(&self, num: f64, den: f64) -> (f64, f64) {
        let n = self.ar * num;
        let r = n.hypot(den);
        (n / r, den / r)
    }

    fn iterate(&self, w: f64, z: f64, mut sb: f64, mut cb: f64, n: usize) -> (f64, f64) {
        let (mut num, mut den) = self.bowring(w, z, sb, cb);
        for _ in 1..n {
            (sb, cb) = self.reduce(num, den);
            (num, den) = self.bowring(w, z, sb, cb);
        }
        (num, den)
    }

    /// (sin 𝛽, cos 𝛽) from tan 𝛽 = a Z / (b w)
    #[inline]
    fn parametric_start(&self, w: f64, z: f64) -> (f64, f64) {
        let t = (self.a * z) / (self.b * w);
        let cb = 1. / (1. + t * t).sqrt();
        (cb * t, cb)
    }

    /// Cartesian (X, Y, Z) to geographical (longitude, latitude, height)
    #[allow(non_snake_case)]
    pub fn geodetic(&self, cartesian: [f64; 3]) -> Result<[f64; 3], Error> {
        let [X, Y, Z] = cartesian;
        if cartesian.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidSourceCoordinate(format!("{cartesian:?}")));
        }
        let w = X.hypot(Y);

        let (phi, h) = if w < self.cutoff {
            if Z == 0. {
                return Err(Error::InvalidSourceCoordinate(String::from(
                    "the geocentre has no geodetic latitude",
                )));
            }
            (FRAC_PI_2.copysign(Z), Z.abs() - self.b)
        } else if Z == 0. {
            (0., w - self.a)
        } else if self.sphere {
            (Z.atan2(w), w.hypot(Z) - self.a)
        } else {
            let (num, den) = match self.region(w, Z) {
                Region::NearLow => {
                    let (sb, cb) = self.parametric_start(w, Z);
                    self.iterate(w, Z, sb, cb, 2)
                }
                Region::NearHigh => {
                    let t = (self.b * w) / (self.a * Z.abs());
                    let r = (1. + t * t).sqrt();
                    self.iterate(w, Z, (1. / r).copysign(Z), t / r, 2)
                }
                Region::Far => {
                    let (sb, cb) = self.fukushima(w, Z);
                    self.iterate(w, Z, sb, cb, 1)
                }
                Region::VeryFar => {
                    let r = w.hypot(Z);
                    self.iterate(w, Z, Z / r, w / r, 3)
                }
                Region::Interior => self.interior(w, Z),
            };
            self.latitude_and_height(w, Z, num, den)
        };

        // The longitude is straightforward, and computed only once
        Ok([Y.atan2(X), phi, h])
    }

    /// Fukushima's closed form, reduced to (sin 𝛽, cos 𝛽)
    #[allow(non_snake_case)]
    fn fukushima(&self, w: f64, Z: f64) -> (f64, f64) {
        let P = w / self.a;
        let S0 = Z / self.a;
        let C0 = self.ar * P;
        let A = S0.hypot(C0);
        let F = P * A * A * A - self.es * C0 * C0 * C0;
        let B = self.ce4 * S0 * S0 * C0 * C0 * P * (A - self.ar);
        let S1 = (self.ar * S0 * A * A * A + self.es * S0 * S0 * S0) * F - B * S0;
        let C1 = F * F - B * C0;
        self.reduce(S1, self.ar * C1)
    }

    /// Deep inside the ellipsoid the Bowring step is no contraction, so we
    /// solve directly for the reduced latitude 𝛽 of the foot point, i.e. the root of
    /// f(𝛽) = ((a² - b²) cos 𝛽 - a w) sin 𝛽 + b z cos 𝛽
    /// in [-𝜋/2, 𝜋/2], where f changes sign. Near the geocentre f has several
    /// roots: plain Newton from the parametric start picks the one closest to
    /// it, and a bracketed Newton takes over if that wanders off.
    fn interior(&self, w: f64, z: f64) -> (f64, f64) {
        let c = self.a * self.a - self.b * self.b;
        let f = |beta: f64| {
            let (s, co) = beta.sin_cos();
            (c * co - self.a * w) * s + self.b * z * co
        };
        let df = |beta: f64| {
            let (s, co) = beta.sin_cos();
            c * (co * co - s * s) - self.a * w * co - self.b * z * s
        };
        let foot = |beta: f64| {
            let (s, co) = beta.sin_cos();
            (self.a * s, self.b * co)
        };

        let (sb, cb) = self.parametric_start(w, z);
        let mut beta = sb.atan2(cb);
        for _ in 0..NEWTON_ITERATIONS {
            let next = beta - f(beta) / df(beta);
            if !(-FRAC_PI_2..=FRAC_PI_2).contains(&next) {
                break;
            }
            if (next - beta).abs() < 1e-15 {
                return foot(next);
            }
            beta = next;
        }

        // f(lo) > 0 > f(hi)
        let (mut lo, mut hi) = (-FRAC_PI_2, FRAC_PI_2);
        for _ in 0..MAX_INTERIOR_ITERATIONS {
            let fb = f(beta);
            if fb == 0. {
                return foot(beta);
            }
            if fb > 0. {
                lo = beta;
            } else {
                hi = beta;
            }
            let mut next = beta - fb / df(beta);
            if !(next > lo && next < hi) {
                next = 0.5 * (lo + hi);
            }
            if (next - beta).abs() < 1e-15 {
                return foot(next);
            }
            beta = next;
        }
        log::warn!("Geodetic latitude did not converge for interior point (w={w}, z={z})");
        foot(beta)
    }

    fn latitude_and_height(&self, w: f64, z: f64, num: f64, den: f64) -> (f64, f64) {
        let r = num.hypot(den);
        let (sinphi, cosphi) = (num / r, den / r);
        let n = prime_vertical_radius(self.a, self.es, sinphi);
        (num.atan2(den), w * cosphi + z * sinphi - self.a * self.a / n)
    }
}

// ----- Tests ---------------------------------------------------------------------
