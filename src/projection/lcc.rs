//! Lambert Conformal Conic, with one or two standard parallels.
//! Snyder (1987), pp. 107-109.
use super::*;

/// Standard parallels closer than this are treated as a single tangent parallel
const TANGENT_CONE: f64 = 1e-4;

#[derive(Clone, Debug)]
pub(crate) struct Lcc {
    e: f64,
    lon_0: f64,
    /// The cone constant
    n: f64,
    /// a·F of Snyder's eqs. (15-2)
    af: f64,
    rho_0: f64,
    conformal: ConformalSeries,
}

impl Lcc {
    pub fn new(ellps: &Ellipsoid, params: &LccParameters) -> Lcc {
        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();
        let (phi1, phi2) = (params.latitude1, params.latitude2);

        let m1 = msfn(phi1.sin_cos(), es);
        let t1 = ts(phi1.sin_cos(), e);
        let n = if (phi1 - phi2).abs() < TANGENT_CONE {
            phi1.sin()
        } else {
            let m2 = msfn(phi2.sin_cos(), es);
            let t2 = ts(phi2.sin_cos(), e);
            (m1 / m2).ln() / (t1 / t2).ln()
        };

        let af = ellps.semimajor_axis() * m1 / (n * t1.powf(n));
        let rho_0 = af * ts(params.origin_latitude.sin_cos(), e).powf(n);
        Lcc {
            e,
            lon_0: params.origin_longitude,
            n,
            af,
            rho_0,
            conformal: ellps.conformal_series(),
        }
    }

    pub fn fwd(&self, lon: f64, lat: f64) -> Result<[f64; 2], Error> {
        let rho = if (lat.abs() - FRAC_PI_2).abs() < 1e-10 {
            // The pole opposite the apex is at infinity
            if lat * self.n <= 0. {
                return Err(Error::InvalidSourceCoordinate(String::from(
                    "LCC: pole opposite the cone apex",
                )));
            }
            0.
        } else {
            self.af * ts(lat.sin_cos(), self.e).powf(self.n)
        };
        let (s, c) = (self.n * delta_lambda_min(lon, self.lon_0)).sin_cos();
        Ok([rho * s, self.rho_0 - rho * c])
    }

    pub fn inv(&self, x: f64, y: f64) -> [f64; 2] {
        let (mut dx, mut dy) = (x, self.rho_0 - y);
        let rho = dx.hypot(dy).copysign(self.n);
        if rho == 0. {
            return [self.lon_0, FRAC_PI_2.copysign(self.n)];
        }
        if self.n < 0. {
            dx = -dx;
            dy = -dy;
        }
        let t = (rho / self.af).powf(1. / self.n);
        let lon = self.lon_0 + dx.atan2(dy) / self.n;
        [delta_lambda_min(lon, 0.), self.conformal.geographic_from_ts(t)]
    }
}

// ----- Tests ---------------------------------------------------------------------
