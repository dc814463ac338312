//! Polar stereographic, ellipsoidal form with a central scale factor.
//! Snyder (1987), eqs. (21-33) and (21-34)
use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Stere {
    e: f64,
    /// +1 for the northern aspect, -1 for the southern
    s: f64,
    lon_0: f64,
    /// 2·a·k₀ / √((1+e)^(1+e) (1-e)^(1-e))
    scale: f64,
    conformal: ConformalSeries,
}

impl Stere {
    pub fn new(ellps: &Ellipsoid, params: &PsParameters) -> Stere {
        let e = ellps.eccentricity();
        let denom = ((1. + e).powf(1. + e) * (1. - e).powf(1. - e)).sqrt();
        Stere {
            e,
            s: params.aspect.sign(),
            lon_0: params.origin_longitude,
            scale: 2. * ellps.semimajor_axis() * params.central_scale / denom,
            conformal: ellps.conformal_series(),
        }
    }

    pub fn fwd(&self, lon: f64, lat: f64) -> Result<[f64; 2], Error> {
        let lat = self.s * lat;
        if (lat + FRAC_PI_2).abs() < 1e-10 {
            return Err(Error::InvalidSourceCoordinate(String::from(
                "Polar stereographic: the opposite pole is at infinity",
            )));
        }
        let rho = self.scale * ts(lat.sin_cos(), self.e);
        let (sin, cos) = delta_lambda_min(lon, self.lon_0).sin_cos();
        Ok([rho * sin, -self.s * rho * cos])
    }

    pub fn inv(&self, x: f64, y: f64) -> [f64; 2] {
        let rho = x.hypot(y);
        if rho == 0. {
            return [self.lon_0, self.s * FRAC_PI_2];
        }
        let lat = self.s * self.conformal.geographic_from_ts(rho / self.scale);
        let lon = delta_lambda_min(self.lon_0 + x.atan2(-self.s * y), 0.);
        [lon, lat]
    }
}

// ----- Tests ---------------------------------------------------------------------
