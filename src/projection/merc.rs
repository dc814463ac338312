//! Mercator, ellipsoidal form. Snyder (1987), eqs. (7-7) and (7-9)
use super::*;

/// Above this latitude, the isometric latitude is computed from `ts`
const ISOMETRIC_SWITCH: f64 = 35.5 * PI / 180.;

#[derive(Clone, Debug)]
pub(crate) struct Merc {
    e: f64,
    /// a·k₀
    ak: f64,
    lon_0: f64,
    conformal: ConformalSeries,
}

impl Merc {
    pub fn new(ellps: &Ellipsoid, params: &MercatorParameters) -> Merc {
        Merc {
            e: ellps.eccentricity(),
            ak: ellps.semimajor_axis() * params.central_scale,
            lon_0: params.origin_longitude,
            conformal: ellps.conformal_series(),
        }
    }

    pub fn fwd(&self, lon: f64, lat: f64) -> Result<[f64; 2], Error> {
        if FRAC_PI_2 - lat.abs() < 1e-10 {
            return Err(Error::InvalidSourceCoordinate(String::from(
                "Mercator: the poles are at infinity",
            )));
        }
        let psi = if lat.abs() <= ISOMETRIC_SWITCH {
            lat.tan().asinh() - self.e * (self.e * lat.sin()).atanh()
        } else {
            -ts(lat.sin_cos(), self.e).ln()
        };
        Ok([self.ak * delta_lambda_min(lon, self.lon_0), self.ak * psi])
    }

    pub fn inv(&self, x: f64, y: f64) -> [f64; 2] {
        let chi = 2. * (y / self.ak).exp().atan() - FRAC_PI_2;
        let lon = delta_lambda_min(self.lon_0 + x / self.ak, 0.);
        [lon, self.conformal.geographic(chi)]
    }
}

// ----- Tests ---------------------------------------------------------------------
