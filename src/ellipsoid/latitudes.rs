use super::*;
use crate::math::fourier;
use std::f64::consts::FRAC_PI_2;

/// Snyder's (1987, eq. 3-5) series for the geographic latitude as a
/// function of the conformal latitude, 𝜒. Used by the inverse conformal
/// projections, once the projection has delivered 𝜒 in closed form.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConformalSeries {
    coefficients: [f64; 4],
}

impl ConformalSeries {
    /// Conformal latitude, 𝜒, to geographic, 𝜙
    #[must_use]
    pub fn geographic(&self, conformal_latitude: f64) -> f64 {
        conformal_latitude + fourier::sin(2. * conformal_latitude, &self.coefficients)
    }

    /// Geographic latitude from ts = exp(-𝜓), the inverse of [ts](crate::math::ancillary::ts)
    #[must_use]
    pub fn geographic_from_ts(&self, ts: f64) -> f64 {
        self.geographic(FRAC_PI_2 - 2. * ts.atan())
    }
}

// ----- Latitudes -------------------------------------------------------------
impl Ellipsoid {
    /// Geographic latitude to reduced latitude, 𝛽
    #[must_use]
    pub fn latitude_geographic_to_reduced(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. / (1. - self.f))
    }

    /// Obtain the coefficients needed for working with conformal latitudes
    #[must_use]
    #[rustfmt::skip]
    pub(crate) fn conformal_series(&self) -> ConformalSeries {
        let e2 = self.eccentricity_squared();
        let (e4, e6, e8) = (e2 * e2, e2 * e2 * e2, e2 * e2 * e2 * e2);
        ConformalSeries {
            coefficients: [
                e2 / 2. + 5. * e4 / 24. + e6 / 12. + 13. * e8 / 360.,
                7. * e4 / 48. + 29. * e6 / 240. + 811. * e8 / 11520.,
                7. * e6 / 120. + 81. * e8 / 1120.,
                4279. * e8 / 161_280.,
            ],
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ancillary::ts;

    #[test]
    fn conformal() {
        let ellps = Ellipsoid::default();
        let series = ellps.conformal_series();
        let e = ellps.eccentricity();

        for i in -8..=8 {
            let phi = (10. * i as f64 + 0.5).to_radians();
            let t = ts(phi.sin_cos(), e);
            assert!((series.geographic_from_ts(t) - phi).abs() < 1e-11);
        }

        // On the sphere, the conformal latitude is the geographic latitude
        let sphere = Ellipsoid::sphere(6_371_000.);
        assert_eq!(sphere.conformal_series().geographic(0.5), 0.5);
    }

    #[test]
    fn reduced() {
        let ellps = Ellipsoid::default();
        let beta = ellps.latitude_geographic_to_reduced(45_f64.to_radians());
        assert!((beta.tan() - (1. - ellps.flattening())).abs() < 1e-15);
    }
}
