//! Transverse Mercator, following Redfearn's series, as used by the
//! Ordnance Survey and by the SRM for UTM and the state plane systems.
//! The series are carried to the 8th power of the longitude term, and
//! are accurate to the millimetre level within some 10° of the central meridian.
use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Tmerc {
    a: f64,
    es: f64,
    k_0: f64,
    lon_0: f64,
    arc: MeridianArc,
    /// Meridian distance from the equator to the latitude of origin
    m_0: f64,
}

impl Tmerc {
    pub fn new(ellps: &Ellipsoid, params: &TmParameters) -> Tmerc {
        let arc = ellps.meridian_arc();
        Tmerc {
            a: ellps.semimajor_axis(),
            es: ellps.eccentricity_squared(),
            k_0: params.central_scale,
            lon_0: params.origin_longitude,
            m_0: arc.distance(params.origin_latitude),
            arc,
        }
    }

    /// Radii of curvature in the prime vertical and the meridian
    fn curvatures(&self, sinphi: f64) -> (f64, f64) {
        let w = 1. - self.es * sinphi * sinphi;
        let nu = self.a / w.sqrt();
        (nu, self.a * (1. - self.es) / (w * w.sqrt()))
    }

    #[allow(non_snake_case)]
    #[rustfmt::skip]
    pub fn fwd(&self, lon: f64, lat: f64) -> [f64; 2] {
        let (s, c) = lat.sin_cos();
        let t = s / c;
        let t2 = t * t;
        let (nu, rho) = self.curvatures(s);
        let psi = nu / rho;

        let al = delta_lambda_min(lon, self.lon_0) * c;
        let al2 = al * al;

        let E = 1.
            + al2 / 6. * (psi - t2)
            + al2 * al2 / 120. * (4. * cube(psi) * (1. - 6. * t2) + sq(psi) * (1. + 8. * t2) - 2. * psi * t2 + t2 * t2)
            + cube(al2) / 5040. * (61. - 479. * t2 + 179. * t2 * t2 - cube(t2));

        let N = al2 / 2.
            + al2 * al2 / 24. * (4. * psi * psi + psi - t2)
            + cube(al2) / 720. * (8. * sq(sq(psi)) * (11. - 24. * t2) - 28. * cube(psi) * (1. - 6. * t2)
                                  + sq(psi) * (1. - 32. * t2) - 2. * psi * t2 + t2 * t2)
            + sq(sq(al2)) / 40320. * (1385. - 3111. * t2 + 543. * t2 * t2 - cube(t2));

        let m = self.arc.distance(lat) - self.m_0;
        [self.k_0 * nu * al * E, self.k_0 * (m + nu * t * N)]
    }

    #[allow(non_snake_case)]
    #[rustfmt::skip]
    pub fn inv(&self, x: f64, y: f64) -> [f64; 2] {
        let footpoint = self.arc.footpoint_latitude(y / self.k_0 + self.m_0);
        let (s, c) = footpoint.sin_cos();
        let t = s / c;
        let t2 = t * t;
        let (nu, rho) = self.curvatures(s);
        let psi = nu / rho;

        let X = x / (self.k_0 * nu);
        let T = t / (self.k_0 * rho);

        let lat = footpoint
            - T * x * X / 2.
            + T * x * cube(X) / 24. * (-4. * sq(psi) + 9. * psi * (1. - t2) + 12. * t2)
            - T * x * X.powi(5) / 720. * (8. * sq(sq(psi)) * (11. - 24. * t2) - 12. * cube(psi) * (21. - 71. * t2)
                                          + 15. * sq(psi) * (15. - 98. * t2 + 15. * t2 * t2)
                                          + 180. * psi * (5. * t2 - 3. * t2 * t2) + 360. * t2 * t2)
            + T * x * X.powi(7) / 40320. * (1385. + 3633. * t2 + 4095. * t2 * t2 + 1575. * cube(t2));

        let sec = 1. / c;
        let dlon = sec * X
            - sec * cube(X) / 6. * (psi + 2. * t2)
            + sec * X.powi(5) / 120. * (-4. * cube(psi) * (1. - 6. * t2) + sq(psi) * (9. - 68. * t2) + 72. * psi * t2 + 24. * t2 * t2)
            - sec * X.powi(7) / 5040. * (61. + 662. * t2 + 1320. * t2 * t2 + 720. * cube(t2));

        [delta_lambda_min(self.lon_0 + dlon, 0.), lat]
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn grs80() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }

    #[test]
    fn utm() {
        let d = f64::to_radians;
        let params = TmParameters {
            origin_longitude: d(9.),
            central_scale: 0.9996,
            ..Default::default()
        };
        let tm = Tmerc::new(&grs80(), &params);

        // Reference values from PROJ (etmerc), agreeing to well below a millimetre
        let [x, y] = tm.fwd(d(12.), d(55.));
        assert_float_eq!(x + 500_000., 691_875.632_139_661, abs <= 1e-3);
        assert_float_eq!(y, 6_098_907.825_005_012, abs <= 1e-3);

        let [lon, lat] = tm.inv(x, y);
        assert_float_eq!(lon, d(12.), abs <= 1e-10);
        assert_float_eq!(lat, d(55.), abs <= 1e-10);

        // On the central meridian, the northing is the scaled meridian distance
        let [x, y] = tm.fwd(d(9.), d(30.));
        assert_eq!(x, 0.);
        assert_float_eq!(y, 0.9996 * grs80().meridian_arc().distance(d(30.)), abs <= 1e-9);
    }

    #[test]
    fn british_national_grid() {
        let d = f64::to_radians;
        let airy = Ellipsoid::from_axes(6_377_563.396, 6_356_256.909);
        let params = TmParameters {
            origin_longitude: d(-2.),
            origin_latitude: d(49.),
            central_scale: 0.999_601_271_7,
            false_easting: 400_000.,
            false_northing: -100_000.,
        };
        let tm = Tmerc::new(&airy, &params);
        let [x, y] = tm.fwd(d(1.), d(52.));
        assert_float_eq!(x + 400_000., 605_909.130_344_302, abs <= 1e-3);
        assert_float_eq!(y - 100_000., 237_803.365_171_569, abs <= 1e-3);
    }

    #[test]
    fn roundtrip() {
        let d = f64::to_radians;
        let tm = Tmerc::new(&grs80(), &TmParameters::default());
        for dlon in [0.5, 1., 3., 4.] {
            for lat in (-80..=80).step_by(10) {
                let [x, y] = tm.fwd(d(dlon), d(lat as f64));
                let [lon, phi] = tm.inv(x, y);
                assert!((lon - d(dlon)).abs() < 1e-10);
                assert!((phi - d(lat as f64)).abs() < 1e-10);
            }
        }
    }
}
