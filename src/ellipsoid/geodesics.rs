use super::*;

// ----- Geodesics -------------------------------------------------------------
impl Ellipsoid {
    /// The inverse geodesic problem: distance and azimuths between two points
    /// given as (longitude, latitude) in radians. Returns
    /// `[forward azimuth, return azimuth, distance]`.
    ///
    /// We use the algorithm by Vincenty ([1975](crate::Bibliography::Vin75)),
    /// with updates by the same author ([1976](crate::Bibliography::Vin76)).
    /// It is relatively simple, but for near-antipodal cases, it suffers from
    /// lack of convergence and loss of accuracy.
    #[must_use]
    #[allow(non_snake_case)] // allow math-like notation
    pub fn geodesic_inv(&self, from: [f64; 2], to: [f64; 2]) -> [f64; 3] {
        let B1 = from[1];
        let B2 = to[1];
        let B = B2 - B1;

        let L1 = from[0];
        let L2 = to[0];
        let L = crate::math::ancillary::delta_lambda_min(L2, L1);

        // Below the micrometer level, we don't care about directions
        if L.hypot(B) < 1e-15 {
            return [0., 0., 0.];
        }

        let U1 = self.latitude_geographic_to_reduced(B1);
        let U2 = self.latitude_geographic_to_reduced(B2);

        let (U1sin, U1cos) = U1.sin_cos();
        let (U2sin, U2cos) = U2.sin_cos();
        let eps = self.second_eccentricity_squared();

        // Initial estimate for λ, the longitude on the auxiliary sphere
        let mut ll = L;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut ss = 0.;
        let mut llsin = 0.;
        let mut llcos = 1.;

        for _ in 0..1000 {
            // σ, the angular separation between the points
            (llsin, llcos) = ll.sin_cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U2cos * U1sin * llcos;
            sssin = t1.hypot(t2);
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;
            ss = sssin.atan2(sscos);

            // α, the forward azimuth of the geodesic at equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator.
            // Zero for equatorial lines
            ssmx2cos = if aacos2 == 0. {
                0.
            } else {
                sscos - 2. * U1sin * U2sin / aacos2
            };
            let C = (4. + self.f * (4. - 3. * aacos2)) * self.f * aacos2 / 16.;
            let ll_next = L
                + (1. - C)
                    * self.f
                    * aasin
                    * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
            let dl = (ll - ll_next).abs();
            ll = ll_next;
            if dl < 1e-12 {
                break;
            }
        }

        // A and B according to Vincenty's update (1976)
        let us = aacos2 * eps;
        let t = (1. + us).sqrt();
        let k1 = (t - 1.) / (t + 1.);
        let A = (1. + k1 * k1 / 4.) / (1. - k1);
        let B = k1 * (1. - 3. * k1 * k1 / 8.);

        // The difference between the dist on the aux sphere and on the ellipsoid.
        let t1 = -1. + 2. * ssmx2cos * ssmx2cos;
        let t2 = -3. + 4. * sssin * sssin;
        let t3 = -3. + 4. * ssmx2cos * ssmx2cos;
        let dss = B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3));

        // Distance, forward azimuth, return azimuth
        let s = self.semiminor_axis() * A * (ss - dss);
        let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
        let a2 = (U1cos * llsin).atan2(-U1sin * U2cos + U1cos * U2sin * llcos);
        [a1, a2, s]
    }

    /// Geodesic distance between two points given as (longitude, latitude)
    ///
    /// # Examples
    ///
    /// ```rust
    /// // Compute the distance between Copenhagen and Paris
    /// use srm::Ellipsoid;
    /// let ellps = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7);
    /// let cph = [12_f64.to_radians(), 55_f64.to_radians()];
    /// let par = [2_f64.to_radians(), 49_f64.to_radians()];
    /// let d = ellps.distance(cph, par);
    /// assert!((d - 956_066.231_959).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn distance(&self, from: [f64; 2], to: [f64; 2]) -> f64 {
        self.geodesic_inv(from, to)[2]
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geodesics() {
        let ellps = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7);

        // (expected values from Karney: https://geographiclib.sourceforge.io/cgi-bin/GeodSolve)

        // Copenhagen (Denmark)--Paris (France)
        // Expect distance good to 0.01 mm, azimuths to a nanodegree
        let p1 = [12_f64.to_radians(), 55_f64.to_radians()];
        let p2 = [2_f64.to_radians(), 49_f64.to_radians()];

        let d = ellps.geodesic_inv(p1, p2);
        assert!((d[0].to_degrees() - (-130.15406042072)).abs() < 1e-9);
        assert!((d[1].to_degrees() - (-138.05257941874)).abs() < 1e-9);
        assert!((d[2] - 956066.231959).abs() < 1e-5);

        // Copenhagen (Denmark)--a point in the Sahara
        // Expect distance good to 0.1 mm, azimuths to a nanodegree
        let p2 = [7_f64.to_radians(), 34_f64.to_radians()];

        let d = ellps.geodesic_inv(p1, p2);
        assert!((d[0].to_degrees() - (-168.48914418666)).abs() < 1e-9);
        assert!((d[1].to_degrees() - (-172.05461964948)).abs() < 1e-9);
        assert!((d[2] - 2365723.367715).abs() < 1e-4);

        // Coincident points
        assert_eq!(ellps.distance(p1, p1), 0.);
    }
}
