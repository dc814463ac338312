mod geocentric;
mod geodesics;
mod latitudes;
mod meridians;

pub(crate) use geocentric::GeodeticRegions;
pub(crate) use latitudes::ConformalSeries;
pub(crate) use meridians::MeridianArc;

use crate::math::ancillary::prime_vertical_radius;

/// Representation of a biaxial ellipsoid, or a sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// WGS84 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563)
    }
}

impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Ellipsoid given by its semimajor (equatorial) and semiminor (polar) axes
    #[must_use]
    pub fn from_axes(semimajor_axis: f64, semiminor_axis: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: (semimajor_axis - semiminor_axis) / semimajor_axis,
        }
    }

    #[must_use]
    pub fn sphere(radius: f64) -> Ellipsoid {
        Ellipsoid { a: radius, f: 0. }
    }

    /// Spheres take the closed form branches of the geodetic computations
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.f.abs() < 1e-15
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// The aspect ratio, *b / a  =  1 - f  =  sqrt(1 - e²)*
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        1.0 - self.f
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.is_sphere() {
            return self.a;
        }
        prime_vertical_radius(self.a, self.eccentricity_squared(), latitude.sin())
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.is_sphere() {
            return self.a;
        }
        let es = self.eccentricity_squared();
        let num = self.a * (1.0 - es);
        let denom = (1.0 - latitude.sin().powi(2) * es).powf(1.5);
        num / denom
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_and_size() {
        let ellps = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7);
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.006_694_380_022_903_415_74).abs() < 1.0e-10);
        assert!((ellps.semiminor_axis() - 6_356_752.314_140_347).abs() < 1e-9);

        // Airy 1830, given by its axes
        let airy = Ellipsoid::from_axes(6_377_563.396, 6_356_256.909);
        assert!((1. / airy.flattening() - 299.324_964_6).abs() < 1e-6);
        assert!((airy.semiminor_axis() - 6_356_256.909).abs() < 1e-8);

        let moon = Ellipsoid::sphere(1_737_400.);
        assert!(moon.is_sphere());
        assert_eq!(moon.eccentricity_squared(), 0.);
        assert!(!ellps.is_sphere());
    }

    #[test]
    fn curvatures() {
        let ellps = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7);
        // The curvatures at the North Pole
        let pole = 90_f64.to_radians();
        assert!((ellps.meridian_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);
        assert!((ellps.prime_vertical_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);

        // The curvatures at the Equator
        assert!((ellps.meridian_radius_of_curvature(0.0) - 6_335_439.3271).abs() < 1.0e-4);
        assert!((ellps.prime_vertical_radius_of_curvature(0.0) - ellps.semimajor_axis()).abs() < 1.0e-4);

        let sphere = Ellipsoid::sphere(6_371_000.);
        assert_eq!(sphere.prime_vertical_radius_of_curvature(1.), 6_371_000.);
        assert_eq!(sphere.meridian_radius_of_curvature(1.), 6_371_000.);
    }
}
