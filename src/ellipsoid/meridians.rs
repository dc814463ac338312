use super::*;
use crate::math::fourier;

// ----- Meridian geometry -----------------------------------------------------

/// Helmert's series for the meridian arc, and its inverse, the footpoint
/// latitude. Coefficients are truncated after the n⁴ terms, giving
/// sub-millimetre accuracy for every terrestrial ellipsoid.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeridianArc {
    /// The rectifying radius, *A*
    pub rectifying_radius: f64,
    fwd: [f64; 4],
    inv: [f64; 4],
}

impl MeridianArc {
    /// The distance along the meridian, from the equator to `latitude`
    #[must_use]
    pub fn distance(&self, latitude: f64) -> f64 {
        self.rectifying_radius * (latitude + fourier::sin(2. * latitude, &self.fwd))
    }

    /// The latitude reached after walking `distance` along the meridian from the equator
    #[must_use]
    pub fn footpoint_latitude(&self, distance: f64) -> f64 {
        let mu = distance / self.rectifying_radius;
        mu + fourier::sin(2. * mu, &self.inv)
    }
}

impl Ellipsoid {
    /// The rectifying radius, *A*, is the radius of a sphere of the same circumference
    /// as the length of a full meridian on the ellipsoid.
    #[must_use]
    pub fn rectifying_radius(&self) -> f64 {
        let n = self.third_flattening();
        let n2 = n * n;
        self.a / (1. + n) * (1. + n2 / 4. + n2 * n2 / 64.)
    }

    /// The series coefficients needed for meridian arc computations
    #[must_use]
    #[rustfmt::skip]
    pub(crate) fn meridian_arc(&self) -> MeridianArc {
        let n = self.third_flattening();
        let (n2, n3, n4) = (n * n, n * n * n, n * n * n * n);
        MeridianArc {
            rectifying_radius: self.rectifying_radius(),
            fwd: [
                -(3. * n / 2. - 9. * n3 / 16.),
                  15. * n2 / 16. - 15. * n4 / 32.,
                -(35. * n3 / 48.),
                  315. * n4 / 512.,
            ],
            inv: [
                3. * n / 2. - 27. * n3 / 32.,
                21. * n2 / 16. - 55. * n4 / 32.,
                151. * n3 / 96.,
                1097. * n4 / 512.,
            ],
        }
    }

    /// The Meridian Quadrant, *Qm*, is the distance from the equator to one of the poles.
    #[must_use]
    pub fn meridian_quadrant(&self) -> f64 {
        self.rectifying_radius() * std::f64::consts::FRAC_PI_2
    }
}
